//! Config command - inspect or create the converter settings file.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use docfidelity_core::ConverterConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the settings `convert` would use, as JSON
    Show,

    /// Write a settings file filled with defaults
    Init(InitArgs),

    /// Print which settings file is in effect
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Destination (default: the `-c` path, else the per-user file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replace an existing file
    #[arg(long)]
    force: bool,
}

/// Where the settings come from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    /// Given with `-c/--config`; must exist.
    Explicit(PathBuf),
    /// The per-user file, present on disk.
    UserFile(PathBuf),
    /// No file; built-in defaults.
    Defaults,
}

impl ConfigSource {
    fn resolve(explicit: Option<&str>) -> Self {
        if let Some(path) = explicit {
            return ConfigSource::Explicit(PathBuf::from(path));
        }
        let user = user_config_path();
        if user.exists() {
            ConfigSource::UserFile(user)
        } else {
            ConfigSource::Defaults
        }
    }

    fn path(&self) -> Option<&PathBuf> {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::UserFile(path) => Some(path),
            ConfigSource::Defaults => None,
        }
    }

    fn load(&self) -> anyhow::Result<ConverterConfig> {
        match self.path() {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                ConverterConfig::from_file(path)
                    .map_err(|e| anyhow::anyhow!("Cannot read config {}: {}", path.display(), e))
            }
            None => Ok(ConverterConfig::default()),
        }
    }
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let source = ConfigSource::resolve(config_path);
    match args.command {
        ConfigCommand::Show => {
            if source == ConfigSource::Defaults {
                eprintln!("{} Using built-in defaults.", style("ℹ").blue());
            }
            println!("{}", serde_json::to_string_pretty(&source.load()?)?);
        }
        ConfigCommand::Init(init_args) => init_config(init_args, config_path)?,
        ConfigCommand::Path => match source.path() {
            Some(path) => println!("{}", path.display()),
            None => {
                println!("{}", user_config_path().display());
                eprintln!(
                    "{} Not created yet; run `docfidelity config init`.",
                    style("ℹ").yellow()
                );
            }
        },
    }
    Ok(())
}

/// Per-user settings file, e.g. `~/.config/docfidelity/config.json`.
pub fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docfidelity")
        .join("config.json")
}

/// Settings from `-c`, else the per-user file if present, else defaults.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<ConverterConfig> {
    ConfigSource::resolve(explicit).load()
}

fn init_config(args: InitArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let target = args
        .output
        .or_else(|| config_path.map(PathBuf::from))
        .unwrap_or_else(user_config_path);

    if target.exists() && !args.force {
        anyhow::bail!("{} already exists; pass --force to replace it", target.display());
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    ConverterConfig::default().save(&target)?;

    println!("{} Wrote {}", style("✓").green(), target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let source = ConfigSource::resolve(Some("/tmp/custom.json"));
        assert_eq!(source, ConfigSource::Explicit(PathBuf::from("/tmp/custom.json")));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(load_config(missing.to_str()).is_err());
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = ConverterConfig::default();
        config.container_css = "font-family:Garamond;".to_string();
        config.save(&path).unwrap();

        let loaded = load_config(path.to_str()).unwrap();
        assert_eq!(loaded.container_css, "font-family:Garamond;");
    }
}
