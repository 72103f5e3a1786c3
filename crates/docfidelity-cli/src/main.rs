//! CLI application for converting documents into HTML templates.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, convert, fields};

/// docfidelity - Convert DOCX, PDF and scanned images into layout-faithful HTML
#[derive(Parser)]
#[command(name = "docfidelity")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (JSON) used by every subcommand
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single document to an HTML fragment
    Convert(convert::ConvertArgs),

    /// List or fill `{{ field }}` placeholders in an HTML file
    Fields(fields::FieldsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Route tracing output to stderr so stdout carries only converted documents.
fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let level = [Level::WARN, Level::INFO, Level::DEBUG]
        .get(verbosity as usize)
        .copied()
        .unwrap_or(Level::TRACE);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Convert(args) => convert::run(args, config_path).await,
        Commands::Fields(args) => fields::run(args).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
