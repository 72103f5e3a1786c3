//! Convert command - turn one document into an HTML fragment.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use docfidelity_core::{DocumentConverter, SourceKind, default_backend};

use super::config::load_config;

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input file (.docx, .pdf, .png, .jpg, .jpeg, .gif)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Declared file name used for routing (default: the input's name)
    #[arg(long)]
    name: Option<String>,

    /// Wrap the HTML in a JSON object
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ConvertOutput<'a> {
    source: &'a str,
    kind: &'static str,
    html: &'a str,
}

pub async fn run(args: ConvertArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let declared_name = match &args.name {
        Some(name) => name.clone(),
        None => args
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let data = fs::read(&args.input)?;
    info!("Read {} bytes from {}", data.len(), args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(format!("Converting {}...", declared_name));

    let backend = default_backend(&config.ocr);
    let converter = DocumentConverter::new(config, backend);
    let result = converter.convert(&data, &declared_name);
    pb.finish_and_clear();

    let html = match result {
        Ok(html) => html,
        Err(err) => {
            eprintln!("{}", serde_json::to_string_pretty(&err.payload())?);
            anyhow::bail!("Conversion of {} failed", args.input.display());
        }
    };
    debug!("Converted in {}ms", start.elapsed().as_millis());

    let output = if args.json {
        // Routing succeeded above, so the kind is known
        let kind = SourceKind::from_name(&declared_name)?;
        serde_json::to_string_pretty(&ConvertOutput {
            source: &declared_name,
            kind: kind.label(),
            html: &html,
        })?
    } else {
        html
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {} ({}ms)",
            style("✓").green(),
            output_path.display(),
            start.elapsed().as_millis()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
