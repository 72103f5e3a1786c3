//! Fields command - list or fill merge fields in converted HTML.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use docfidelity_core::{find_fields, merge_fields};

/// Arguments for the fields command.
#[derive(Args)]
pub struct FieldsArgs {
    /// HTML file produced by `convert`
    #[arg(required = true)]
    input: PathBuf,

    /// Field value as name=value; may be repeated
    #[arg(long = "set", value_parser = parse_assignment)]
    values: Vec<(String, String)>,

    /// Output file for the merged HTML (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty field name in '{}'", s));
    }
    Ok((name.to_string(), value.to_string()))
}

pub async fn run(args: FieldsArgs) -> anyhow::Result<()> {
    let html = fs::read_to_string(&args.input)?;

    if args.values.is_empty() {
        let names = find_fields(&html);
        if names.is_empty() {
            eprintln!("{} No merge fields found.", style("ℹ").blue());
        }
        for name in names {
            println!("{}", name);
        }
        return Ok(());
    }

    let values: BTreeMap<String, String> = args.values.into_iter().collect();
    let merged = merge_fields(&html, &values);

    if let Some(output_path) = &args.output {
        fs::write(output_path, &merged)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", merged);
    }

    Ok(())
}
