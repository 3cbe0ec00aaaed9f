//! Parse command - extract line items from a single receipt file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use iapr_core::ReceiptParser;

use super::{is_message_file, load_config, load_record};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file (raw HTML body or .eml message)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Report the detected brand and strategy on stderr
    #[arg(long)]
    explain: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Parsing receipt: {}", args.input.display());

    let record = load_record(&args.input).await?;
    if is_message_file(&args.input) {
        debug!("Message subject: {:?}", record.subject);
    }

    let parser = ReceiptParser::from_config(&config.extraction);
    let outcome = parser.parse_detailed(&record.body);

    let output = if args.pretty {
        serde_json::to_string_pretty(&outcome.result)?
    } else {
        serde_json::to_string(&outcome.result)?
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.explain {
        eprintln!(
            "{} Brand: {}, items: {}, currency scan: {}, {}µs",
            style("ℹ").blue(),
            outcome.brand,
            outcome.result.items.len(),
            if outcome.used_fallback { "yes" } else { "no" },
            outcome.processing_time_us
        );
    }

    if outcome.result.is_empty() {
        eprintln!(
            "{} Nothing recognized; the receipt template may have changed",
            style("!").yellow()
        );
    }

    Ok(())
}
