//! Batch command - parse many receipt files into aggregation rows.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use iapr_core::source::since;
use iapr_core::{monthly_summary, process_batch, InboundRecord, KeywordResolver, ReceiptParser};

use super::{load_config, load_record};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (.eml, .html, .htm)
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit monthly totals instead of rows
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers (default: from config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Drop mails that do not look like purchase receipts
    #[arg(long)]
    filter: bool,

    /// Only include mails received on or after this date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "all")]
    since: Option<NaiveDate>,

    /// Include mails of any date
    #[arg(long)]
    all: bool,

    /// Skip files that cannot be loaded instead of aborting
    #[arg(long)]
    continue_on_error: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "eml" | "html" | "htm")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut records = Vec::with_capacity(files.len());
    let mut failed: Vec<(PathBuf, String)> = Vec::new();

    for path in files {
        match load_record(&path).await {
            Ok(record) => records.push(record),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to load {}: {}", path.display(), error_msg);
                    failed.push((path, error_msg));
                } else {
                    error!("Failed to load {}: {}", path.display(), error_msg);
                    anyhow::bail!("Loading failed: {}", error_msg);
                }
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    let window_start = window_start(&args, config.sync.lookback_months);
    let loaded = records.len();
    let records: Vec<InboundRecord> = records
        .into_iter()
        .filter(|r| window_start.is_none_or(|start| r.received_at >= start))
        .filter(|r| !args.filter || r.is_receipt_candidate())
        .collect();

    debug!(
        "{} of {} records kept after date window and receipt filter",
        records.len(),
        loaded
    );

    let jobs = args.jobs.unwrap_or(config.sync.jobs).max(1);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    let parser = ReceiptParser::from_config(&config.extraction);
    let rows = pool.install(|| process_batch(&records, &parser, &KeywordResolver));

    let output = if args.summary {
        let summary = monthly_summary(&rows);
        to_json(&summary, args.pretty)?
    } else {
        to_json(&rows, args.pretty)?
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

    eprintln!(
        "{} Parsed {} receipts into {} rows in {:?}",
        style("✓").green(),
        records.len(),
        rows.len(),
        start.elapsed()
    );

    if !failed.is_empty() {
        eprintln!("{}", style("Failed files:").red());
        for (path, error) in &failed {
            eprintln!("  - {}: {}", path.display(), error);
        }
    }

    Ok(())
}

/// Start of the date window, or `None` when every date is included.
fn window_start(args: &BatchArgs, lookback_months: u32) -> Option<DateTime<Utc>> {
    if args.all {
        return None;
    }
    match args.since {
        Some(date) => date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()),
        None => Some(since(lookback_months, Utc::now())),
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
