//! Receipt command - extract the expense from a single receipt.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::{debug, info};

use finscan_core::DocumentKind;

use super::output::{emit, format_candidates, OutputFormat};
use super::{build_ingestor, load_config};

/// Arguments for the receipt command.
#[derive(Args)]
pub struct ReceiptArgs {
    /// Receipt file (image or PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// OCR model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Date to use when the receipt has none (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Also print the extracted text
    #[arg(long)]
    show_text: bool,
}

pub async fn run(args: ReceiptArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let kind = DocumentKind::from_path(&args.input)?;
    info!("Processing receipt: {} ({:?})", args.input.display(), kind);

    let ingestor = build_ingestor(
        &config,
        args.model_dir.as_ref(),
        kind == DocumentKind::Image,
        args.date,
    );
    let result = ingestor.ingest_receipt(&args.input)?;

    if args.show_text {
        eprintln!("{}", style("Extracted text:").blue());
        eprintln!("{}", result.raw_text);
        eprintln!();
    }

    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let candidates: Vec<_> = result.candidate.into_iter().collect();
    emit(&format_candidates(&candidates, args.format)?, args.output.as_deref())?;

    debug!("Receipt processed in {}ms", result.processing_time_ms);

    Ok(())
}
