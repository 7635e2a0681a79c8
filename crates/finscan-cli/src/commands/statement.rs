//! Statement command - extract every transaction from a bank statement PDF.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use super::output::{emit, format_candidates, OutputFormat};
use super::{build_ingestor, load_config};

/// Arguments for the statement command.
#[derive(Args)]
pub struct StatementArgs {
    /// Statement file (PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// List statement lines that were skipped
    #[arg(long)]
    show_skipped: bool,
}

pub async fn run(args: StatementArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing statement: {}", args.input.display());

    let ingestor = build_ingestor(&config, None, false, None);
    let result = ingestor.ingest_statement(&args.input)?;

    if !result.skipped.is_empty() {
        eprintln!(
            "{} Skipped {} malformed statement lines",
            style("⚠").yellow(),
            result.skipped.len()
        );
        if args.show_skipped {
            for line in &result.skipped {
                eprintln!("  - {:?}: {}", line.reason, line.source);
            }
        }
    }

    emit(
        &format_candidates(&result.candidates, args.format)?,
        args.output.as_deref(),
    )?;

    debug!(
        "Statement processed in {}ms: {} transactions",
        result.processing_time_ms,
        result.candidates.len()
    );

    Ok(())
}
