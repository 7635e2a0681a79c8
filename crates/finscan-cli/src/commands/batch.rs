//! Batch processing command for multiple receipts or statements.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use finscan_core::{DocumentKind, DocumentTextExtractor, Ingestor, TransactionCandidate};

use super::output::{emit, format_candidates, OutputFormat};
use super::{build_ingestor, load_config, Mode};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files";

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// How to interpret each document
    #[arg(long, value_enum, default_value = "receipt")]
    mode: Mode,

    /// Output directory (one file per document; default: combined output on stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// OCR model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Date to use when a receipt has none (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    candidates: Vec<TransactionCandidate>,
    warnings: Vec<String>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| match (DocumentKind::from_path(p), args.mode) {
            (Ok(DocumentKind::Pdf), _) => true,
            (Ok(DocumentKind::Image), Mode::Receipt) => true,
            _ => false,
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!("{} Found {} files to process", style("ℹ").blue(), files.len());

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let needs_ocr = files
        .iter()
        .any(|p| matches!(DocumentKind::from_path(p), Ok(DocumentKind::Image)));
    let ingestor = build_ingestor(&config, args.model_dir.as_ref(), needs_ocr, args.date);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template(PROGRESS_TEMPLATE)?.progress_chars("=>-"));

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = process_single_file(&path, &ingestor, args.mode);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok((candidates, warnings)) => results.push(ProcessResult {
                path,
                candidates,
                warnings,
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        candidates: Vec::new(),
                        warnings: Vec::new(),
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    // Write outputs
    match &args.output_dir {
        Some(output_dir) => {
            for result in results.iter().filter(|r| r.error.is_none()) {
                let stem = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("document");
                let output_path =
                    output_dir.join(format!("{}.{}", stem, args.format.extension()));

                fs::write(&output_path, format_candidates(&result.candidates, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
        None => {
            let all: Vec<TransactionCandidate> = results
                .iter()
                .flat_map(|r| r.candidates.iter().cloned())
                .collect();
            emit(&format_candidates(&all, args.format)?, None)?;
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!("{} Summary written to {}", style("✓").green(), summary_path.display());
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let transactions: usize = results.iter().map(|r| r.candidates.len()).sum();

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}: {} transactions",
        style("✓").green(),
        results.len(),
        start.elapsed(),
        transactions
    );
    eprintln!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    ingestor: &Ingestor<DocumentTextExtractor>,
    mode: Mode,
) -> anyhow::Result<(Vec<TransactionCandidate>, Vec<String>)> {
    match mode {
        Mode::Receipt => {
            let result = ingestor.ingest_receipt(path)?;
            Ok((result.candidate.into_iter().collect(), result.warnings))
        }
        Mode::Statement => {
            let result = ingestor.ingest_statement(path)?;
            let warnings = result
                .skipped
                .iter()
                .map(|s| format!("skipped line {:?}", s.source))
                .collect();
            Ok((result.candidates, warnings))
        }
    }
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "transactions",
        "warnings",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let status = if result.error.is_some() { "error" } else { "success" };

        wtr.write_record([
            filename,
            status,
            &result.candidates.len().to_string(),
            &result.warnings.join("; "),
            &result.processing_time_ms.to_string(),
            result.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
