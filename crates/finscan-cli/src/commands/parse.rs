//! Parse command - run the transaction parsers over already-extracted text.

use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::warn;

use finscan_core::{ReceiptParser, StatementParser, TransactionCandidate, TransactionParser};

use super::output::{emit, format_candidates, OutputFormat};
use super::{load_config, Mode};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Text file to parse (`-` reads stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// How to interpret the text
    #[arg(long, value_enum, default_value = "receipt")]
    mode: Mode,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Date to use when a receipt has none (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        std::fs::read_to_string(&args.input)?
    };

    let candidates: Vec<TransactionCandidate> = match args.mode {
        Mode::Receipt => {
            let mut parser =
                ReceiptParser::new().with_description(config.extraction.receipt_description);
            if let Some(date) = args.date {
                parser = parser.with_reference_date(date);
            }

            match parser.parse(&text) {
                Ok(candidate) => candidate.into_iter().collect(),
                Err(e) => {
                    warn!("Could not derive a transaction from receipt text: {}", e);
                    eprintln!("{} Could not derive a transaction: {}", style("⚠").yellow(), e);
                    Vec::new()
                }
            }
        }
        Mode::Statement => StatementParser::new().extract(&text).candidates,
    };

    emit(&format_candidates(&candidates, args.format)?, args.output.as_deref())
}
