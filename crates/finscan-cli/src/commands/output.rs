//! Output formatting for transaction candidates.

use std::fs;
use std::path::Path;

use console::style;

use finscan_core::{TransactionCandidate, TransactionType};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text table
    Text,
}

impl OutputFormat {
    /// File extension for files written in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

/// Render candidates in the requested format.
pub fn format_candidates(
    candidates: &[TransactionCandidate],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(candidates)?),
        OutputFormat::Csv => format_csv(candidates),
        OutputFormat::Text => Ok(format_text(candidates)),
    }
}

fn format_csv(candidates: &[TransactionCandidate]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["date", "type", "amount", "category", "description"])?;

    for c in candidates {
        wtr.write_record([
            &c.date.to_string(),
            c.kind.as_str(),
            &c.amount.to_string(),
            c.category.as_str(),
            &c.description,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(candidates: &[TransactionCandidate]) -> String {
    if candidates.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();

    for c in candidates {
        let amount = match c.kind {
            TransactionType::Income => style(format!("+{:>10}", c.amount.to_string())).green(),
            TransactionType::Expense => style(format!("-{:>10}", c.amount.to_string())).red(),
        };
        output.push_str(&format!(
            "{}  {}  {:<13}  {}\n",
            c.date, amount, c.category, c.description
        ));
    }

    output
}

/// Write `content` to `path`, or print it when no path is given.
pub fn emit(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("{} Output written to {}", style("✓").green(), path.display());
        }
        None => println!("{}", content.trim_end()),
    }
    Ok(())
}
