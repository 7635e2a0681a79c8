//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod output;
pub mod parse;
pub mod receipt;
pub mod statement;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, warn};

use finscan_core::models::config::FinscanConfig;
use finscan_core::{DocumentTextExtractor, Ingestor, OcrCapability};

/// Which parser a document goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// One expense per document
    Receipt,
    /// One transaction per statement line
    Statement,
}

/// Load the config named on the command line, else the user config file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FinscanConfig> {
    if let Some(path) = config_path {
        return Ok(FinscanConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(FinscanConfig::from_file(&default_path)?)
    } else {
        Ok(FinscanConfig::default())
    }
}

/// Build an ingestor. OCR models are only loaded when `with_ocr` is set.
pub fn build_ingestor(
    config: &FinscanConfig,
    model_dir: Option<&PathBuf>,
    with_ocr: bool,
    date: Option<NaiveDate>,
) -> Ingestor<DocumentTextExtractor> {
    let extractor = if with_ocr {
        let model_dir = model_dir.unwrap_or(&config.ocr.model_dir);
        let ocr = OcrCapability::load(model_dir, &config.ocr);
        if !ocr.is_available() {
            warn!(
                "OCR is unavailable; images in {} cannot be read",
                model_dir.display()
            );
        }
        DocumentTextExtractor::new(ocr, config.pdf.clone())
    } else {
        DocumentTextExtractor::pdf_only(config.pdf.clone())
    };

    let ingestor = Ingestor::with_config(extractor, &config.extraction);
    match date {
        Some(date) => ingestor.with_reference_date(date),
        None => ingestor,
    }
}
