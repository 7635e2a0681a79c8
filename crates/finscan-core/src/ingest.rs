//! Document ingestion: extract text, then derive transaction candidates.
//!
//! Extraction failures are returned to the caller. Derivation failures on a
//! receipt never abort ingestion: they are logged and the raw text is still
//! returned without a candidate.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{FinscanError, Result};
use crate::extract::TextExtractor;
use crate::models::config::ExtractionConfig;
use crate::models::transaction::TransactionCandidate;
use crate::transaction::{ReceiptParser, SkippedLine, StatementParser, TransactionParser};

/// File extensions read with OCR.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff"];

/// Kind of source document, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Image,
    Pdf,
}

impl DocumentKind {
    /// Classify a path by its (case-insensitive) extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if extension == "pdf" {
            Ok(Self::Pdf)
        } else if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Self::Image)
        } else {
            Err(FinscanError::UnsupportedFormat(if extension.is_empty() {
                path.display().to_string()
            } else {
                extension
            }))
        }
    }
}

/// Outcome of ingesting one receipt.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptIngestion {
    /// Document that was read.
    pub source: PathBuf,
    /// How the text was obtained.
    pub kind: DocumentKind,
    /// Full extracted text.
    pub raw_text: String,
    /// Derived transaction, if any.
    pub candidate: Option<TransactionCandidate>,
    /// Problems met while deriving the transaction.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Outcome of ingesting one statement.
#[derive(Debug, Clone, Serialize)]
pub struct StatementIngestion {
    /// Document that was read.
    pub source: PathBuf,
    /// Leading part of the extracted text.
    pub text_preview: String,
    /// One candidate per transaction line, in document order.
    pub candidates: Vec<TransactionCandidate>,
    /// Matched lines that were rejected.
    pub skipped: Vec<SkippedLine>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Drives a [`TextExtractor`] and the transaction parsers.
pub struct Ingestor<E: TextExtractor> {
    extractor: E,
    receipts: ReceiptParser,
    statements: StatementParser,
    preview_chars: usize,
}

impl<E: TextExtractor> Ingestor<E> {
    /// Create an ingestor with default parsers.
    pub fn new(extractor: E) -> Self {
        Self::with_config(extractor, &ExtractionConfig::default())
    }

    /// Create an ingestor configured from `config`.
    pub fn with_config(extractor: E, config: &ExtractionConfig) -> Self {
        Self {
            extractor,
            receipts: ReceiptParser::new().with_description(config.receipt_description.clone()),
            statements: StatementParser::new(),
            preview_chars: config.statement_preview_chars,
        }
    }

    /// Fix the date used for receipts without a usable date.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.receipts = self.receipts.with_reference_date(date);
        self
    }

    /// Extract text from an image or PDF.
    pub fn extract_text(&self, path: &Path) -> Result<(DocumentKind, String)> {
        let kind = DocumentKind::from_path(path)?;
        let text = match kind {
            DocumentKind::Image => self.extractor.extract_from_image(path)?,
            DocumentKind::Pdf => self.extractor.extract_from_pdf(path)?,
        };
        Ok((kind, text))
    }

    /// Ingest a single receipt.
    pub fn ingest_receipt(&self, path: &Path) -> Result<ReceiptIngestion> {
        let start = Instant::now();
        info!("Ingesting receipt {}", path.display());

        let (kind, raw_text) = self.extract_text(path)?;
        let (candidate, warnings) = self.derive_receipt(&raw_text);

        Ok(ReceiptIngestion {
            source: path.to_path_buf(),
            kind,
            raw_text,
            candidate,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Derive a receipt candidate, turning failures into warnings.
    pub fn derive_receipt(&self, text: &str) -> (Option<TransactionCandidate>, Vec<String>) {
        match self.receipts.parse(text) {
            Ok(Some(candidate)) => (Some(candidate), Vec::new()),
            Ok(None) => (None, vec!["No amount found in receipt text".to_string()]),
            Err(e) => {
                warn!("Could not derive a transaction from receipt text: {}", e);
                (None, vec![format!("Could not derive a transaction: {}", e)])
            }
        }
    }

    /// Ingest a bank statement PDF.
    pub fn ingest_statement(&self, path: &Path) -> Result<StatementIngestion> {
        let start = Instant::now();
        info!("Ingesting statement {}", path.display());

        if DocumentKind::from_path(path)? != DocumentKind::Pdf {
            return Err(FinscanError::UnsupportedFormat(format!(
                "statements must be PDF files: {}",
                path.display()
            )));
        }

        let text = self.extractor.extract_from_pdf(path)?;
        let extraction = self.statements.extract(&text);

        Ok(StatementIngestion {
            source: path.to_path_buf(),
            text_preview: preview(&text, self.preview_chars),
            candidates: extraction.candidates,
            skipped: extraction.skipped,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// First `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractionError, OcrError};
    use crate::models::transaction::{Category, TransactionType};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// Extractor serving canned text per file name.
    struct FakeExtractor {
        texts: HashMap<String, String>,
    }

    impl FakeExtractor {
        fn new(texts: &[(&str, &str)]) -> Self {
            Self {
                texts: texts
                    .iter()
                    .map(|(name, text)| (name.to_string(), text.to_string()))
                    .collect(),
            }
        }

        fn lookup(&self, path: &Path) -> Option<String> {
            let name = path.file_name()?.to_str()?;
            self.texts.get(name).cloned()
        }
    }

    impl TextExtractor for FakeExtractor {
        fn extract_from_image(&self, path: &Path) -> std::result::Result<String, ExtractionError> {
            self.lookup(path).ok_or_else(|| {
                ExtractionError::Image(OcrError::InvalidImage(path.display().to_string()))
            })
        }

        fn extract_from_pdf(&self, path: &Path) -> std::result::Result<String, ExtractionError> {
            self.lookup(path).ok_or_else(|| {
                ExtractionError::Pdf(crate::error::PdfError::TextExtraction(
                    path.display().to_string(),
                ))
            })
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    #[test]
    fn test_document_kind_from_path() {
        assert_eq!(DocumentKind::from_path(Path::new("a.PDF")).unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_path(Path::new("a.jpeg")).unwrap(), DocumentKind::Image);
        assert_eq!(DocumentKind::from_path(Path::new("a.Tiff")).unwrap(), DocumentKind::Image);
        assert!(matches!(
            DocumentKind::from_path(Path::new("a.docx")),
            Err(FinscanError::UnsupportedFormat(ext)) if ext == "docx"
        ));
        assert!(DocumentKind::from_path(Path::new("receipt")).is_err());
    }

    #[test]
    fn test_ingest_receipt_image() {
        let ingestor = Ingestor::new(FakeExtractor::new(&[(
            "lunch.png",
            "Sunny Restaurant 02/10/2024 Total $18.40",
        )]))
        .with_reference_date(today());

        let result = ingestor.ingest_receipt(Path::new("lunch.png")).unwrap();
        assert_eq!(result.kind, DocumentKind::Image);

        let candidate = result.candidate.unwrap();
        assert_eq!(candidate.kind, TransactionType::Expense);
        assert_eq!(candidate.category, Category::Food);
        assert_eq!(candidate.date, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_receipt_without_amount_keeps_text() {
        let ingestor = Ingestor::new(FakeExtractor::new(&[("note.pdf", "Thank you for shopping")]));

        let result = ingestor.ingest_receipt(Path::new("note.pdf")).unwrap();
        assert_eq!(result.kind, DocumentKind::Pdf);
        assert_eq!(result.raw_text, "Thank you for shopping");
        assert!(result.candidate.is_none());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_receipt_derivation_failure_keeps_text() {
        let text = format!("Total {}.00", "9".repeat(40));
        let ingestor = Ingestor::new(FakeExtractor::new(&[("big.jpg", &text)]));

        let result = ingestor.ingest_receipt(Path::new("big.jpg")).unwrap();
        assert_eq!(result.raw_text, text);
        assert!(result.candidate.is_none());
        assert!(result.warnings[0].starts_with("Could not derive a transaction"));
    }

    #[test]
    fn test_extraction_failure_propagates() {
        let ingestor = Ingestor::new(FakeExtractor::new(&[]));
        let err = ingestor.ingest_receipt(Path::new("missing.png")).unwrap_err();
        assert!(matches!(err, FinscanError::Extraction(ExtractionError::Image(_))));
    }

    #[test]
    fn test_ingest_statement() {
        let ingestor = Ingestor::new(FakeExtractor::new(&[(
            "jan.pdf",
            "01/15/2024 Starbucks Coffee -5.50\n13/45/2024 Bad Line -10.00\n01/16/2024 Paycheck Deposit 2000.00",
        )]));

        let result = ingestor.ingest_statement(Path::new("jan.pdf")).unwrap();
        assert_eq!(result.candidates.len(), 2);
        assert_eq!(result.skipped.len(), 1);
        assert!(result.text_preview.starts_with("01/15/2024"));
    }

    #[test]
    fn test_statement_must_be_pdf() {
        let ingestor = Ingestor::new(FakeExtractor::new(&[("scan.png", "01/15/2024 A -1.00")]));
        assert!(matches!(
            ingestor.ingest_statement(Path::new("scan.png")),
            Err(FinscanError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_statement_preview_is_truncated() {
        let config = ExtractionConfig {
            statement_preview_chars: 10,
            ..ExtractionConfig::default()
        };
        let ingestor = Ingestor::with_config(
            FakeExtractor::new(&[("feb.pdf", "02/01/2024 Café Central -4.20")]),
            &config,
        );

        let result = ingestor.ingest_statement(Path::new("feb.pdf")).unwrap();
        assert_eq!(result.text_preview, "02/01/2024");
        assert_eq!(result.candidates[0].category, Category::Other);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        assert_eq!(preview("Café", 3), "Caf");
        assert_eq!(preview("Café", 4), "Café");
        assert_eq!(preview("Café", 100), "Café");
        assert_eq!(preview("", 5), "");
    }
}
