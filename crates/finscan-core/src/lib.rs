//! Core library for personal finance document extraction.
//!
//! This crate provides:
//! - Receipt parsing: one expense per receipt (largest amount, first date, keyword category)
//! - Bank statement parsing: one transaction per `date description amount` line
//! - Text extraction from PDFs (text layer) and images (OCR)
//! - Document ingestion that keeps raw text even when no transaction is derived

pub mod error;
pub mod extract;
pub mod ingest;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod transaction;

pub use error::{DerivationError, ExtractionError, FinscanError, Result};
pub use extract::{DocumentTextExtractor, TextExtractor};
pub use ingest::{DocumentKind, Ingestor, ReceiptIngestion, StatementIngestion};
pub use models::config::FinscanConfig;
pub use models::transaction::{Category, TransactionCandidate, TransactionType};
pub use ocr::{OcrCapability, OcrResult, TextBox};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use transaction::{
    parse_receipt, parse_statement, ReceiptParser, StatementExtraction, StatementParser,
    TransactionParser,
};
