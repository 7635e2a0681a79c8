//! Error types for the finscan-core library.

use thiserror::Error;

/// Main error type for the finscan library.
#[derive(Error, Debug)]
pub enum FinscanError {
    /// The document's text could not be extracted.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The document's file extension is not an accepted image or PDF type.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Failure of an external text extractor.
///
/// The display form is the labeled message callers surface to users.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// OCR of an image failed or the OCR engine is unavailable.
    #[error("Failed to extract text from image: {0}")]
    Image(#[source] OcrError),

    /// Reading the text layer of a PDF failed.
    #[error("Failed to extract text from PDF: {0}")]
    Pdf(#[source] PdfError),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to read the PDF file.
    #[error("failed to read PDF: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// No OCR engine is available for this process.
    #[error("OCR engine is not available: {0}")]
    Unavailable(String),

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or unreadable image file.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors raised while turning extracted text into a transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DerivationError {
    /// A monetary-looking substring could not be represented as a decimal.
    #[error("invalid amount: {value}")]
    InvalidAmount { value: String },
}

/// Result type for the finscan library.
pub type Result<T> = std::result::Result<T, FinscanError>;
