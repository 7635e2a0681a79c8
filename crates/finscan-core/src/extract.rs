//! Document-to-text extraction.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ExtractionError, PdfError};
use crate::models::config::PdfConfig;
use crate::ocr::OcrCapability;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Turns a document on disk into raw text.
pub trait TextExtractor {
    /// OCR the image at `path`.
    fn extract_from_image(&self, path: &Path) -> Result<String, ExtractionError>;

    /// Read the text layer of the PDF at `path`, pages separated by a newline.
    fn extract_from_pdf(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Extractor combining an injected OCR capability with PDF text extraction.
pub struct DocumentTextExtractor {
    ocr: OcrCapability,
    pdf: PdfConfig,
}

impl DocumentTextExtractor {
    pub fn new(ocr: OcrCapability, pdf: PdfConfig) -> Self {
        Self { ocr, pdf }
    }

    /// Extractor that can only read PDFs.
    pub fn pdf_only(pdf: PdfConfig) -> Self {
        Self::new(
            OcrCapability::Unavailable("no OCR engine configured".to_string()),
            pdf,
        )
    }
}

impl TextExtractor for DocumentTextExtractor {
    fn extract_from_image(&self, path: &Path) -> Result<String, ExtractionError> {
        info!("Extracting text from image {}", path.display());

        let result = self.ocr.recognize(path).map_err(ExtractionError::Image)?;
        debug!(
            "OCR produced {} boxes in {}ms",
            result.boxes.len(),
            result.processing_time_ms
        );

        Ok(result.text)
    }

    fn extract_from_pdf(&self, path: &Path) -> Result<String, ExtractionError> {
        info!("Extracting text from PDF {}", path.display());

        let data = std::fs::read(path).map_err(|e| ExtractionError::Pdf(PdfError::Io(e)))?;

        let mut extractor = PdfExtractor::new().with_max_pages(self.pdf.max_pages);
        extractor.load(&data).map_err(ExtractionError::Pdf)?;
        debug!("PDF has {} pages", extractor.page_count());

        extractor.extract_text().map_err(ExtractionError::Pdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use crate::pdf::text_pdf;

    #[test]
    fn test_image_without_ocr_is_labeled_failure() {
        let extractor = DocumentTextExtractor::pdf_only(PdfConfig::default());
        let err = extractor
            .extract_from_image(Path::new("receipt.jpg"))
            .unwrap_err();

        assert!(matches!(err, ExtractionError::Image(OcrError::Unavailable(_))));
        assert!(err
            .to_string()
            .starts_with("Failed to extract text from image: "));
    }

    #[test]
    fn test_missing_pdf_is_labeled_failure() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = DocumentTextExtractor::pdf_only(PdfConfig::default());
        let err = extractor
            .extract_from_pdf(&dir.path().join("missing.pdf"))
            .unwrap_err();

        assert!(matches!(err, ExtractionError::Pdf(PdfError::Io(_))));
        assert!(err.to_string().starts_with("Failed to extract text from PDF: "));
    }

    #[test]
    fn test_corrupt_pdf_is_labeled_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.pdf");
        std::fs::write(&path, b"%PDF-1.4 truncated").unwrap();

        let extractor = DocumentTextExtractor::pdf_only(PdfConfig::default());
        let err = extractor.extract_from_pdf(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[test]
    fn test_pdf_pages_joined_and_capped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.pdf");
        std::fs::write(&path, text_pdf(&["JANUARY", "FEBRUARY"])).unwrap();

        let text = DocumentTextExtractor::pdf_only(PdfConfig::default())
            .extract_from_pdf(&path)
            .unwrap();
        let january = text.find("JANUARY").unwrap();
        let february = text.find("FEBRUARY").unwrap();
        assert!(january < february);
        assert!(text[january..february].contains('\n'));

        let capped = DocumentTextExtractor::pdf_only(PdfConfig { max_pages: 1 })
            .extract_from_pdf(&path)
            .unwrap();
        assert!(capped.contains("JANUARY"));
        assert!(!capped.contains("FEBRUARY"));
    }
}
