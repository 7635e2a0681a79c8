//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::FinscanError;

/// Main configuration for the finscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinscanConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Transaction extraction configuration.
    pub extraction: ExtractionConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens emitted by the recognizer instead of blanking them.
    pub keep_unknown_tokens: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unknown_tokens: false,
        }
    }
}

impl OcrConfig {
    /// Paths of the detection model, recognition model and dictionary.
    pub fn model_files(&self, model_dir: &Path) -> [PathBuf; 3] {
        [
            model_dir.join(&self.detection_model),
            model_dir.join(&self.recognition_model),
            model_dir.join(&self.dictionary),
        ]
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,
}

/// Transaction extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Description attached to every receipt candidate.
    pub receipt_description: String,

    /// Number of characters of statement text kept in the ingestion preview.
    pub statement_preview_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            receipt_description: crate::transaction::RECEIPT_DESCRIPTION.to_string(),
            statement_preview_chars: 1000,
        }
    }
}

impl FinscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, FinscanError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| FinscanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), FinscanError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| FinscanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: FinscanConfig =
            serde_json::from_str(r#"{"pdf": {"max_pages": 3}}"#).unwrap();
        assert_eq!(config.pdf.max_pages, 3);
        assert_eq!(config.extraction.statement_preview_chars, 1000);
        assert_eq!(config.extraction.receipt_description, "From receipt scan");
        assert_eq!(config.ocr.detection_model, "det.onnx");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = FinscanConfig::default();
        config.ocr.model_dir = PathBuf::from("/opt/models");
        config.extraction.statement_preview_chars = 250;
        config.save(&path).unwrap();

        let loaded = FinscanConfig::from_file(&path).unwrap();
        assert_eq!(loaded.ocr.model_dir, PathBuf::from("/opt/models"));
        assert_eq!(loaded.extraction.statement_preview_chars, 250);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FinscanConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, FinscanError::Config(_)));
    }
}
