//! Image OCR capability.

#[cfg(feature = "ocr")]
mod pure_engine;

#[cfg(feature = "ocr")]
pub use pure_engine::PureOcrEngine;

use std::cmp::Ordering;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// A detected text box with its coordinates and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Detected and recognized text boxes.
    pub boxes: Vec<TextBox>,

    /// Full text (boxes joined with newlines).
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Build a result from unordered boxes, sorting them into reading order.
    pub fn from_boxes(
        mut boxes: Vec<TextBox>,
        image_size: (u32, u32),
        processing_time_ms: u64,
    ) -> Self {
        sort_by_reading_order(&mut boxes);

        let text = boxes
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            boxes,
            text,
            processing_time_ms,
            image_size,
        }
    }
}

/// Sort boxes top-to-bottom in 20px row bands, then left-to-right.
pub fn sort_by_reading_order(boxes: &mut [TextBox]) {
    boxes.sort_by(|a, b| {
        let (ax, ay, _, _) = a.rect();
        let (bx, by, _, _) = b.rect();

        let row_a = (ay / 20.0) as i32;
        let row_b = (by / 20.0) as i32;

        if row_a != row_b {
            row_a.cmp(&row_b)
        } else {
            ax.partial_cmp(&bx).unwrap_or(Ordering::Equal)
        }
    });
}

/// Image OCR as an injected capability.
///
/// `Unavailable` is a permanent state for the lifetime of the value: every
/// recognition call fails with [`OcrError::Unavailable`].
pub enum OcrCapability {
    #[cfg(feature = "ocr")]
    Available(PureOcrEngine),
    Unavailable(String),
}

impl OcrCapability {
    /// Load the OCR engine from `model_dir`, recording why it is unavailable
    /// if the models cannot be loaded.
    pub fn load(model_dir: &Path, config: &OcrConfig) -> Self {
        #[cfg(feature = "ocr")]
        {
            match PureOcrEngine::from_dir(model_dir, config.clone()) {
                Ok(engine) => Self::Available(engine),
                Err(e) => {
                    warn!("OCR engine initialization failed: {}", e);
                    Self::Unavailable(e.to_string())
                }
            }
        }

        #[cfg(not(feature = "ocr"))]
        {
            let _ = (model_dir, config);
            warn!("OCR support was not compiled in");
            Self::Unavailable("built without the `ocr` feature".to_string())
        }
    }

    /// Whether images can be recognized.
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable(_))
    }

    /// Recognize the text of the image at `path`.
    pub fn recognize(&self, path: &Path) -> Result<OcrResult, OcrError> {
        #[cfg(not(feature = "ocr"))]
        let _ = path;

        match self {
            #[cfg(feature = "ocr")]
            Self::Available(engine) => {
                let image = image::open(path)
                    .map_err(|e| OcrError::InvalidImage(format!("{}: {}", path.display(), e)))?;
                engine.process(&image)
            }
            Self::Unavailable(reason) => Err(OcrError::Unavailable(reason.clone())),
        }
    }
}
