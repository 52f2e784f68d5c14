//! Image OCR. The raster is passed to the engine exactly as uploaded: full embedded
//! resolution, no deskew, no binarization.

use std::io::Cursor;
use std::sync::Arc;

use image::{ImageFormat, ImageReader};
use thiserror::Error;
use tracing::debug;

use crate::extraction::{ExtractError, ImageKind, SourceFormat};

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR backend unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to initialize OCR engine: {0}")]
    Init(String),

    #[error("OCR recognition failed: {0}")]
    Recognition(String),
}

/// A synchronous OCR backend. Receives encoded image bytes (png/jpeg).
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError>;

    fn name(&self) -> &'static str;
}

/// Validates the raster with `image`, then hands the original bytes to `engine`.
pub fn recognize(engine: &dyn OcrEngine, kind: ImageKind, bytes: &[u8]) -> Result<String, ExtractError> {
    let format = SourceFormat::Image(kind);
    let fail = |reason: String| ExtractError::failure(format, reason);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| fail(format!("unreadable image: {e}")))?;

    let detected = reader
        .format()
        .ok_or_else(|| fail("unrecognized image data".to_string()))?;
    if !matches_kind(detected, kind) {
        debug!("Declared {format} upload decodes as {detected:?}");
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| fail(format!("undecodable image: {e}")))?;
    if width == 0 || height == 0 {
        return Err(fail(format!("image has no pixels ({width}x{height})")));
    }

    debug!("Running {} OCR on {width}x{height} image", engine.name());
    engine.recognize(bytes).map_err(|e| fail(e.to_string()))
}

fn matches_kind(detected: ImageFormat, kind: ImageKind) -> bool {
    matches!(
        (detected, kind),
        (ImageFormat::Png, ImageKind::Png) | (ImageFormat::Jpeg, ImageKind::Jpeg)
    )
}

/// Placeholder engine used when the binary is built without the `tesseract` feature.
pub struct UnavailableOcr;

impl OcrEngine for UnavailableOcr {
    fn recognize(&self, _image: &[u8]) -> Result<String, OcrError> {
        Err(OcrError::Unavailable(
            "rebuild with `--features tesseract` to read scanned resumes".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

/// Tesseract via leptonica. A fresh `LepTess` is created per call; it is not `Sync`.
#[cfg(feature = "tesseract")]
pub struct TesseractOcr {
    language: String,
}

#[cfg(feature = "tesseract")]
impl TesseractOcr {
    pub fn new(language: &str) -> Result<Self, OcrError> {
        // Probe once so a missing language pack fails at startup, not per request.
        leptess::LepTess::new(None, language).map_err(|e| {
            OcrError::Init(format!(
                "language '{language}': {e}. Make sure tesseract language data is installed"
            ))
        })?;
        Ok(Self {
            language: language.to_string(),
        })
    }
}

#[cfg(feature = "tesseract")]
impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        let mut lt = leptess::LepTess::new(None, &self.language)
            .map_err(|e| OcrError::Init(e.to_string()))?;
        lt.set_image_from_mem(image)
            .map_err(|e| OcrError::Recognition(e.to_string()))?;
        lt.get_utf8_text()
            .map_err(|e| OcrError::Recognition(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "tesseract"
    }
}

/// Builds the OCR engine for this build: Tesseract when compiled in, otherwise a
/// placeholder that makes image uploads degrade to empty text.
pub fn default_engine(language: &str) -> Result<Arc<dyn OcrEngine>, OcrError> {
    #[cfg(feature = "tesseract")]
    {
        Ok(Arc::new(TesseractOcr::new(language)?))
    }
    #[cfg(not(feature = "tesseract"))]
    {
        tracing::warn!("Built without the `tesseract` feature; OCR for '{language}' is disabled");
        Ok(Arc::new(UnavailableOcr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::test_support::RecordingOcr;
    use image::{Rgb, RgbImage};

    fn encode(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_engine_receives_original_bytes() {
        let engine = RecordingOcr::returning("Jane Doe\nExperience");
        let png = encode(ImageFormat::Png, 40, 20);

        let text = recognize(&engine, ImageKind::Png, &png).unwrap();

        assert_eq!(text, "Jane Doe\nExperience");
        let seen = engine.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], png, "image must reach OCR unmodified");
    }

    #[test]
    fn test_jpeg_declared_png_still_recognized() {
        let engine = RecordingOcr::returning("text");
        let jpeg = encode(ImageFormat::Jpeg, 8, 8);
        assert_eq!(recognize(&engine, ImageKind::Png, &jpeg).unwrap(), "text");
    }

    #[test]
    fn test_empty_image_fails_before_engine() {
        let engine = RecordingOcr::returning("never");
        assert!(recognize(&engine, ImageKind::Jpeg, &[]).is_err());
        assert!(engine.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unavailable_engine_reports_failure() {
        let png = encode(ImageFormat::Png, 4, 4);
        let err = recognize(&UnavailableOcr, ImageKind::Png, &png).unwrap_err();
        assert!(err.to_string().contains("OCR backend unavailable"));
    }
}
