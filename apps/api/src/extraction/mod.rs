//! Extraction turns an uploaded resume (docx, pdf, scanned image) into plain text.
//!
//! Every format-specific fault is contained here. `Extractor::extract` never fails:
//! an unreadable document degrades to empty text and a `warn!` log line. Callers that
//! need to tell "blank" from "unreadable" use `Extractor::try_extract` instead.
//! Extraction is CPU-bound; HTTP handlers call it inside `tokio::task::spawn_blocking`.

#![allow(dead_code)]

pub mod docx;
pub mod ocr;
pub mod pdf;

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::extraction::ocr::OcrEngine;

/// Extensions accepted at the upload boundary.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "png", "jpg", "jpeg"];

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Failed to extract text from {format}: {reason}")]
    ExtractionFailure { format: SourceFormat, reason: String },
}

impl ExtractError {
    pub(crate) fn failure(format: SourceFormat, reason: impl Into<String>) -> Self {
        ExtractError::ExtractionFailure {
            format,
            reason: reason.into(),
        }
    }
}

/// Raster formats accepted for OCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    Png,
    Jpeg,
}

/// Declared format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Paragraph-oriented container (.docx).
    StructuredDoc,
    /// Page-oriented container (.pdf).
    PageDoc,
    Image(ImageKind),
}

impl SourceFormat {
    /// Resolves a bare extension (`"pdf"`, `"JPG"`, …).
    pub fn from_extension(ext: &str) -> Result<Self, ExtractError> {
        match ext.to_ascii_lowercase().as_str() {
            "docx" => Ok(SourceFormat::StructuredDoc),
            "pdf" => Ok(SourceFormat::PageDoc),
            "png" => Ok(SourceFormat::Image(ImageKind::Png)),
            "jpg" | "jpeg" => Ok(SourceFormat::Image(ImageKind::Jpeg)),
            other => Err(ExtractError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Resolves the format from the extension of an uploaded filename.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ExtractError::UnsupportedFormat(filename.to_string()))?;
        Self::from_extension(ext)
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::StructuredDoc => write!(f, "docx"),
            SourceFormat::PageDoc => write!(f, "pdf"),
            SourceFormat::Image(ImageKind::Png) => write!(f, "png"),
            SourceFormat::Image(ImageKind::Jpeg) => write!(f, "jpeg"),
        }
    }
}

/// An uploaded document. Consumed by extraction; nothing retains it afterwards.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub bytes: Vec<u8>,
    pub declared_format: SourceFormat,
}

impl SourceDocument {
    pub fn new(bytes: Vec<u8>, declared_format: SourceFormat) -> Self {
        Self {
            bytes,
            declared_format,
        }
    }
}

/// Plain text recovered from a document. Empty content means nothing was recovered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub content: String,
    pub format_origin: SourceFormat,
}

impl ExtractedText {
    pub fn empty(format_origin: SourceFormat) -> Self {
        Self {
            content: String::new(),
            format_origin,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Format-dispatching extractor. Holds the OCR engine used for image uploads.
#[derive(Clone)]
pub struct Extractor {
    ocr: Arc<dyn OcrEngine>,
}

impl Extractor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    /// Extracts text, degrading any decode/OCR fault to empty text.
    pub fn extract(&self, document: &SourceDocument) -> ExtractedText {
        match self.try_extract(document) {
            Ok(text) => text,
            Err(e) => {
                warn!("{e}; returning empty text");
                ExtractedText::empty(document.declared_format)
            }
        }
    }

    /// Extracts text, surfacing `ExtractionFailure` instead of masking it.
    pub fn try_extract(&self, document: &SourceDocument) -> Result<ExtractedText, ExtractError> {
        let format = document.declared_format;
        let content = match format {
            SourceFormat::StructuredDoc => docx::extract_paragraphs(&document.bytes)?,
            SourceFormat::PageDoc => pdf::extract_pages(&document.bytes)?,
            SourceFormat::Image(kind) => ocr::recognize(self.ocr.as_ref(), kind, &document.bytes)?,
        };
        debug!("Extracted {} chars from {format} upload", content.len());
        Ok(ExtractedText {
            content,
            format_origin: format,
        })
    }

    /// Resolves the format from `filename`, then extracts. Only an unknown format fails.
    pub fn extract_named(&self, filename: &str, bytes: Vec<u8>) -> Result<ExtractedText, ExtractError> {
        let format = SourceFormat::from_filename(filename)?;
        Ok(self.extract(&SourceDocument::new(bytes, format)))
    }
}
