//! Multipart upload parsing, off-thread extraction, and the generated-document store.

use std::collections::HashMap;
use std::path::Path as FsPath;

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{ExtractedText, Extractor, SourceDocument, SourceFormat};
use crate::state::AppState;
use crate::synthesis::{render_docx, ResumeDocument};

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// URL prefix under which persisted documents are served.
pub const DOWNLOAD_PREFIX: &str = "uploads";

// ────────────────────────────────────────────────────────────────────────────
// Multipart form
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct UploadedFile {
    pub field: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct UploadForm {
    text: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl UploadForm {
    /// Trimmed value of a text field; blank counts as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.text
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Removes and returns the first file uploaded under `name`.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|f| f.field == name)?;
        Some(self.files.remove(index))
    }

    /// Removes and returns every file uploaded under `name`, in upload order.
    pub fn take_files(&mut self, name: &str) -> Vec<UploadedFile> {
        let (taken, kept) = std::mem::take(&mut self.files)
            .into_iter()
            .partition(|f| f.field == name);
        self.files = kept;
        taken
    }
}

pub async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read file '{name}': {e}")))?;
                // Browsers send an empty part for an untouched file input.
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.files.push(UploadedFile {
                    field: name,
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read field '{name}': {e}")))?;
                form.text.insert(name, value);
            }
        }
    }

    debug!(
        "Multipart form: {} text field(s), {} file(s)",
        form.text.len(),
        form.files.len()
    );
    Ok(form)
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Extracts text from an uploaded resume on the blocking pool.
/// A document that yields no text is unreadable for every caller of this helper.
pub async fn extract_upload(
    extractor: &Extractor,
    file: UploadedFile,
) -> Result<ExtractedText, AppError> {
    let format = SourceFormat::from_filename(&file.filename)?;
    let extractor = extractor.clone();
    let document = SourceDocument::new(file.bytes, format);

    let text = tokio::task::spawn_blocking(move || extractor.try_extract(&document))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}")))??;

    if text.is_blank() {
        return Err(AppError::UnreadableDocument(format!(
            "'{}' contains no extractable text",
            file.filename
        )));
    }
    info!("Extracted {} chars from '{}'", text.content.len(), file.filename);
    Ok(text)
}

// ────────────────────────────────────────────────────────────────────────────
// Document store
// ────────────────────────────────────────────────────────────────────────────

/// Renders `document` and writes it to `output_dir` under a fresh name.
/// Returns the relative download path (`uploads/<name>`).
pub async fn persist_document(
    output_dir: &FsPath,
    prefix: &str,
    document: ResumeDocument,
) -> Result<String, AppError> {
    let bytes = tokio::task::spawn_blocking(move || render_docx(&document))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in rendering: {e}")))?
        .map_err(anyhow::Error::from)?;

    let filename = format!("{prefix}_{}.docx", Uuid::new_v4().simple());
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("creating {}: {e}", output_dir.display())))?;
    tokio::fs::write(output_dir.join(&filename), &bytes)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("writing {filename}: {e}")))?;

    info!("Wrote {} ({} bytes)", filename, bytes.len());
    Ok(format!("{DOWNLOAD_PREFIX}/{filename}"))
}

/// Only names this service generates are servable: no separators, no leading dot.
fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// GET /uploads/:filename
pub async fn handle_download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !is_safe_filename(&filename) {
        return Err(AppError::NotFound(format!("No document named '{filename}'")));
    }

    let bytes = tokio::fs::read(state.config.output_dir.join(&filename))
        .await
        .map_err(|_| AppError::NotFound(format!("No document named '{filename}'")))?;

    Ok((
        [
            (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}
