//! Page-description (.pdf) text extraction via `pdf-extract`.

use std::panic;

use crate::extraction::{ExtractError, SourceFormat};

/// Returns the text layer of every page, concatenated in page order.
///
/// `pdf-extract` panics on some malformed inputs; the panic is contained here and
/// reported as an extraction failure like any other decode error.
pub fn extract_pages(bytes: &[u8]) -> Result<String, ExtractError> {
    if bytes.is_empty() {
        return Err(ExtractError::failure(SourceFormat::PageDoc, "empty file"));
    }

    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractError::failure(SourceFormat::PageDoc, e.to_string())),
        Err(_) => Err(ExtractError::failure(
            SourceFormat::PageDoc,
            "PDF decoder panicked",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_fails() {
        let err = extract_pages(&[]).unwrap_err();
        assert!(err.to_string().contains("empty file"));
    }

    #[test]
    fn test_garbage_input_fails_without_panicking() {
        assert!(extract_pages(b"this is not a pdf at all").is_err());
    }
}
