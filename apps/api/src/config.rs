use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Without a key the oracle routes answer 503; local scoring still works.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Where synthesized documents are written and served from.
    pub output_dir: PathBuf,
    pub ocr_language: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            anthropic_api_key: var("ANTHROPIC_API_KEY"),
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            output_dir: PathBuf::from(var("OUTPUT_DIR").unwrap_or_else(|| "./uploads".to_string())),
            ocr_language: var("OCR_LANGUAGE").unwrap_or_else(|| "eng".to_string()),
            max_upload_bytes: match var("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got '{v}'"))?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}
