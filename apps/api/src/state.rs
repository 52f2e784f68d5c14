use std::sync::Arc;

use crate::config::Config;
use crate::extraction::Extractor;
use crate::llm_client::TextGenerator;
use crate::oracle::OracleError;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: Extractor,
    /// Generation oracle. `None` when no credential was configured.
    pub generator: Option<Arc<dyn TextGenerator>>,
}

impl AppState {
    pub fn generator(&self) -> Result<&dyn TextGenerator, OracleError> {
        self.generator.as_deref().ok_or(OracleError::Unavailable)
    }
}
