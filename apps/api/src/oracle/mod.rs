// Generation oracle: prompts, response normalisation, orchestration and HTTP handlers.
// The oracle is an injected `TextGenerator`; nothing here knows which provider backs it.

pub mod handlers;
pub mod prompts;
pub mod responses;
pub mod service;

use thiserror::Error;

use crate::llm_client::LlmError;

pub use responses::{GenerationOutcome, OptimizedResume, OracleAnalysis};
pub use service::{
    analyze_with_oracle, generate_resume, optimize_resume, GenerationRequest, OptimizationRequest,
};

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("no generation oracle is configured")]
    Unavailable,

    /// Non-JSON or schema-incompatible output. Terminal for the request; never retried.
    #[error("oracle contract violation: {0}")]
    ContractViolation(String),

    #[error(transparent)]
    Llm(LlmError),
}

impl From<LlmError> for OracleError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingJson => {
                OracleError::ContractViolation("no JSON object in the response".to_string())
            }
            LlmError::Parse(e) => OracleError::ContractViolation(e.to_string()),
            other => OracleError::Llm(other),
        }
    }
}
