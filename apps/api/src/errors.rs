use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractError;
use crate::oracle::OracleError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    #[error("Generation oracle is not configured")]
    OracleUnavailable,

    #[error("Oracle contract violation: {0}")]
    OracleContractViolation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::UnsupportedFormat(ext) => AppError::UnsupportedFormat(ext),
            failure @ ExtractError::ExtractionFailure { .. } => {
                AppError::UnreadableDocument(failure.to_string())
            }
        }
    }
}

impl From<OracleError> for AppError {
    fn from(e: OracleError) -> Self {
        match e {
            OracleError::Unavailable => AppError::OracleUnavailable,
            OracleError::ContractViolation(msg) => AppError::OracleContractViolation(msg),
            OracleError::Llm(e) => AppError::Llm(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFormat(ext) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                format!("Unsupported file type '{ext}'. Allowed: docx, pdf, png, jpg, jpeg"),
            ),
            AppError::UnreadableDocument(msg) => {
                tracing::warn!("Unreadable document: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNREADABLE_DOCUMENT",
                    "Could not read text from the resume file".to_string(),
                )
            }
            AppError::OracleUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "ORACLE_UNAVAILABLE",
                "AI model is not configured. Set ANTHROPIC_API_KEY".to_string(),
            ),
            AppError::OracleContractViolation(msg) => {
                tracing::error!("Oracle contract violation: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "ORACLE_CONTRACT_VIOLATION",
                    "The AI model returned an unusable response".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
