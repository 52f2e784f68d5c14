//! Axum route handler for local (oracle-free) scoring.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::ats::{score_breakdown, RubricBreakdown, ScoreReport};
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub report: ScoreReport,
    pub breakdown: RubricBreakdown,
}

impl ScoreResponse {
    pub fn for_text(resume_text: &str, job_description: Option<&str>) -> Self {
        let breakdown = score_breakdown(resume_text, job_description);
        ScoreResponse {
            report: breakdown.clone().into(),
            breakdown,
        }
    }
}

/// POST /api/v1/score
///
/// Scores pasted resume text against an optional job description with the local rubric.
pub async fn handle_score(
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    Ok(Json(ScoreResponse::for_text(
        &request.resume_text,
        request.job_description.as_deref(),
    )))
}
