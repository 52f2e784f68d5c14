//! Axum route handlers for the oracle-backed flows.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ats::handlers::ScoreResponse;
use crate::ats::TARGET_SCORE;
use crate::errors::AppError;
use crate::extraction::SourceFormat;
use crate::oracle::{
    analyze_with_oracle, generate_resume, optimize_resume, GenerationOutcome, GenerationRequest,
    OptimizationRequest, OptimizedResume, OracleAnalysis,
};
use crate::routes::uploads::{extract_upload, persist_document, read_form};
use crate::state::AppState;
use crate::synthesis::{synthesize, BadgeImage};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub extracted_characters: usize,
    pub target_score: u32,
    pub local: ScoreResponse,
    /// Absent when no oracle is configured.
    pub oracle: Option<OracleAnalysis>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerateResponse {
    Success {
        content: String,
        skills: Vec<String>,
        download_path: String,
        skipped_badges: Vec<String>,
    },
    ClarificationNeeded {
        questions: Vec<String>,
    },
}

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub original_resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub recommendations_for_improvement: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    #[serde(flatten)]
    pub optimized: OptimizedResume,
    /// Local rubric applied to the rewritten text, for comparison with the oracle's estimate.
    pub local: ScoreResponse,
    pub download_path: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart: `resume` (docx/pdf/png/jpg/jpeg) and optional `job_description`.
/// Always returns the local rubric score; adds the oracle's analysis when one is configured.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut form = read_form(multipart).await?;
    let resume = form
        .take_file("resume")
        .ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;
    let job_description = form.text("job_description");

    let text = extract_upload(&state.extractor, resume).await?;
    let local = ScoreResponse::for_text(&text.content, job_description);

    let oracle = match state.generator.as_deref() {
        Some(generator) => {
            Some(analyze_with_oracle(generator, &text.content, job_description).await?)
        }
        None => None,
    };

    Ok(Json(AnalyzeResponse {
        extracted_characters: text.content.chars().count(),
        target_score: TARGET_SCORE,
        local,
        oracle,
    }))
}

/// POST /api/v1/generate
///
/// Multipart: `prompt`, optional `job_description`, optional `resume` to draw facts from,
/// and any number of `badges` images placed top-right in the document.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut form = read_form(multipart).await?;
    let prompt = form
        .text("prompt")
        .ok_or_else(|| AppError::Validation("No prompt provided".to_string()))?
        .to_string();
    let job_description = form.text("job_description").map(str::to_string);
    let generator = state.generator()?;

    let resume_text = match form.take_file("resume") {
        Some(file) => Some(extract_upload(&state.extractor, file).await?.content),
        None => None,
    };

    let mut skipped_badges = Vec::new();
    let mut badge_images = Vec::new();
    for file in form.take_files("badges") {
        match SourceFormat::from_filename(&file.filename) {
            Ok(SourceFormat::Image(_)) => badge_images.push(BadgeImage {
                name: file.filename,
                bytes: file.bytes,
            }),
            _ => {
                warn!("Skipping badge '{}': not a png/jpg image", file.filename);
                skipped_badges.push(file.filename);
            }
        }
    }

    let request = GenerationRequest {
        prompt,
        job_description,
        resume_text,
    };
    let resume = match generate_resume(generator, &request).await? {
        GenerationOutcome::Generated(resume) => resume,
        GenerationOutcome::ClarificationNeeded { questions } => {
            return Ok(Json(GenerateResponse::ClarificationNeeded { questions }));
        }
    };

    let marked_text = resume.marked_text.clone();
    let document = tokio::task::spawn_blocking(move || synthesize(&marked_text, &badge_images))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in synthesis: {e}")))?;
    skipped_badges.extend(document.skipped_badges.iter().cloned());

    let download_path = persist_document(&state.config.output_dir, "generated", document).await?;
    info!("Generated resume available at {download_path}");

    Ok(Json(GenerateResponse::Success {
        content: resume.marked_text,
        skills: resume.skills,
        download_path,
        skipped_badges,
    }))
}

/// POST /api/v1/optimize
///
/// Rewrites resume text by applying the analysis recommendations, renders it as .docx.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    if request.original_resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "original_resume_text cannot be empty".to_string(),
        ));
    }
    let generator = state.generator()?;

    let job_description = request
        .job_description
        .filter(|jd| !jd.trim().is_empty());
    let optimized = optimize_resume(
        generator,
        &OptimizationRequest {
            original_resume_text: request.original_resume_text,
            job_description: job_description.clone(),
            recommendations: request.recommendations_for_improvement,
        },
    )
    .await?;

    let local = ScoreResponse::for_text(&optimized.optimized_resume_text, job_description.as_deref());
    let document = synthesize(&optimized.optimized_resume_text, &[]);
    let download_path = persist_document(&state.config.output_dir, "optimized", document).await?;

    Ok(Json(OptimizeResponse {
        optimized,
        local,
        download_path,
    }))
}
