//! Orchestration of the three oracle calls.
//!
//! Each call builds its prompt, asks the injected `TextGenerator` for one JSON object,
//! and normalises the reply. Contract violations surface to the caller unchanged.

use tracing::{debug, info};

use crate::llm_client::{generate_json, prompts::JSON_ONLY_SYSTEM, TextGenerator};
use crate::oracle::prompts::{analysis_prompt, generation_prompt, optimization_prompt};
use crate::oracle::responses::{
    GenerationOutcome, OracleAnalysis, OracleResponse, OptimizedResume,
};
use crate::oracle::OracleError;

#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub prompt: String,
    pub job_description: Option<String>,
    /// Text of an uploaded resume to draw facts from.
    pub resume_text: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct OptimizationRequest {
    pub original_resume_text: String,
    pub job_description: Option<String>,
    pub recommendations: Vec<String>,
}

async fn ask(generator: &dyn TextGenerator, prompt: &str) -> Result<OracleResponse, OracleError> {
    debug!("Oracle prompt: {} chars", prompt.len());
    Ok(generate_json::<OracleResponse>(generator, prompt, JSON_ONLY_SYSTEM).await?)
}

pub async fn analyze_with_oracle(
    generator: &dyn TextGenerator,
    resume_text: &str,
    job_description: Option<&str>,
) -> Result<OracleAnalysis, OracleError> {
    let prompt = analysis_prompt(resume_text, job_description);
    let analysis = ask(generator, &prompt).await?.into_analysis()?;
    info!(
        "Oracle analysis: ats_score_estimation={}, missing_keywords={}",
        analysis.ats_score_estimation,
        analysis.missing_keywords.len()
    );
    Ok(analysis)
}

pub async fn generate_resume(
    generator: &dyn TextGenerator,
    request: &GenerationRequest,
) -> Result<GenerationOutcome, OracleError> {
    let prompt = generation_prompt(
        &request.prompt,
        request.job_description.as_deref(),
        request.resume_text.as_deref(),
    );
    let outcome = ask(generator, &prompt).await?.into_generation()?;
    match &outcome {
        GenerationOutcome::Generated(resume) => info!(
            "Oracle generated resume: {} lines, {} skills",
            resume.marked_text.lines().count(),
            resume.skills.len()
        ),
        GenerationOutcome::ClarificationNeeded { questions } => {
            info!("Oracle asked {} clarification question(s)", questions.len())
        }
    }
    Ok(outcome)
}

pub async fn optimize_resume(
    generator: &dyn TextGenerator,
    request: &OptimizationRequest,
) -> Result<OptimizedResume, OracleError> {
    let prompt = optimization_prompt(
        &request.original_resume_text,
        request.job_description.as_deref(),
        &request.recommendations,
    );
    let optimized = ask(generator, &prompt).await?.into_optimization()?;
    info!(
        "Oracle optimized resume: ats_score={}, modifications={}",
        optimized.ats_score,
        optimized.modifications_made.len()
    );
    Ok(optimized)
}
