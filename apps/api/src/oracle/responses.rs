//! Oracle response shapes and their normalisation.
//!
//! The oracle answers in one of four JSON shapes depending on the call site, with
//! field names that drift (`ats_score` vs `ats_score_estimation`, `skills` vs
//! `extracted_skills`). `OracleResponse` tries each shape in order and every call site
//! converts it into one canonical type. A shape the call site did not ask for is a
//! contract violation.

use serde::{Deserialize, Serialize};

use crate::oracle::OracleError;

// ────────────────────────────────────────────────────────────────────────────
// Wire shapes
// ────────────────────────────────────────────────────────────────────────────

/// Variant order matters: serde tries them top to bottom.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OracleResponse {
    ClarificationNeeded(ClarificationPayload),
    Generation(GenerationPayload),
    Optimization(OptimizationPayload),
    Analysis(AnalysisPayload),
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClarificationStatus {
    ClarificationNeeded,
}

#[derive(Debug, Deserialize)]
pub struct ClarificationPayload {
    pub status: ClarificationStatus,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerationPayload {
    #[serde(default)]
    pub status: Option<String>,
    pub generated_resume_text: String,
    #[serde(default, alias = "extracted_skills")]
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct OptimizationPayload {
    pub ats_score: f64,
    pub optimized_resume_text: String,
    #[serde(default)]
    pub modifications_made: Vec<String>,
    #[serde(default)]
    pub user_recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisPayload {
    #[serde(alias = "ats_score")]
    pub ats_score_estimation: f64,
    #[serde(default)]
    pub skills_matching_score: f64,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub jd_skills: Vec<String>,
    #[serde(default)]
    pub resume_skills: Vec<String>,
    #[serde(default)]
    pub recommendations_for_improvement: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Canonical types
// ────────────────────────────────────────────────────────────────────────────

/// Oracle-path ATS analysis. Serialized with the field names the web client reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OracleAnalysis {
    pub ats_score_estimation: u32,
    pub skills_matching_score: u32,
    pub feedback: String,
    pub missing_keywords: Vec<String>,
    pub jd_skills: Vec<String>,
    pub resume_skills: Vec<String>,
    pub recommendations_for_improvement: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedResume {
    pub marked_text: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Generated(GeneratedResume),
    ClarificationNeeded { questions: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedResume {
    pub ats_score: u32,
    pub optimized_resume_text: String,
    pub modifications_made: Vec<String>,
    pub user_recommendations: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Normalisation
// ────────────────────────────────────────────────────────────────────────────

impl OracleResponse {
    fn shape(&self) -> &'static str {
        match self {
            OracleResponse::ClarificationNeeded(_) => "clarification_needed",
            OracleResponse::Generation(_) => "generation",
            OracleResponse::Optimization(_) => "optimization",
            OracleResponse::Analysis(_) => "analysis",
        }
    }

    fn unexpected(&self, wanted: &str) -> OracleError {
        OracleError::ContractViolation(format!(
            "expected a {wanted} response, got a {} response",
            self.shape()
        ))
    }

    pub fn into_analysis(self) -> Result<OracleAnalysis, OracleError> {
        match self {
            OracleResponse::Analysis(p) => Ok(OracleAnalysis {
                ats_score_estimation: clamp_score(p.ats_score_estimation),
                skills_matching_score: clamp_score(p.skills_matching_score),
                feedback: p.feedback,
                missing_keywords: p.missing_keywords,
                jd_skills: p.jd_skills,
                resume_skills: p.resume_skills,
                recommendations_for_improvement: p.recommendations_for_improvement,
            }),
            // An optimization reply carries a score too; accept it as a bare analysis.
            OracleResponse::Optimization(p) => Ok(OracleAnalysis {
                ats_score_estimation: clamp_score(p.ats_score),
                skills_matching_score: 0,
                feedback: String::new(),
                missing_keywords: Vec::new(),
                jd_skills: Vec::new(),
                resume_skills: Vec::new(),
                recommendations_for_improvement: p.user_recommendations,
            }),
            other => Err(other.unexpected("analysis")),
        }
    }

    pub fn into_generation(self) -> Result<GenerationOutcome, OracleError> {
        match self {
            OracleResponse::ClarificationNeeded(p) => {
                let mut questions = p.questions;
                if let Some(message) = p.message.filter(|m| !m.trim().is_empty()) {
                    questions.push(message);
                }
                Ok(GenerationOutcome::ClarificationNeeded { questions })
            }
            OracleResponse::Generation(p) => {
                if let Some(status) = p.status.as_deref() {
                    if status != "success" {
                        return Err(OracleError::ContractViolation(format!(
                            "unknown generation status '{status}'"
                        )));
                    }
                }
                Ok(GenerationOutcome::Generated(GeneratedResume {
                    marked_text: p.generated_resume_text,
                    skills: p.skills,
                }))
            }
            other => Err(other.unexpected("generation")),
        }
    }

    pub fn into_optimization(self) -> Result<OptimizedResume, OracleError> {
        match self {
            OracleResponse::Optimization(p) => Ok(OptimizedResume {
                ats_score: clamp_score(p.ats_score),
                optimized_resume_text: p.optimized_resume_text,
                modifications_made: p.modifications_made,
                user_recommendations: p.user_recommendations,
            }),
            other => Err(other.unexpected("optimization")),
        }
    }
}

fn clamp_score(raw: f64) -> u32 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u32
}
