// Prompt builders for the three oracle calls. Each names its exact JSON output schema.

use crate::llm_client::prompts::{ats_rubric_instruction, MARKER_INSTRUCTION};

const NO_JOB_DESCRIPTION: &str = "(none provided; judge general ATS readiness)";

pub fn analysis_prompt(resume_text: &str, job_description: Option<&str>) -> String {
    let jd = job_description.unwrap_or(NO_JOB_DESCRIPTION);
    let rubric = ats_rubric_instruction();
    format!(
        r#"You are an expert ATS (Applicant Tracking System) analyst. Analyse the resume
against the job description and estimate how well an ATS would rank it (0-100).

{rubric}

### RESUME:
{resume_text}

### JOB DESCRIPTION:
{jd}

### REQUIRED JSON OUTPUT SCHEMA:
{{
  "ats_score_estimation": <integer 0-100>,
  "skills_matching_score": <integer 0-100>,
  "feedback": "<string>",
  "missing_keywords": ["<string>", ...],
  "jd_skills": ["<string>", ...],
  "resume_skills": ["<string>", ...],
  "recommendations_for_improvement": ["<string>", ...]
}}"#
    )
}

pub fn generation_prompt(
    user_request: &str,
    job_description: Option<&str>,
    resume_text: Option<&str>,
) -> String {
    let mut context = String::new();
    if let Some(jd) = job_description {
        context.push_str(&format!("\n### TARGET JOB DESCRIPTION:\n{jd}\n"));
    }
    if let Some(resume) = resume_text {
        context.push_str(&format!("\n### EXISTING RESUME (source of facts):\n{resume}\n"));
    }

    let rubric = ats_rubric_instruction();
    format!(
        r#"You are a professional resume writer. Generate a complete, well-structured,
ATS-friendly resume based on the user's request.

### USER REQUEST:
{user_request}
{context}
### TASK:
1. Create a full resume with the standard sections: contact information, Summary,
   Skills, Experience, Education, and Projects (if applicable).
2. Extract a list of 5-10 key skills mentioned or implied in the generated resume.
3. If the request is too vague to write a credible resume (no role, no experience,
   no background), do NOT invent one. Ask for what is missing instead.

{MARKER_INSTRUCTION}

{rubric}

### REQUIRED JSON OUTPUT SCHEMA (success):
{{
  "status": "success",
  "generated_resume_text": "<marker-tagged string>",
  "skills": ["<string>", ...]
}}

### REQUIRED JSON OUTPUT SCHEMA (more information needed):
{{
  "status": "clarification_needed",
  "questions": ["<string>", ...]
}}"#
    )
}

pub fn optimization_prompt(
    resume_text: &str,
    job_description: Option<&str>,
    recommendations: &[String],
) -> String {
    let jd = job_description.unwrap_or(NO_JOB_DESCRIPTION);
    let recommendations = if recommendations.is_empty() {
        "- (none; apply general ATS best practice)".to_string()
    } else {
        recommendations
            .iter()
            .map(|r| format!("- {r}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let rubric = ats_rubric_instruction();
    format!(
        r#"You are an expert ATS Optimization agent. Rewrite the resume to maximise its ATS
score against the job description, aiming for 85 or above (out of 100). Keep every
fact from the original; do not invent employers, dates, degrees or metrics.

{rubric}

### ORIGINAL RESUME:
{resume_text}

### JOB DESCRIPTION:
{jd}

### RECOMMENDATIONS TO APPLY:
{recommendations}

{MARKER_INSTRUCTION}

### REQUIRED JSON OUTPUT SCHEMA:
{{
  "ats_score": <integer 0-100>,
  "optimized_resume_text": "<marker-tagged string>",
  "modifications_made": ["<string>", ...],
  "user_recommendations": ["<string>", ...]
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_embeds_inputs() {
        let prompt = analysis_prompt("RESUME BODY", Some("JD BODY"));
        assert!(prompt.contains("RESUME BODY"));
        assert!(prompt.contains("JD BODY"));
        assert!(prompt.contains("\"ats_score_estimation\""));
    }

    #[test]
    fn test_analysis_prompt_without_jd() {
        assert!(analysis_prompt("r", None).contains(NO_JOB_DESCRIPTION));
    }

    #[test]
    fn test_generation_prompt_mentions_markers_and_clarification() {
        let prompt = generation_prompt("senior rust engineer", None, None);
        assert!(prompt.contains("[BULLET]"));
        assert!(prompt.contains("clarification_needed"));
        assert!(!prompt.contains("EXISTING RESUME"));
    }

    #[test]
    fn test_generation_prompt_includes_optional_context() {
        let prompt = generation_prompt("tailor it", Some("Rust role"), Some("Jane Doe, 5y Go"));
        assert!(prompt.contains("Rust role"));
        assert!(prompt.contains("Jane Doe, 5y Go"));
    }

    #[test]
    fn test_optimization_prompt_lists_recommendations() {
        let prompt = optimization_prompt(
            "resume",
            Some("jd"),
            &["Add metrics".to_string(), "Add a Skills section".to_string()],
        );
        assert!(prompt.contains("- Add metrics\n- Add a Skills section"));
        assert!(prompt.contains("\"optimized_resume_text\""));
    }
}
