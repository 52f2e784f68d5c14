//! ATS Scorer: fixed four-stage rubric over resume text and an optional job description.
//!
//! Purely local: no oracle call, deterministic, usable standalone.
//!
//! Rubric (evaluated in this order, one suggestion per stage):
//! 1. Section coverage   0–20  (≥4 canonical sections → 20, else 4 per section)
//! 2. Keyword overlap    0–40  (>70% of JD nouns matched → 40, else floor(0.4 × match%));
//!                              flat 10 when no job description is supplied
//! 3. Action verbs       0–20  (≥5 distinct verbs → 20, else 4 per verb)
//! 4. Quantified impact  0–20  (≥3 numeric/%/currency tokens → 20, else 5 per token)
//!
//! Total is clamped to 100. Below `TARGET_SCORE` a closing suggestion urges revision.

use serde::{Deserialize, Serialize};

use crate::ats::keywords::keywords;
use crate::ats::tagger::{like_num, tokenize};

/// Score the system steers every resume towards.
pub const TARGET_SCORE: u32 = 85;

pub const SECTION_NAMES: &[&str] = &[
    "experience",
    "education",
    "skills",
    "summary",
    "objective",
    "contact",
];

pub const ACTION_VERBS: &[&str] = &[
    "managed",
    "led",
    "developed",
    "created",
    "implemented",
    "achieved",
    "increased",
    "reduced",
];

const METRIC_SYMBOLS: &[&str] = &["%", "$", "€", "£"];

const SECTION_MAX: u32 = 20;
const KEYWORD_MAX: u32 = 40;
const KEYWORD_BASELINE: u32 = 10;
const VERB_MAX: u32 = 20;
const METRIC_MAX: u32 = 20;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Result of one scoring pass. Suggestions are in rubric order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: u32, // 0 – 100
    pub suggestions: Vec<String>,
}

/// Keyword-overlap detail; absent when no job description was supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordOverlap {
    pub matched: usize,
    pub total: usize,
    pub match_percentage: f64,
    /// JD keywords absent from the resume, sorted.
    pub missing: Vec<String>,
}

/// Per-stage points behind a `ScoreReport`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricBreakdown {
    pub section_points: u32,
    pub sections_found: usize,
    pub keyword_points: u32,
    pub keyword_overlap: Option<KeywordOverlap>,
    pub action_verb_points: u32,
    pub action_verbs_found: usize,
    pub metric_points: u32,
    pub metrics_found: usize,
    pub total: u32,
    pub suggestions: Vec<String>,
}

impl From<RubricBreakdown> for ScoreReport {
    fn from(breakdown: RubricBreakdown) -> Self {
        ScoreReport {
            score: breakdown.total,
            suggestions: breakdown.suggestions,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rubric
// ────────────────────────────────────────────────────────────────────────────

/// Scores `resume_text`, optionally against `job_description`.
pub fn score(resume_text: &str, job_description: Option<&str>) -> ScoreReport {
    score_breakdown(resume_text, job_description).into()
}

/// Runs the rubric and keeps the per-stage detail.
///
/// A job description that is empty or whitespace-only counts as absent.
pub fn score_breakdown(resume_text: &str, job_description: Option<&str>) -> RubricBreakdown {
    let resume_lower = resume_text.to_lowercase();
    let mut suggestions = Vec::with_capacity(5);

    // Stage 1: section coverage
    let sections_found = count_present(&resume_lower, SECTION_NAMES);
    let section_points = if sections_found >= 4 {
        suggestions.push(
            "Good: Your resume includes standard sections like Experience, Education, and Skills."
                .to_string(),
        );
        SECTION_MAX
    } else {
        suggestions.push(
            "Improvement: Add missing standard sections (e.g., Summary, Skills, Experience) for better organization."
                .to_string(),
        );
        4 * sections_found as u32
    };

    // Stage 2: keyword overlap
    let job_description = job_description.filter(|jd| !jd.trim().is_empty());
    let (keyword_points, keyword_overlap) = match job_description {
        Some(jd) => {
            let overlap = compute_overlap(&resume_lower, jd);
            let points = if overlap.match_percentage > 70.0 {
                KEYWORD_MAX
            } else {
                // truncation, not rounding
                (0.40 * overlap.match_percentage) as u32
            };
            let mut suggestion = format!(
                "Keyword Match: You've matched {} of {} important keywords from the job description.",
                overlap.matched, overlap.total
            );
            if overlap.match_percentage < 50.0 {
                suggestion.push_str(
                    " Tailor your resume by including more keywords from the job description, especially in your experience section.",
                );
            }
            suggestions.push(suggestion);
            (points, Some(overlap))
        }
        None => {
            suggestions.push(
                "Tip: Paste a job description for a more detailed analysis and a higher potential score."
                    .to_string(),
            );
            (KEYWORD_BASELINE, None)
        }
    };

    // Stage 3: action verbs
    let action_verbs_found = count_present(&resume_lower, ACTION_VERBS);
    let action_verb_points = if action_verbs_found >= 5 {
        suggestions.push(
            "Good: You use strong action verbs to describe your accomplishments.".to_string(),
        );
        VERB_MAX
    } else {
        suggestions.push(
            "Improvement: Start your bullet points with powerful action verbs like 'Managed', 'Developed', or 'Achieved'."
                .to_string(),
        );
        4 * action_verbs_found as u32
    };

    // Stage 4: quantified impact
    let metrics_found = count_metrics(resume_text);
    let metric_points = if metrics_found >= 3 {
        suggestions.push(
            "Good: You've included measurable results and metrics (e.g., numbers, percentages)."
                .to_string(),
        );
        METRIC_MAX
    } else {
        suggestions.push(
            "Improvement: Quantify your achievements. Instead of 'Increased sales', try 'Increased sales by 20% in 6 months'."
                .to_string(),
        );
        5 * metrics_found as u32
    };

    let total = (section_points + keyword_points + action_verb_points + metric_points).min(100);

    if total < TARGET_SCORE {
        suggestions.push(format!(
            "Your score is {total}. Aim for {TARGET_SCORE}+ by implementing the suggestions above."
        ));
    }

    RubricBreakdown {
        section_points,
        sections_found,
        keyword_points,
        keyword_overlap,
        action_verb_points,
        action_verbs_found,
        metric_points,
        metrics_found,
        total,
        suggestions,
    }
}

/// Number of `terms` occurring as substrings of `haystack`; each term counts once.
fn count_present(haystack: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|term| haystack.contains(*term)).count()
}

fn count_metrics(text: &str) -> usize {
    tokenize(text)
        .into_iter()
        .filter(|token| like_num(token) || METRIC_SYMBOLS.contains(token))
        .count()
}

fn compute_overlap(resume_lower: &str, job_description: &str) -> KeywordOverlap {
    let jd_keywords = keywords(&job_description.to_lowercase());
    let resume_keywords = keywords(resume_lower);

    let matched = jd_keywords.intersection(&resume_keywords).count();
    let total = jd_keywords.len();
    let match_percentage = if total > 0 {
        (matched as f64 / total as f64) * 100.0
    } else {
        0.0
    };
    let missing = jd_keywords
        .difference(&resume_keywords)
        .cloned()
        .collect();

    KeywordOverlap {
        matched,
        total,
        match_percentage,
        missing,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const STRONG_RESUME: &str = r#"
        Jane Doe | Contact: jane@example.com
        Summary
        Backend engineer with 8 years of Python and SQL experience.
        Experience
        - Managed a team of 6 engineers and led the data platform migration.
        - Developed and implemented a Docker-based CI pipeline, reduced deploy time by 40%.
        - Created dashboards that increased revenue by $2,000,000.
        Education
        BSc Computer Science, 2014
        Skills
        Python, SQL, Docker, Kubernetes
    "#;

    #[test]
    fn test_four_literal_headings_score_full_section_points() {
        let b = score_breakdown("Summary\nExperience\nEducation\nSkills", None);
        assert_eq!(b.sections_found, 4);
        assert_eq!(b.section_points, 20);
    }

    #[test]
    fn test_partial_sections_score_four_each() {
        let b = score_breakdown("Education and Skills", None);
        assert_eq!(b.sections_found, 2);
        assert_eq!(b.section_points, 8);
    }

    #[test]
    fn test_section_match_is_case_insensitive_substring() {
        let b = score_breakdown("WORK EXPERIENCES", None);
        assert_eq!(b.sections_found, 1);
    }

    #[test]
    fn test_keyword_overlap_two_of_three() {
        let b = score_breakdown("Python SQL", Some("Python SQL Docker"));
        let overlap = b.keyword_overlap.unwrap();
        assert_eq!(overlap.matched, 2);
        assert_eq!(overlap.total, 3);
        assert!((overlap.match_percentage - 66.666).abs() < 0.01);
        assert_eq!(overlap.missing, vec!["docker".to_string()]);
        assert_eq!(b.keyword_points, 26);
    }

    #[test]
    fn test_keyword_overlap_of_exactly_seventy_percent_is_prorated() {
        let jd = "Python SQL Docker Kubernetes Rust Terraform Postgres Kafka Redis Linux";
        let b = score_breakdown("Python SQL Docker Kubernetes Rust Terraform Postgres", Some(jd));
        let overlap = b.keyword_overlap.unwrap();
        assert_eq!(overlap.matched, 7);
        assert_eq!(overlap.total, 10);
        assert_eq!(overlap.match_percentage, 70.0);
        assert_eq!(b.keyword_points, 28);
    }

    #[test]
    fn test_keyword_overlap_above_seventy_percent_is_full() {
        let b = score_breakdown("python sql docker kafka", Some("Python SQL Docker Kafka"));
        assert_eq!(b.keyword_points, 40);
    }

    #[test]
    fn test_keyword_suggestion_reports_counts() {
        let report = score("Python SQL", Some("Python SQL Docker"));
        assert!(report.suggestions[1].contains("matched 2 of 3"));
    }

    #[test]
    fn test_low_keyword_match_urges_tailoring_in_same_suggestion() {
        let report = score("Python", Some("Python SQL Docker Kafka"));
        assert!(report.suggestions[1].contains("matched 1 of 4"));
        assert!(report.suggestions[1].contains("Tailor your resume"));
    }

    #[test]
    fn test_job_description_without_nouns_scores_zero_overlap() {
        let b = score_breakdown("Python", Some("the and of"));
        let overlap = b.keyword_overlap.unwrap();
        assert_eq!(overlap.total, 0);
        assert_eq!(overlap.match_percentage, 0.0);
        assert_eq!(b.keyword_points, 0);
    }

    #[test]
    fn test_missing_job_description_gives_baseline() {
        let b = score_breakdown("Python", None);
        assert_eq!(b.keyword_points, 10);
        assert!(b.keyword_overlap.is_none());
        assert!(b.suggestions[1].starts_with("Tip:"));
    }

    #[test]
    fn test_blank_job_description_is_treated_as_missing() {
        let b = score_breakdown("Python", Some("   "));
        assert_eq!(b.keyword_points, 10);
    }

    #[test]
    fn test_five_action_verbs_score_full() {
        let b = score_breakdown("managed, led, developed, created, implemented", None);
        assert_eq!(b.action_verbs_found, 5);
        assert_eq!(b.action_verb_points, 20);
    }

    #[test]
    fn test_action_verbs_counted_once_each() {
        let b = score_breakdown("Managed X. Managed Y. Managed Z.", None);
        assert_eq!(b.action_verbs_found, 1);
        assert_eq!(b.action_verb_points, 4);
    }

    #[test]
    fn test_metrics_count_numbers_and_symbols() {
        let b = score_breakdown("grew 20%", None);
        assert_eq!(b.metrics_found, 2);
        assert_eq!(b.metric_points, 10);

        let b = score_breakdown("saved $5,000 across 3 teams", None);
        assert_eq!(b.metrics_found, 3);
        assert_eq!(b.metric_points, 20);
    }

    #[test]
    fn test_empty_resume_and_no_jd_scores_ten() {
        let report = score("", None);
        assert_eq!(report.score, 10);
    }

    #[test]
    fn test_empty_resume_and_empty_jd_scores_ten() {
        let report = score("", Some(""));
        assert_eq!(report.score, 10);
    }

    #[test]
    fn test_suggestions_follow_rubric_order() {
        let report = score("", None);
        assert_eq!(report.suggestions.len(), 5);
        assert!(report.suggestions[0].contains("standard sections"));
        assert!(report.suggestions[1].starts_with("Tip:"));
        assert!(report.suggestions[2].contains("action verbs"));
        assert!(report.suggestions[3].contains("Quantify"));
        assert_eq!(
            report.suggestions[4],
            "Your score is 10. Aim for 85+ by implementing the suggestions above."
        );
    }

    #[test]
    fn test_strong_resume_reaches_target_without_closing_suggestion() {
        let report = score(STRONG_RESUME, Some("Python SQL Docker engineer"));
        assert!(report.score >= TARGET_SCORE, "score was {}", report.score);
        assert_eq!(report.suggestions.len(), 4);
    }

    #[test]
    fn test_total_never_exceeds_100() {
        let report = score(STRONG_RESUME, Some(STRONG_RESUME));
        assert!(report.score <= 100);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let jd = "Senior Python engineer, SQL, Docker, Kubernetes, AWS";
        assert_eq!(score(STRONG_RESUME, Some(jd)), score(STRONG_RESUME, Some(jd)));
    }

    #[test]
    fn test_report_serializes_as_score_and_suggestions() {
        let value = serde_json::to_value(score("", None)).unwrap();
        assert_eq!(value["score"], 10);
        assert!(value["suggestions"].is_array());
        assert_eq!(value.as_object().unwrap().len(), 2);
    }
}
