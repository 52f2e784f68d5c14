// Shared prompt fragments used by every oracle call.
// Call-site prompts live in `oracle/prompts.rs`; this file holds the cross-cutting fragments.

use crate::ats::scorer::{ACTION_VERBS, SECTION_NAMES};

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Line-marker grammar the synthesizer understands. Appended to every prompt that
/// asks the model for resume text.
pub const MARKER_INSTRUCTION: &str = "\
    FORMAT the resume text line by line. Start each line with exactly one marker: \
    [H1] for the candidate's name (once, first line), \
    [H2] for a major section title (Summary, Skills, Experience, Education, Projects), \
    [H3] for a role, school or project title, \
    [BULLET] for a bullet point. \
    Lines without a marker are plain paragraphs (e.g. contact details). \
    Do not use markdown, asterisks or numbering.";

/// Rubric reminder so oracle rewrites aim at what the local scorer rewards. Sections
/// and verbs come straight from the scorer's vocabulary.
pub fn ats_rubric_instruction() -> String {
    let sections: Vec<String> = SECTION_NAMES.iter().map(|s| capitalize(s)).collect();
    format!(
        "An ATS-friendly resume has the standard sections ({}), uses strong action verbs \
         ({}), quantifies results with numbers, percentages or currency, and repeats the \
         job description's key terms verbatim.",
        sections.join(", "),
        ACTION_VERBS.join(", ")
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
