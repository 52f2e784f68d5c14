#![allow(dead_code)]

// ATS analysis: keyword model and the local rubric scorer.
// Nothing here calls the oracle; every result is reproducible from its inputs.

pub mod handlers;
pub mod keywords;
pub mod scorer;
pub mod tagger;

pub use scorer::{score_breakdown, RubricBreakdown, ScoreReport, TARGET_SCORE};
