//! Keyword model: the set of case-folded common and proper nouns in a text.
//!
//! No stemming: "manager" and "managers" are different keywords. Scores depend on
//! this, so changing it changes every historical score.

use std::collections::BTreeSet;

use crate::ats::tagger;

/// Case-folded, de-duplicated keywords. Ordered so iteration is reproducible.
pub type KeywordSet = BTreeSet<String>;

pub fn keywords(text: &str) -> KeywordSet {
    tagger::tag(text)
        .into_iter()
        .filter(|token| token.tag.is_nominal())
        .map(|token| token.text.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> KeywordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_keeps_only_nouns() {
        let kw = keywords("Managed the billing team and quickly shipped new features");
        assert_eq!(kw, set(&["billing", "team", "features"]));
    }

    #[test]
    fn test_proper_nouns_are_case_folded() {
        let kw = keywords("Experience with Python, SQL and Docker");
        assert_eq!(kw, set(&["experience", "python", "sql", "docker"]));
    }

    #[test]
    fn test_no_stemming() {
        let kw = keywords("manager managers");
        assert!(kw.contains("manager"));
        assert!(kw.contains("managers"));
        assert_eq!(kw.len(), 2);
    }

    #[test]
    fn test_duplicates_collapse_across_case() {
        let kw = keywords("Rust rust RUST");
        assert_eq!(kw, set(&["rust"]));
    }

    #[test]
    fn test_numbers_and_punctuation_are_not_keywords() {
        assert!(keywords("42 % $ , .").is_empty());
    }

    #[test]
    fn test_empty_text_has_no_keywords() {
        assert!(keywords("").is_empty());
    }

    #[test]
    fn test_deterministic() {
        let jd = "We need a Senior Rust Engineer with Kubernetes, Kafka and AWS experience.";
        assert_eq!(keywords(jd), keywords(jd));
    }
}
