//! Tokenizer and part-of-speech tagger used by the keyword model.
//!
//! The tagger is rule-based and deterministic: the same text always yields the same
//! tags, which keeps ATS scores reproducible. Rules are applied in a fixed order:
//! 1. punctuation / symbols
//! 2. numerals (digits or English number words)
//! 3. closed-class lexicon (determiners, pronouns, adpositions, conjunctions, auxiliaries)
//! 4. open-class lexicon (common verbs, adjectives, adverbs)
//! 5. suffix heuristics, with a noun exception list
//! 6. capitalisation → proper noun
//! 7. everything else → noun

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Universal part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PosTag {
    Noun,
    Propn,
    Verb,
    Aux,
    Adj,
    Adv,
    Pron,
    Det,
    Adp,
    Cconj,
    Sconj,
    Part,
    Num,
    Sym,
    Punct,
}

impl PosTag {
    pub fn is_nominal(self) -> bool {
        matches!(self, PosTag::Noun | PosTag::Propn)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub tag: PosTag,
}

// symbols | numbers | words with internal joiners | any other non-space char
const TOKEN_PATTERN: &str = concat!(
    r"[$%€£]",
    r"|\d+(?:[.,/]\d+)*",
    r"|\p{L}[\p{L}\p{N}]*(?:['’./+#-][\p{L}\p{N}]+)*[+#]*",
    r"|[^\s\p{L}\p{N}]",
);

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}

/// Splits text into word, number, symbol and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    token_regex().find_iter(text).map(|m| m.as_str()).collect()
}

/// Tokenizes and tags `text`.
pub fn tag(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut sentence_start = true;

    for raw in tokenize(text) {
        let tag = tag_token(raw, sentence_start);
        sentence_start = matches!(raw, "." | "!" | "?" | ":" | ";" | "•" | "-" | "*");
        tokens.push(Token { text: raw, tag });
    }
    tokens
}

/// True for digit strings (`1,200`, `3.5`, `1/2`) and English number words.
pub fn like_num(token: &str) -> bool {
    let stripped: String = token
        .chars()
        .filter(|c| !matches!(c, ',' | '.' | '/'))
        .collect();
    if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    NUMBER_WORDS.contains(&token.to_lowercase().as_str())
}

fn tag_token(raw: &str, sentence_start: bool) -> PosTag {
    let first = raw.chars().next().unwrap_or(' ');
    if !first.is_alphanumeric() {
        return if matches!(first, '$' | '%' | '€' | '£' | '+' | '#' | '&' | '@' | '=') {
            PosTag::Sym
        } else {
            PosTag::Punct
        };
    }
    if like_num(raw) {
        return PosTag::Num;
    }

    let lower = raw.to_lowercase();
    let word = lower.as_str();

    if let Some(tag) = closed_class(word) {
        return tag;
    }
    if let Some(tag) = open_class(word) {
        return tag;
    }
    if NOUN_EXCEPTIONS.contains(&word) {
        return nominal(raw, sentence_start);
    }
    if let Some(tag) = by_suffix(word) {
        return tag;
    }
    nominal(raw, sentence_start)
}

fn nominal(raw: &str, sentence_start: bool) -> PosTag {
    let letters: Vec<char> = raw.chars().filter(|c| c.is_alphabetic()).collect();
    let all_caps = letters.len() > 1 && letters.iter().all(|c| c.is_uppercase());
    let capitalised = letters.first().is_some_and(|c| c.is_uppercase());

    if all_caps || (capitalised && !sentence_start) {
        PosTag::Propn
    } else {
        PosTag::Noun
    }
}

fn closed_class(word: &str) -> Option<PosTag> {
    let tag = if DETERMINERS.contains(&word) {
        PosTag::Det
    } else if PRONOUNS.contains(&word) {
        PosTag::Pron
    } else if ADPOSITIONS.contains(&word) {
        PosTag::Adp
    } else if COORDINATORS.contains(&word) {
        PosTag::Cconj
    } else if SUBORDINATORS.contains(&word) {
        PosTag::Sconj
    } else if AUXILIARIES.contains(&word) {
        PosTag::Aux
    } else if PARTICLES.contains(&word) {
        PosTag::Part
    } else {
        return None;
    };
    Some(tag)
}

fn open_class(word: &str) -> Option<PosTag> {
    if VERBS.contains(&word) {
        Some(PosTag::Verb)
    } else if ADJECTIVES.contains(&word) {
        Some(PosTag::Adj)
    } else if ADVERBS.contains(&word) {
        Some(PosTag::Adv)
    } else {
        None
    }
}

fn by_suffix(word: &str) -> Option<PosTag> {
    let len = word.chars().count();
    if len <= 3 {
        return None;
    }
    if word.ends_with("ly") {
        return Some(PosTag::Adv);
    }
    if (word.ends_with("ing") && len > 5) || word.ends_with("ed") {
        return Some(PosTag::Verb);
    }
    if word.ends_with("ize") || word.ends_with("ise") || word.ends_with("ify") {
        return Some(PosTag::Verb);
    }
    const ADJ_SUFFIXES: &[&str] = &[
        "ous", "ful", "ive", "able", "ible", "less", "ical", "ish", "ary", "ic", "al",
    ];
    if ADJ_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return Some(PosTag::Adj);
    }
    None
}

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion", "trillion", "dozen",
];

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "either", "neither",
    "some", "any", "no", "all", "both", "another", "such", "what", "which", "whatever",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "he", "him", "his", "himself", "she", "her", "hers", "herself", "it",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "who", "whom", "whose",
    "someone", "anyone", "everyone", "something", "anything", "everything", "nothing",
];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "without", "from", "into", "onto", "over",
    "under", "about", "across", "after", "against", "among", "around", "before", "behind",
    "below", "beneath", "beside", "between", "beyond", "during", "except", "inside", "near",
    "off", "outside", "past", "per", "since", "through", "throughout", "toward", "towards",
    "until", "upon", "via", "within", "up", "down", "like",
];

const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "so", "plus"];

const SUBORDINATORS: &[&str] = &[
    "if", "because", "although", "though", "while", "whereas", "unless", "whether", "than",
    "as", "once", "when", "where", "wherever", "whenever",
];

const AUXILIARIES: &[&str] = &[
    "be", "is", "am", "are", "was", "were", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
    "must",
];

const PARTICLES: &[&str] = &["to", "not", "n't", "'s", "’s"];

/// Unambiguous verbs the suffix rules cannot recognise. Words that are as often
/// nouns ("design", "lead", "test") are left out so they stay keywords.
const VERBS: &[&str] = &[
    "manage", "manages", "led", "develop", "develops", "create", "creates", "implement",
    "implements", "achieve", "achieves", "increase", "increases", "reduce", "reduces", "built",
    "own", "owns", "drive", "drives", "drove", "ship", "ships", "shipped", "deliver",
    "delivers", "improve", "improves", "collaborate", "collaborates", "write", "writes",
    "wrote", "written", "make", "makes", "made", "ran", "join", "joins", "seek", "seeks",
    "sought", "require", "requires", "ensure", "ensures", "maintain", "maintains", "grow",
    "grows", "grew", "grown", "define", "defines", "contribute", "contributes", "analyze",
    "analyzes", "analyse", "coordinate", "coordinates", "oversee", "oversees", "oversaw",
    "execute", "executes", "apply", "applies", "get", "gets", "got", "take", "takes", "took",
    "give", "gives", "gave", "know", "knows", "knew", "want", "wants", "keep", "keeps", "kept",
    "bring", "brings", "brought", "spearhead", "spearheads", "deploy", "deploys", "debug",
    "debugs", "optimize", "optimizes", "automate", "automates", "migrate", "migrates",
    "integrate", "integrates", "establish", "establishes", "streamline", "streamlines",
    "resolve", "resolves",
];

const ADJECTIVES: &[&str] = &[
    "senior", "junior", "new", "good", "great", "strong", "excellent", "large", "small",
    "high", "low", "fast", "key", "main", "major", "minor", "best", "better", "full", "part",
    "remote", "hybrid", "global", "local", "multiple", "various", "several", "many", "few",
    "more", "most", "less", "least", "other", "same", "different", "top", "complex", "simple",
    "modern", "agile", "lean", "hands-on", "cross-functional", "proficient", "familiar",
    "preferred", "required", "solid", "deep", "broad", "relevant", "related", "current",
    "previous", "recent", "annual", "daily", "weekly", "monthly", "end-to-end", "first",
    "last", "next", "open", "able", "eager", "quick", "detail-oriented", "self-motivated",
];

const ADVERBS: &[&str] = &[
    "also", "very", "well", "too", "just", "only", "then", "now", "still", "already", "always",
    "never", "often", "sometimes", "here", "there", "again", "ever", "even", "however",
    "therefore", "thus", "soon", "together", "abroad", "ahead",
];

/// Nouns that the suffix heuristics would otherwise mis-tag.
const NOUN_EXCEPTIONS: &[&str] = &[
    // -ing
    "engineering", "marketing", "training", "learning", "testing", "networking", "accounting",
    "banking", "programming", "computing", "manufacturing", "planning", "scheduling",
    "building", "consulting", "hiring", "onboarding", "recruiting", "modeling", "modelling",
    "pricing", "staffing", "tooling", "logging", "monitoring", "reporting", "budgeting",
    "forecasting", "writing", "design", "thing", "string", "spring", "morning", "evening",
    "meeting", "meetings", "funding", "housing", "shipping", "billing", "routing", "hosting",
    "caching", "indexing", "messaging", "streaming", "sourcing", "outsourcing", "ecommerce",
    // -ed
    "speed", "seed", "feed", "bed", "shed", "creed", "greed",
    // -ive / -al / -ic / -ary / -ise
    "objective", "objectives", "executive", "executives", "initiative", "initiatives",
    "representative", "representatives", "narrative", "directive", "perspective", "incentive",
    "incentives", "archive", "archives", "detective", "professional", "professionals",
    "individual", "individuals", "proposal", "proposals", "approval", "approvals", "portal",
    "journal", "capital", "hospital", "terminal", "signal", "signals", "manual", "rental",
    "arrival", "potential", "principal", "referral", "referrals", "renewal", "interval",
    "intervals", "material", "materials", "goal", "goals", "deal", "deals", "email", "emails",
    "logic", "music", "topic", "topics", "clinic", "metric", "metrics", "traffic", "graphic",
    "graphics", "analytics", "logistics", "mechanic", "mechanics", "physics", "economics",
    "statistics", "ethic", "ethics", "summary", "salary", "library", "libraries", "boundary",
    "dictionary", "secretary", "glossary", "anniversary", "itinerary", "commentary",
    "vocabulary", "enterprise", "expertise", "franchise", "exercise", "premise", "premises",
    "promise", "size", "prize", "rise", "noise", "merchandise", "cloud", "publish", "english",
    "spanish", "polish", "dish", "wish",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<(String, PosTag)> {
        tag(text)
            .into_iter()
            .map(|t| (t.text.to_string(), t.tag))
            .collect()
    }

    #[test]
    fn test_tokenize_splits_symbols_from_numbers() {
        assert_eq!(tokenize("grew revenue 20%"), vec!["grew", "revenue", "20", "%"]);
        assert_eq!(tokenize("saved $5,000."), vec!["saved", "$", "5,000", "."]);
    }

    #[test]
    fn test_tokenize_keeps_joined_terms() {
        assert_eq!(
            tokenize("Node.js, C++, C# and CI/CD"),
            vec!["Node.js", ",", "C++", ",", "C#", "and", "CI/CD"]
        );
    }

    #[test]
    fn test_trailing_period_is_punctuation() {
        assert_eq!(tokenize("Python."), vec!["Python", "."]);
    }

    #[test]
    fn test_like_num() {
        assert!(like_num("20"));
        assert!(like_num("1,200"));
        assert!(like_num("3.5"));
        assert!(like_num("1/2"));
        assert!(like_num("ten"));
        assert!(like_num("Million"));
        assert!(!like_num("v2"));
        assert!(!like_num("%"));
        assert!(!like_num("."));
    }

    #[test]
    fn test_closed_class_words() {
        let tagged = tags("the team and I");
        assert_eq!(tagged[0].1, PosTag::Det);
        assert_eq!(tagged[1].1, PosTag::Noun);
        assert_eq!(tagged[2].1, PosTag::Cconj);
        assert_eq!(tagged[3].1, PosTag::Pron);
    }

    #[test]
    fn test_suffix_rules() {
        let tagged = tags("quickly deployed scalable microservices");
        assert_eq!(tagged[0].1, PosTag::Adv);
        assert_eq!(tagged[1].1, PosTag::Verb);
        assert_eq!(tagged[2].1, PosTag::Adj);
        assert_eq!(tagged[3].1, PosTag::Noun);
    }

    #[test]
    fn test_noun_exceptions_override_suffixes() {
        let tagged = tags("software engineering metrics");
        assert!(tagged.iter().all(|(_, t)| t.is_nominal()), "{tagged:?}");
    }

    #[test]
    fn test_capitalisation_marks_proper_nouns() {
        let tagged = tags("Experience with Kubernetes and AWS");
        // sentence-initial capital stays a common noun
        assert_eq!(tagged[0].1, PosTag::Noun);
        assert_eq!(tagged[2].1, PosTag::Propn);
        assert_eq!(tagged[4].1, PosTag::Propn);
    }

    #[test]
    fn test_numbers_and_symbols() {
        let tagged = tags("$ 5 % twelve");
        assert_eq!(tagged[0].1, PosTag::Sym);
        assert_eq!(tagged[1].1, PosTag::Num);
        assert_eq!(tagged[2].1, PosTag::Sym);
        assert_eq!(tagged[3].1, PosTag::Num);
    }

    #[test]
    fn test_tagging_is_deterministic() {
        let text = "Led a cross-functional team of 12 engineers building Rust services.";
        assert_eq!(tags(text), tags(text));
    }
}
