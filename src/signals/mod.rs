//! Signal Detector
//!
//! Pure functions that count or detect pattern matches in prompt text.
//! Nothing here assumes ASCII input.

use crate::patterns::{FamilyMatcher, PatternFamily, SignalFamily, SignalSource};
use regex::Regex;

/// Number of `phrases` contained in `text`, ignoring case. Each phrase counts
/// at most once regardless of how often it occurs.
pub fn count_literal_matches<S: AsRef<str>>(text: &str, phrases: &[S]) -> usize {
    let text_lower = text.to_lowercase();
    phrases
        .iter()
        .filter(|phrase| text_lower.contains(&phrase.as_ref().to_lowercase()))
        .count()
}

/// Total non-overlapping matches of every pattern in `text`.
pub fn count_regex_matches(text: &str, patterns: &[Regex]) -> usize {
    patterns.iter().map(|re| re.find_iter(text).count()).sum()
}

/// Whether any pattern matches, stopping at the first hit.
pub fn has_any_match(text: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|re| re.is_match(text))
}

/// Count of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count of characters (not bytes).
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Signal count for a compiled family, using the family's match mode.
pub fn count(text: &str, family: &PatternFamily) -> usize {
    match family.matcher() {
        FamilyMatcher::Literal(phrases) => count_literal_matches(text, phrases),
        FamilyMatcher::Regex(regexes) => count_regex_matches(text, regexes),
    }
}

/// Whether a compiled family has at least one match.
pub fn detect(text: &str, family: &PatternFamily) -> bool {
    match family.matcher() {
        FamilyMatcher::Literal(phrases) => {
            let text_lower = text.to_lowercase();
            phrases.iter().any(|phrase| text_lower.contains(phrase.as_str()))
        }
        FamilyMatcher::Regex(regexes) => has_any_match(text, regexes),
    }
}

/// Raw signal counts for one prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignalCounts {
    pub words: usize,
    pub chars: usize,
    pub specificity: usize,
    pub context: usize,
    pub criteria: usize,
    pub verification: usize,
    pub hedge: usize,
    pub vague: usize,
    pub has_imperative: bool,
    pub has_structure: bool,
    /// Whether the trimmed text opens with a passive question
    pub passive_question: bool,
}

impl SignalCounts {
    pub fn detect(text: &str, source: &dyn SignalSource) -> Self {
        let family = |f: SignalFamily| source.family(f);

        Self {
            words: word_count(text),
            chars: char_count(text),
            specificity: count(text, family(SignalFamily::Specificity)),
            context: count(text, family(SignalFamily::Context)),
            criteria: count(text, family(SignalFamily::Criteria)),
            verification: count(text, family(SignalFamily::Verification)),
            hedge: count(text, family(SignalFamily::Hedge)),
            vague: count(text, family(SignalFamily::Vague)),
            has_imperative: detect(text, family(SignalFamily::Imperative)),
            has_structure: detect(text, family(SignalFamily::Structure)),
            passive_question: detect(text.trim(), family(SignalFamily::PassiveQuestion)),
        }
    }
}

/// Whether the trimmed text is, in its entirety, a lazy acknowledgement.
pub fn is_lazy(text: &str, source: &dyn SignalSource) -> bool {
    detect(text.trim(), source.family(SignalFamily::Lazy))
}
