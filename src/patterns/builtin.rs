//! Built-in signal family tables.
//!
//! Literal families are matched as case-insensitive substrings, each phrase
//! counted at most once. Regex families are compiled case-insensitively;
//! see [`super::RegexScope`] for how each family anchors.

use super::SignalFamily;

// === POSITIVE SIGNALS ===

/// Concrete references: files, paths, code, identifiers, URLs.
pub const SPECIFICITY_PATTERNS: &[&str] = &[
    r"\b\w+\.(py|js|ts|tsx|jsx|go|rs|rb|java|cpp|c|h|md|json|yaml|yml)\b",
    r"@\w+",
    r"/[\w/.-]+\.\w+",
    r"\b(function|class|def|const|let|var|func|fn)\s+\w+",
    r"`[^`]+`",
    r"\b[A-Z][a-z]+[A-Z]\w*\b",
    r"\b[a-z]+_[a-z_]+\b",
    r"line\s*\d+",
    r"error:?\s*\w+",
    r"\b(localhost|127\.0\.0\.1|https?://)\S+",
];

/// Reasoning indicators (why the task matters).
pub const CONTEXT_MARKERS: &[&str] = &[
    "because",
    "so that",
    "in order to",
    "for",
    "since",
    "given that",
    "considering",
    "based on",
    "due to",
    "the goal is",
    "we need",
    "the purpose",
    "this will",
];

/// Acceptance criteria (what "done" looks like).
pub const CRITERIA_MARKERS: &[&str] = &[
    "should",
    "must",
    "needs to",
    "has to",
    "make sure",
    "ensure",
    "verify",
    "check that",
    "confirm",
    "validate",
    "expect",
    "acceptance",
    "criteria",
    "requirements",
    "constraint",
];

pub const VERIFICATION_MARKERS: &[&str] = &[
    "test",
    "verify",
    "validate",
    "check",
    "confirm",
    "run",
    "assert",
    "expect",
    "should pass",
    "should fail",
    "build",
];

/// Direct instructions.
pub const IMPERATIVE_PATTERNS: &[&str] = &[
    r"^(add|create|write|implement|build|make|update|change|fix|remove|delete|refactor)\b",
    r"\b(add|create|write|implement|build|update|change|fix|remove|delete|refactor)\s+(a|the|this|new)\b",
];

/// Bullets, numbered lists, markdown headers, paragraph breaks.
pub const STRUCTURE_PATTERNS: &[&str] = &[
    r"^\s*[-*•]\s",
    r"^\s*\d+[.)]\s",
    r"^#+\s",
    r"\n\s*\n",
];

// === NEGATIVE SIGNALS ===

/// Bare acknowledgements and filler. Matched against the whole trimmed text.
pub const LAZY_PATTERNS: &[&str] = &[
    r"^(yes|no|ok|okay|sure|yep|nope|yup|y|n)\.?!?$",
    r"^(continue|go|do it|proceed|next|go on)\.?!?$",
    r"^(good|great|nice|cool|fine|perfect|awesome|thanks|thx|ty)\.?!?$",
    r"^(let's do it|let's go|sounds good|looks good)\.?!?$",
    r"^\d+\.?$",
    r"^[a-z]\.?$",
    r"^(what|how|why)\?$",
];

/// Uncertainty and minimizing language.
pub const HEDGE_WORDS: &[&str] = &[
    "maybe",
    "possibly",
    "perhaps",
    "might",
    "could be",
    "i think",
    "i guess",
    "probably",
    "not sure",
    "just",
    "quick",
    "simple",
    "easy",
];

/// Question openers used instead of an instruction.
pub const PASSIVE_QUESTION_PATTERNS: &[&str] = &[
    r"^can you\b",
    r"^could you\b",
    r"^would you\b",
    r"^do you think\b",
    r"^what do you think\b",
    r"^is it possible\b",
    r"^would it be\b",
];

pub const VAGUE_TERMS: &[&str] = &[
    "make it better",
    "improve it",
    "fix it",
    "clean it up",
    "make it work",
    "optimize it",
    "refactor it",
    "something like",
    "stuff like",
    "things like",
    "etc",
    "and so on",
    "whatever",
];

/// The built-in pattern list for a family.
pub fn default_patterns(family: SignalFamily) -> &'static [&'static str] {
    match family {
        SignalFamily::Specificity => SPECIFICITY_PATTERNS,
        SignalFamily::Context => CONTEXT_MARKERS,
        SignalFamily::Criteria => CRITERIA_MARKERS,
        SignalFamily::Verification => VERIFICATION_MARKERS,
        SignalFamily::Imperative => IMPERATIVE_PATTERNS,
        SignalFamily::Structure => STRUCTURE_PATTERNS,
        SignalFamily::Lazy => LAZY_PATTERNS,
        SignalFamily::Hedge => HEDGE_WORDS,
        SignalFamily::PassiveQuestion => PASSIVE_QUESTION_PATTERNS,
        SignalFamily::Vague => VAGUE_TERMS,
    }
}
