//! Pattern Library
//!
//! Fixed sets of literal phrases and regular expressions grouped into
//! signal families:
//! - Positive: specificity, context, criteria, verification, imperative, structure
//! - Negative: lazy, hedge, passive question, vague
//!
//! A family's match mode and regex flags are part of its identity. Only the
//! pattern list itself can be swapped (see [`PatternLibrary::with_overrides`]),
//! so custom tables plug into the scorer through the [`SignalSource`] seam.

pub mod builtin;

use crate::errors::{LazyMeterError, Result};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use builtin::default_patterns;

/// Identifier of a signal family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalFamily {
    Specificity,
    Context,
    Criteria,
    Verification,
    Imperative,
    Structure,
    Lazy,
    Hedge,
    PassiveQuestion,
    Vague,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

/// How the patterns of a family are matched against text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive substring containment, one count per phrase
    Literal,
    /// Case-insensitive regular expressions
    Regex,
}

/// Where a regex family may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexScope {
    /// Anywhere; `^`/`$` anchor at line boundaries
    Lines,
    /// Anywhere; `^`/`$` anchor at the start/end of the text
    Text,
    /// The pattern must cover the entire text
    WholeText,
}

impl SignalFamily {
    pub const ALL: [SignalFamily; 10] = [
        SignalFamily::Specificity,
        SignalFamily::Context,
        SignalFamily::Criteria,
        SignalFamily::Verification,
        SignalFamily::Imperative,
        SignalFamily::Structure,
        SignalFamily::Lazy,
        SignalFamily::Hedge,
        SignalFamily::PassiveQuestion,
        SignalFamily::Vague,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Specificity => "specificity",
            Self::Context => "context",
            Self::Criteria => "criteria",
            Self::Verification => "verification",
            Self::Imperative => "imperative",
            Self::Structure => "structure",
            Self::Lazy => "lazy",
            Self::Hedge => "hedge",
            Self::PassiveQuestion => "passive_question",
            Self::Vague => "vague",
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self {
            Self::Specificity
            | Self::Context
            | Self::Criteria
            | Self::Verification
            | Self::Imperative
            | Self::Structure => Polarity::Positive,
            Self::Lazy | Self::Hedge | Self::PassiveQuestion | Self::Vague => Polarity::Negative,
        }
    }

    pub fn match_mode(&self) -> MatchMode {
        match self {
            Self::Context | Self::Criteria | Self::Verification | Self::Hedge | Self::Vague => {
                MatchMode::Literal
            }
            Self::Specificity
            | Self::Imperative
            | Self::Structure
            | Self::Lazy
            | Self::PassiveQuestion => MatchMode::Regex,
        }
    }

    /// Regex anchoring for this family. Meaningless for literal families.
    pub fn regex_scope(&self) -> RegexScope {
        match self {
            Self::Lazy => RegexScope::WholeText,
            Self::PassiveQuestion => RegexScope::Text,
            _ => RegexScope::Lines,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for SignalFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compiled patterns of one family.
#[derive(Debug, Clone)]
pub enum FamilyMatcher {
    /// Lowercased phrases
    Literal(Vec<String>),
    Regex(Vec<Regex>),
}

/// A signal family together with its compiled patterns. Immutable once built.
#[derive(Debug, Clone)]
pub struct PatternFamily {
    family: SignalFamily,
    matcher: FamilyMatcher,
}

impl PatternFamily {
    /// Compile `patterns` using the match mode and flags of `family`.
    pub fn compile<S: AsRef<str>>(family: SignalFamily, patterns: &[S]) -> Result<Self> {
        let matcher = match family.match_mode() {
            MatchMode::Literal => FamilyMatcher::Literal(
                patterns
                    .iter()
                    .map(|p| p.as_ref().to_lowercase())
                    .collect(),
            ),
            MatchMode::Regex => FamilyMatcher::Regex(
                patterns
                    .iter()
                    .map(|p| compile_regex(family, p.as_ref()))
                    .collect::<Result<Vec<_>>>()?,
            ),
        };

        Ok(Self { family, matcher })
    }

    pub fn family(&self) -> SignalFamily {
        self.family
    }

    pub fn matcher(&self) -> &FamilyMatcher {
        &self.matcher
    }

    pub fn len(&self) -> usize {
        match &self.matcher {
            FamilyMatcher::Literal(phrases) => phrases.len(),
            FamilyMatcher::Regex(regexes) => regexes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn compile_regex(family: SignalFamily, pattern: &str) -> Result<Regex> {
    let scope = family.regex_scope();
    let source = match scope {
        RegexScope::WholeText => format!("^(?:{pattern})$"),
        RegexScope::Lines | RegexScope::Text => pattern.to_string(),
    };

    RegexBuilder::new(&source)
        .case_insensitive(true)
        .multi_line(scope == RegexScope::Lines)
        .build()
        .map_err(|source| LazyMeterError::Pattern { family, source })
}

/// Provider of signal families for the scoring engine.
pub trait SignalSource: Send + Sync {
    fn family(&self, family: SignalFamily) -> &PatternFamily;
}

/// A complete set of compiled signal families.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    families: Vec<PatternFamily>,
}

static BUILTIN: Lazy<PatternLibrary> = Lazy::new(|| {
    PatternLibrary::with_overrides(&BTreeMap::new()).expect("built-in patterns must compile")
});

impl PatternLibrary {
    /// The shared built-in library, compiled on first use.
    pub fn builtin() -> &'static PatternLibrary {
        &BUILTIN
    }

    /// Build a library from the built-in tables, replacing the pattern list
    /// of every family present in `overrides`.
    pub fn with_overrides(overrides: &BTreeMap<SignalFamily, Vec<String>>) -> Result<Self> {
        let families = SignalFamily::ALL
            .iter()
            .map(|&family| match overrides.get(&family) {
                Some(patterns) => {
                    log::debug!(
                        "Using {} configured patterns for family '{}'",
                        patterns.len(),
                        family
                    );
                    PatternFamily::compile(family, patterns)
                }
                None => PatternFamily::compile(family, default_patterns(family)),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { families })
    }
}

impl SignalSource for PatternLibrary {
    fn family(&self, family: SignalFamily) -> &PatternFamily {
        &self.families[family.index()]
    }
}
