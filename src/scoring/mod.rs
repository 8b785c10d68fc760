//! Scoring Engine
//!
//! Turns prompt text into a bounded 1-10 [`Score`] with a [`Category`] and a
//! confidence value. Scoring is deterministic and total: every string, including
//! empty and non-ASCII input, yields a valid score.
//!
//! Dimensions:
//! - Specificity (0-2.5): concrete references, file paths, code
//! - Context (0-2.5): reasoning, background, purpose
//! - Clarity (0-2.0): imperative vs passive, directness
//! - Criteria (0-1.5): acceptance criteria, requirements
//! - Verification (0-1.5): testing, validation mentions
//! - Bonuses for structure (0.5) and length (up to 1.0)
//! - Penalties for hedging (up to 1.5) and vague terms (up to 1.0)

pub mod category;
pub mod engine;
pub mod weights;

pub use category::Category;
pub use engine::{score_prompt, PromptScorer};

use serde::{Deserialize, Serialize};

/// Prompt quality score with breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// 1.0-10.0, one decimal place
    pub total: f64,
    pub category: Category,
    pub breakdown: Breakdown,
    /// 0-1
    pub confidence: f64,
}

/// Why scoring stopped before signal detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortCircuit {
    Empty,
    LazyPattern,
}

/// Component scores and raw counts behind a total. Informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Breakdown {
    ShortCircuit { reason: ShortCircuit },
    Signals(SignalBreakdown),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalBreakdown {
    pub words: usize,
    pub chars: usize,
    pub specificity: usize,
    pub context_markers: usize,
    pub criteria_markers: usize,
    pub verification_markers: usize,
    pub has_structure: bool,
    pub has_imperative: bool,
    pub hedge_words: usize,
    pub vague_terms: usize,
    pub scores: SubScores,
}

/// Capped dimension scores rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub specificity: f64,
    pub context: f64,
    pub clarity: f64,
    pub criteria: f64,
    pub verification: f64,
    /// Hedge and vague penalties combined
    pub penalties: f64,
}

impl Score {
    pub fn short_circuit(reason: ShortCircuit) -> Self {
        Self {
            total: weights::MIN_TOTAL,
            category: Category::Grunt,
            breakdown: Breakdown::ShortCircuit { reason },
            confidence: weights::HIGH_CONFIDENCE,
        }
    }

    pub fn short_circuit_reason(&self) -> Option<ShortCircuit> {
        match self.breakdown {
            Breakdown::ShortCircuit { reason } => Some(reason),
            Breakdown::Signals(_) => None,
        }
    }

    pub fn signals(&self) -> Option<&SignalBreakdown> {
        match &self.breakdown {
            Breakdown::Signals(signals) => Some(signals),
            Breakdown::ShortCircuit { .. } => None,
        }
    }
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
