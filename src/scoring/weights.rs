//! Fixed weights and caps for each scoring dimension.
//!
//! These are not configurable: changing a weight changes the meaning of every
//! stored historical score.

/// Per-match weight with an upper cap on the dimension's contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CappedWeight {
    pub per_match: f64,
    pub cap: f64,
}

impl CappedWeight {
    pub const fn new(per_match: f64, cap: f64) -> Self {
        Self { per_match, cap }
    }

    pub fn apply(&self, count: usize) -> f64 {
        (count as f64 * self.per_match).min(self.cap)
    }
}

pub const SPECIFICITY: CappedWeight = CappedWeight::new(0.5, 2.5);
pub const CONTEXT: CappedWeight = CappedWeight::new(0.6, 2.5);
pub const CRITERIA: CappedWeight = CappedWeight::new(0.4, 1.5);
pub const VERIFICATION: CappedWeight = CappedWeight::new(0.4, 1.5);
pub const HEDGE_PENALTY: CappedWeight = CappedWeight::new(0.3, 1.5);
pub const VAGUE_PENALTY: CappedWeight = CappedWeight::new(0.5, 1.0);

pub const IMPERATIVE_CLARITY: f64 = 1.5;
/// Awarded when the prompt does not open with a passive question.
pub const DIRECT_CLARITY: f64 = 0.5;
pub const CLARITY_CAP: f64 = 2.0;

pub const STRUCTURE_BONUS: f64 = 0.5;

pub const LONG_PROMPT_WORDS: usize = 30;
pub const LONG_PROMPT_BONUS: f64 = 1.0;
pub const MEDIUM_PROMPT_WORDS: usize = 10;
pub const MEDIUM_PROMPT_BONUS: f64 = 0.5;

/// Added to the raw composite so a signal-free prompt lands on the minimum.
pub const BASELINE: f64 = 1.0;
pub const MIN_TOTAL: f64 = 1.0;
pub const MAX_TOTAL: f64 = 10.0;

pub const HIGH_CONFIDENCE: f64 = 1.0;
pub const MID_RANGE_CONFIDENCE: f64 = 0.7;

pub fn length_bonus(words: usize) -> f64 {
    if words >= LONG_PROMPT_WORDS {
        LONG_PROMPT_BONUS
    } else if words >= MEDIUM_PROMPT_WORDS {
        MEDIUM_PROMPT_BONUS
    } else {
        0.0
    }
}

/// Totals at either extreme are reported with full confidence.
pub fn confidence_for(total: f64) -> f64 {
    if total <= 2.0 || total >= 8.0 {
        HIGH_CONFIDENCE
    } else {
        MID_RANGE_CONFIDENCE
    }
}
