use super::weights::{self, CLARITY_CAP, DIRECT_CLARITY, IMPERATIVE_CLARITY, STRUCTURE_BONUS};
use super::{round_to, Category, Score, ShortCircuit, SignalBreakdown, SubScores};
use crate::patterns::{PatternLibrary, SignalSource};
use crate::signals::{self, SignalCounts};

/// Minimum trimmed length, in characters, of a scorable prompt.
const MIN_PROMPT_CHARS: usize = 2;

/// Scores prompts against a set of signal families.
///
/// Holds only a shared reference, so it is `Copy` and can be handed to
/// parallel workers freely.
#[derive(Clone, Copy)]
pub struct PromptScorer<'a> {
    source: &'a dyn SignalSource,
}

impl PromptScorer<'static> {
    /// Scorer backed by the built-in pattern library.
    pub fn builtin() -> Self {
        Self::new(PatternLibrary::builtin())
    }
}

impl Default for PromptScorer<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> PromptScorer<'a> {
    pub fn new(source: &'a dyn SignalSource) -> Self {
        Self { source }
    }

    pub fn score(&self, text: &str) -> Score {
        if text.trim().chars().count() < MIN_PROMPT_CHARS {
            return Score::short_circuit(ShortCircuit::Empty);
        }

        if signals::is_lazy(text, self.source) {
            return Score::short_circuit(ShortCircuit::LazyPattern);
        }

        let counts = SignalCounts::detect(text, self.source);
        score_from_counts(&counts)
    }
}

/// Score `text` with the built-in pattern library.
pub fn score_prompt(text: &str) -> Score {
    PromptScorer::builtin().score(text)
}

fn clarity_score(counts: &SignalCounts) -> f64 {
    let mut clarity = 0.0;
    if counts.has_imperative {
        clarity += IMPERATIVE_CLARITY;
    }
    if !counts.passive_question {
        clarity += DIRECT_CLARITY;
    }
    clarity.min(CLARITY_CAP)
}

fn score_from_counts(counts: &SignalCounts) -> Score {
    let specificity = weights::SPECIFICITY.apply(counts.specificity);
    let context = weights::CONTEXT.apply(counts.context);
    let clarity = clarity_score(counts);
    let criteria = weights::CRITERIA.apply(counts.criteria);
    let verification = weights::VERIFICATION.apply(counts.verification);

    let hedge_penalty = weights::HEDGE_PENALTY.apply(counts.hedge);
    let vague_penalty = weights::VAGUE_PENALTY.apply(counts.vague);

    let structure_bonus = if counts.has_structure {
        STRUCTURE_BONUS
    } else {
        0.0
    };
    let length_bonus = weights::length_bonus(counts.words);

    let raw = specificity
        + context
        + clarity
        + criteria
        + verification
        + structure_bonus
        + length_bonus
        - hedge_penalty
        - vague_penalty;

    let total = round_to(
        (raw + weights::BASELINE).clamp(weights::MIN_TOTAL, weights::MAX_TOTAL),
        1,
    );

    let breakdown = SignalBreakdown {
        words: counts.words,
        chars: counts.chars,
        specificity: counts.specificity,
        context_markers: counts.context,
        criteria_markers: counts.criteria,
        verification_markers: counts.verification,
        has_structure: counts.has_structure,
        has_imperative: counts.has_imperative,
        hedge_words: counts.hedge,
        vague_terms: counts.vague,
        scores: SubScores {
            specificity: round_to(specificity, 2),
            context: round_to(context, 2),
            clarity: round_to(clarity, 2),
            criteria: round_to(criteria, 2),
            verification: round_to(verification, 2),
            penalties: round_to(hedge_penalty + vague_penalty, 2),
        },
    };

    log::trace!(
        "Scored prompt ({} words): raw={:.2} total={:.1}",
        counts.words,
        raw,
        total
    );

    Score {
        total,
        category: Category::from_total(total),
        breakdown: super::Breakdown::Signals(breakdown),
        confidence: weights::confidence_for(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::SignalFamily;
    use std::collections::BTreeMap;

    #[test]
    fn test_whitespace_only_is_empty() {
        let score = score_prompt(" \n\t ");
        assert_eq!(score.short_circuit_reason(), Some(ShortCircuit::Empty));
    }

    #[test]
    fn test_single_char_is_empty_not_lazy() {
        assert_eq!(
            score_prompt("k").short_circuit_reason(),
            Some(ShortCircuit::Empty)
        );
    }

    #[test]
    fn test_lazy_beats_positive_signals() {
        let score = score_prompt("ok.");
        assert_eq!(score.short_circuit_reason(), Some(ShortCircuit::LazyPattern));
        assert_eq!(score.total, 1.0);
    }

    #[test]
    fn test_clarity_rewards_direct_imperative() {
        let counts = SignalCounts {
            has_imperative: true,
            ..SignalCounts::default()
        };
        assert_eq!(clarity_score(&counts), 2.0);

        let passive = SignalCounts {
            passive_question: true,
            ..SignalCounts::default()
        };
        assert_eq!(clarity_score(&passive), 0.0);
    }

    #[test]
    fn test_signal_free_counts_land_near_floor() {
        // Only the direct-clarity half point applies
        let score = score_from_counts(&SignalCounts::default());
        assert_eq!(score.total, 1.5);
        assert_eq!(score.category, Category::Grunt);
    }

    #[test]
    fn test_penalties_cannot_push_below_minimum() {
        let counts = SignalCounts {
            hedge: 10,
            vague: 10,
            passive_question: true,
            ..SignalCounts::default()
        };
        let score = score_from_counts(&counts);
        assert_eq!(score.total, 1.0);
        assert_eq!(score.signals().unwrap().scores.penalties, 2.5);
    }

    #[test]
    fn test_maxed_counts_clamp_to_ten() {
        let counts = SignalCounts {
            words: 200,
            chars: 1200,
            specificity: 50,
            context: 50,
            criteria: 50,
            verification: 50,
            has_imperative: true,
            has_structure: true,
            ..SignalCounts::default()
        };
        let score = score_from_counts(&counts);
        assert_eq!(score.total, 10.0);
        assert_eq!(score.category, Category::Excellent);
        assert_eq!(score.confidence, 1.0);
    }

    #[test]
    fn test_custom_source_changes_detection() {
        let mut overrides = BTreeMap::new();
        overrides.insert(SignalFamily::Vague, vec!["do the thing".to_string()]);
        let library = PatternLibrary::with_overrides(&overrides).unwrap();
        let scorer = PromptScorer::new(&library);

        let custom = scorer.score("please do the thing now");
        let builtin = score_prompt("please do the thing now");
        assert_eq!(custom.signals().unwrap().vague_terms, 1);
        assert_eq!(builtin.signals().unwrap().vague_terms, 0);
    }
}
