//! Scoring properties that hold for every input:
//! - Totals stay within 1-10
//! - Category and confidence are functions of the total
//! - Scoring is deterministic

use indoc::indoc;
use lazymeter::scoring::ShortCircuit;
use lazymeter::{score_prompt, Category};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_total_is_bounded(text in "\\PC{0,400}") {
        let score = score_prompt(&text);
        prop_assert!((1.0..=10.0).contains(&score.total), "total {}", score.total);
    }

    #[test]
    fn prop_category_and_confidence_follow_total(text in "(?s).{0,300}") {
        let score = score_prompt(&text);
        prop_assert_eq!(score.category, Category::from_total(score.total));
        let expected = if score.total <= 2.0 || score.total >= 8.0 { 1.0 } else { 0.7 };
        prop_assert_eq!(score.confidence, expected);
    }

    #[test]
    fn prop_scoring_is_idempotent(text in "[a-zA-Z .,/_\\-\n]{0,200}") {
        prop_assert_eq!(score_prompt(&text), score_prompt(&text));
    }

    #[test]
    fn prop_context_marker_never_lowers_context(base in "[a-z ]{5,80}") {
        let before = score_prompt(&format!("Update {base}"));
        let after = score_prompt(&format!("Update {base} because it matters"));
        let (Some(before), Some(after)) = (before.signals(), after.signals()) else {
            return Ok(());
        };
        prop_assert!(after.scores.context >= before.scores.context);
        prop_assert!(after.scores.context <= 2.5);
    }
}

#[test]
fn empty_text_is_grunt_with_full_confidence() {
    for text in ["", "   ", "\n\t"] {
        let score = score_prompt(text);
        assert_eq!(score.total, 1.0);
        assert_eq!(score.category, Category::Grunt);
        assert_eq!(score.confidence, 1.0);
        assert_eq!(score.short_circuit_reason(), Some(ShortCircuit::Empty));
    }
}

#[test]
fn lazy_replies_short_circuit() {
    for text in ["ok", "yes", "k", "5", "Sounds good!", "  continue.  "] {
        let score = score_prompt(text);
        assert_eq!(score.total, 1.0, "{text:?}");
        assert_eq!(score.category, Category::Grunt, "{text:?}");
    }
}

#[test]
fn lazy_words_inside_a_sentence_are_scored() {
    let score = score_prompt("ok so rename the config loader");
    assert_eq!(score.short_circuit_reason(), None);
}

#[test]
fn category_boundaries_are_exact() {
    assert_eq!(Category::from_total(2.0), Category::Grunt);
    assert_eq!(Category::from_total(2.01), Category::Minimal);
    assert_eq!(Category::from_total(6.0), Category::Adequate);
    assert_eq!(Category::from_total(8.0), Category::Solid);
    assert_eq!(Category::from_total(8.01), Category::Excellent);
}

#[test]
fn hedged_passive_request_scores_low() {
    let score = score_prompt("Can you maybe fix it, thanks");
    let signals = score.signals().expect("not short-circuited");

    assert!(!signals.has_imperative);
    assert_eq!(signals.scores.clarity, 0.0);
    assert!(signals.hedge_words >= 1);
    assert!(signals.vague_terms >= 1);
    assert!(matches!(score.category, Category::Grunt | Category::Minimal));
}

#[test]
fn detailed_imperative_request_scores_high() {
    let prompt = indoc! {"
        Implement retry logic in client.py because the upstream API times out intermittently; must pass the existing test suite.
        - handle 3 retries
        - verify with `pytest test_client.py`
    "};
    let score = score_prompt(prompt);
    let signals = score.signals().expect("not short-circuited");

    assert!(signals.has_imperative);
    assert!(signals.has_structure);
    assert!(signals.specificity >= 1);
    assert!(signals.context_markers >= 1);
    assert!(signals.criteria_markers >= 1);
    assert!(signals.verification_markers >= 1);
    assert!(score.total >= 7.0, "total {}", score.total);
    assert!(matches!(score.category, Category::Solid | Category::Excellent));
}

#[test]
fn detailed_single_line_request_scores_high() {
    let prompt = "Implement retry logic in client.py because the upstream API times out \
                  intermittently; must pass the existing test suite. - handle 3 retries \
                  - verify with `pytest test_client.py`";
    let score = score_prompt(prompt);
    let signals = score.signals().expect("not short-circuited");

    assert!(signals.has_imperative);
    assert!(!signals.has_structure);
    assert!(score.total >= 7.0, "total {}", score.total);
    assert!(matches!(score.category, Category::Solid | Category::Excellent));
}

#[test]
fn non_ascii_input_is_scored() {
    let score = score_prompt("Ajoute un test pour la fonction `analyse` 🚀 dans lib.rs");
    assert!((1.0..=10.0).contains(&score.total));
}
