use crate::formatting::OutputFormatter;
use crate::scoring::{Breakdown, Score, ShortCircuit};
use std::fmt::Write;

/// Multi-line summary of a single score.
pub fn format_score_terminal(score: &Score, fmt: &dyn OutputFormatter) -> String {
    let mut out = String::new();
    let total = format!("{:.1}/10 ({})", score.total, score.category);
    writeln!(
        out,
        "{} {}  {}",
        fmt.bold("Score:"),
        fmt.category(score.category, &total),
        fmt.dim(&format!("confidence {:.1}", score.confidence))
    )
    .unwrap();

    match &score.breakdown {
        Breakdown::ShortCircuit { reason } => {
            let why = match reason {
                ShortCircuit::Empty => "empty prompt",
                ShortCircuit::LazyPattern => "matches a low-effort pattern",
            };
            writeln!(out, "  {}", fmt.dim(why)).unwrap();
        }
        Breakdown::Signals(signals) => {
            let s = &signals.scores;
            let rows = [
                ("specificity", s.specificity, signals.specificity),
                ("context", s.context, signals.context_markers),
                ("criteria", s.criteria, signals.criteria_markers),
                ("verification", s.verification, signals.verification_markers),
            ];
            for (name, value, count) in rows {
                writeln!(out, "  {name:<13}{value:>5.2}  ({count} matches)").unwrap();
            }
            writeln!(
                out,
                "  {:<13}{:>5.2}  ({})",
                "clarity",
                s.clarity,
                if signals.has_imperative { "imperative" } else { "indirect" }
            )
            .unwrap();
            writeln!(
                out,
                "  {:<13}{:>5.2}  ({} hedges, {} vague)",
                "penalties",
                -s.penalties,
                signals.hedge_words,
                signals.vague_terms
            )
            .unwrap();
            writeln!(
                out,
                "  {}",
                fmt.dim(&format!(
                    "{} words, {} chars{}",
                    signals.words,
                    signals.chars,
                    if signals.has_structure { ", structured" } else { "" }
                ))
            )
            .unwrap();
        }
    }
    out
}
