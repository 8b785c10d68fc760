//! Terminal rendering of a [`Report`].

use super::charts::{bar_chart, heat_glyph, sparkline, HEAT_LEGEND};
use super::{PromptReport, RankedPrompt, Report};
use crate::formatting::OutputFormatter;
use crate::scoring::Category;
use crate::storage::WEEKDAY_NAMES;
use std::fmt::Write;

const BOX_WIDTH: usize = 45;
const SCORE_BAR_WIDTH: usize = 16;
const SESSION_BAR_WIDTH: usize = 10;
const SPARKLINE_WIDTH: usize = 20;

/// Hours of the day, starting with the working morning.
const HEATMAP_HOURS: [usize; 24] = [
    8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 0, 1, 2, 3, 4, 5, 6, 7,
];

fn boxed_header(out: &mut String, rows: &[String]) {
    let rule = "─".repeat(BOX_WIDTH);
    writeln!(out, "┌{rule}┐").unwrap();
    for row in rows {
        writeln!(out, "│{row:<BOX_WIDTH$}│").unwrap();
    }
    writeln!(out, "└{rule}┘").unwrap();
    out.push('\n');
}

fn ranked_list(out: &mut String, title: &str, items: &[RankedPrompt], fmt: &dyn OutputFormatter) {
    writeln!(out, "{}", fmt.header(title)).unwrap();
    for (i, item) in items.iter().enumerate() {
        let score = format!("{:.1}", item.score);
        writeln!(
            out,
            "  {}. \"{}\" (score: {})",
            i + 1,
            item.text,
            fmt.category(Category::from_total(item.score), &score)
        )
        .unwrap();
    }
    out.push('\n');
}

fn stamina_section(out: &mut String, report: &PromptReport, fmt: &dyn OutputFormatter) {
    let Some(stamina) = &report.stamina else {
        return;
    };

    writeln!(out, "{}", fmt.header("Stamina by Hour:")).unwrap();
    for hour in HEATMAP_HOURS {
        match stamina.by_hour.get(&hour) {
            Some(bucket) => {
                writeln!(
                    out,
                    "  {hour:02}:00  {}  {:.1} (n={})",
                    heat_glyph(Some(bucket.avg), bucket.count),
                    bucket.avg,
                    bucket.count
                )
                .unwrap();
            }
            None => {
                writeln!(out, "  {hour:02}:00  {}", heat_glyph(None, 0)).unwrap();
            }
        }
    }

    if let Some(days) = &stamina.by_day {
        let cells: Vec<String> = WEEKDAY_NAMES
            .iter()
            .map(|name| {
                let glyph = days
                    .iter()
                    .find(|d| d.day == *name)
                    .map_or(heat_glyph(None, 0), |d| heat_glyph(Some(d.avg), d.count));
                format!("{name} {glyph}")
            })
            .collect();
        out.push('\n');
        writeln!(out, "  {}", cells.join("  ")).unwrap();
    }

    out.push('\n');
    writeln!(out, "{}", fmt.dim(HEAT_LEGEND)).unwrap();
    out.push('\n');
}

fn session_section(out: &mut String, report: &PromptReport, fmt: &dyn OutputFormatter) {
    let Some(positions) = &report.session_pattern else {
        return;
    };

    writeln!(out, "{}", fmt.header("Position in Session vs Average Score:")).unwrap();
    for p in positions {
        writeln!(
            out,
            "  {:2}. {} {:.1} (n={})",
            p.position,
            bar_chart(p.avg_score, 10.0, SESSION_BAR_WIDTH),
            p.avg_score,
            p.sample_size
        )
        .unwrap();
    }
    out.push('\n');
}

fn trend_section(out: &mut String, report: &PromptReport, fmt: &dyn OutputFormatter) {
    let Some(weeks) = &report.weekly_trend else {
        return;
    };

    let averages: Vec<f64> = weeks.iter().map(|w| w.avg_score).collect();
    writeln!(out, "{}", fmt.header("Weekly Trend:")).unwrap();
    write!(out, "  {}", sparkline(&averages, SPARKLINE_WIDTH)).unwrap();
    if let Some(direction) = report.trend_direction {
        write!(out, "  ({})", direction.as_str()).unwrap();
    }
    out.push_str("\n\n");
}

fn full_report(report: &PromptReport, fmt: &dyn OutputFormatter) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    boxed_header(
        &mut out,
        &[
            "  LAZY METER - Prompt Quality Report".to_string(),
            format!(
                "  Analyzed: {} prompts (last {} days)",
                summary.prompts_analyzed, summary.time_period_days
            ),
        ],
    );

    let average = format!("{:.1}/10", summary.average_score);
    writeln!(
        out,
        "{} {}  [{}]",
        fmt.bold("Your Average Score:"),
        fmt.category(Category::from_total(summary.average_score), &average),
        bar_chart(summary.average_score, 10.0, SCORE_BAR_WIDTH)
    )
    .unwrap();
    writeln!(out, "{}", fmt.dim(&format!("Median: {:.1}", summary.median_score))).unwrap();
    out.push('\n');

    writeln!(out, "{}", fmt.header("Distribution:")).unwrap();
    for (category, share) in report.distribution.iter() {
        writeln!(
            out,
            "  {} {} {:4.0}%",
            fmt.category(category, &format!("{:12}", category.as_str())),
            bar_chart(share.percent, 100.0, SCORE_BAR_WIDTH),
            share.percent
        )
        .unwrap();
    }
    out.push('\n');

    if let Some(paste) = &report.paste_reliance {
        writeln!(
            out,
            "Paste reliance: {} prompts ({:.1}%)",
            paste.prompts_with_paste, paste.percent
        )
        .unwrap();
        out.push('\n');
    }

    if let Some(shame) = &report.hall_of_shame {
        ranked_list(&mut out, "Hall of Shame:", shame, fmt);
    }
    if let Some(fame) = &report.hall_of_fame {
        ranked_list(&mut out, "Hall of Fame:", fame, fmt);
    }

    stamina_section(&mut out, report, fmt);
    session_section(&mut out, report, fmt);
    trend_section(&mut out, report, fmt);

    out
}

pub fn format_ascii_report(report: &Report, fmt: &dyn OutputFormatter) -> String {
    match report {
        Report::NoData(no_data) => format!("{}\n", no_data.error),
        Report::Full(report) => full_report(report, fmt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::PlainFormatter;
    use crate::report::{generate_report, ReportInput, ReportOptions};
    use crate::storage::WeeklyAverage;

    #[test]
    fn test_no_data_renders_message() {
        let report = generate_report(&ReportInput::default(), &ReportOptions::default());
        assert_eq!(format_ascii_report(&report, &PlainFormatter), "No prompts found\n");
    }

    #[test]
    fn test_header_box_is_aligned() {
        let scores = [5.0];
        let prompts = vec![("do the thing".to_string(), 5.0)];
        let input = ReportInput {
            scores: &scores,
            prompts_with_scores: &prompts,
            total_prompts: 1,
            days: 30,
            ..Default::default()
        };
        let text = format_ascii_report(
            &generate_report(&input, &ReportOptions::default()),
            &PlainFormatter,
        );

        let boxed: Vec<&str> = text.lines().take(4).collect();
        let widths: Vec<usize> = boxed.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|&w| w == BOX_WIDTH + 2), "{widths:?}");
        assert!(boxed[2].contains("Analyzed: 1 prompts (last 30 days)"));
        assert!(text.contains("Your Average Score: 5.0/10  [████████░░░░░░░░]"));
        assert!(text.contains("  adequate     ████████████████  100%"));
        assert!(text.contains("  1. \"do the thing\" (score: 5.0)"));
    }

    #[test]
    fn test_session_and_trend_sections() {
        let scores = [4.0, 6.0];
        let sessions = vec![vec![4.0, 6.0]];
        let weekly = [
            WeeklyAverage {
                week: "2026-09".to_string(),
                avg_score: 3.0,
                count: 1,
            },
            WeeklyAverage {
                week: "2026-10".to_string(),
                avg_score: 5.0,
                count: 1,
            },
        ];
        let input = ReportInput {
            scores: &scores,
            weekly: &weekly,
            sessions: &sessions,
            total_prompts: 2,
            days: 30,
            ..Default::default()
        };
        let options = ReportOptions {
            show_session: true,
            show_trend: true,
            ..Default::default()
        };
        let text = format_ascii_report(&generate_report(&input, &options), &PlainFormatter);

        assert!(text.contains("Position in Session vs Average Score:"));
        assert!(text.contains("6.0 (n=1)"));
        assert!(text.contains("Weekly Trend:\n  ▁█  (improving)\n\n"));
    }
}
