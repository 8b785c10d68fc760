use lazymeter::formatting::PlainFormatter;
use lazymeter::report::{format_ascii_report, to_json, TrendDirection};
use lazymeter::storage::{aggregate, BucketAverage, WeeklyAverage};
use lazymeter::{generate_report, Report, ReportInput, ReportOptions};
use pretty_assertions::assert_eq;

fn prompts(scores: &[f64]) -> Vec<(String, f64)> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &s)| (format!("prompt {i}"), s))
        .collect()
}

fn full(report: Report) -> Box<lazymeter::report::PromptReport> {
    match report {
        Report::Full(report) => report,
        Report::NoData(_) => panic!("expected a full report"),
    }
}

#[test]
fn summary_and_distribution() {
    let scores = [1.0, 2.5, 5.0, 7.0, 9.0, 9.5];
    let with_text = prompts(&scores);
    let input = ReportInput {
        scores: &scores,
        prompts_with_scores: &with_text,
        paste_count: 3,
        total_prompts: 6,
        days: 14,
        ..Default::default()
    };
    let report = full(generate_report(&input, &ReportOptions::default()));

    assert_eq!(report.summary.prompts_analyzed, 6);
    assert_eq!(report.summary.time_period_days, 14);
    assert_eq!(report.summary.average_score, 5.7);
    assert_eq!(report.summary.median_score, 7.0);
    assert_eq!(report.distribution.excellent.count, 2);
    assert_eq!(report.distribution.minimal.count, 1);

    let total: usize = report.distribution.iter().map(|(_, share)| share.count).sum();
    assert_eq!(total, scores.len());

    let paste = report.paste_reliance.unwrap();
    assert_eq!(paste.prompts_with_paste, 3);
    assert_eq!(paste.percent, 50.0);
}

#[test]
fn halls_are_ranked_and_limited() {
    let scores = [4.0, 1.0, 9.0, 1.0, 6.0, 8.0, 3.0];
    let with_text = prompts(&scores);
    let input = ReportInput {
        scores: &scores,
        prompts_with_scores: &with_text,
        total_prompts: scores.len(),
        ..Default::default()
    };
    let options = ReportOptions {
        shame_limit: 3,
        fame_limit: 2,
        ..ReportOptions::default()
    };
    let report = full(generate_report(&input, &options));

    let shame: Vec<&str> = report
        .hall_of_shame
        .as_ref()
        .unwrap()
        .iter()
        .map(|p| p.text.as_str())
        .collect();
    assert_eq!(shame, vec!["prompt 1", "prompt 3", "prompt 6"]);

    let fame: Vec<f64> = report.hall_of_fame.as_ref().unwrap().iter().map(|p| p.score).collect();
    assert_eq!(fame, vec![9.0, 8.0]);
}

#[test]
fn hidden_sections_are_omitted_from_json() {
    let scores = [5.0];
    let input = ReportInput {
        scores: &scores,
        total_prompts: 1,
        ..Default::default()
    };
    let options = ReportOptions {
        show_shame: false,
        show_pride: false,
        ..ReportOptions::default()
    };
    let json: serde_json::Value =
        serde_json::from_str(&to_json(&generate_report(&input, &options)).unwrap()).unwrap();

    assert!(json.get("hall_of_shame").is_none());
    assert!(json.get("hall_of_fame").is_none());
    assert!(json.get("stamina").is_none());
    assert!(json.get("weekly_trend").is_none());
    assert_eq!(json["distribution"]["adequate"]["percent"], 100.0);
}

#[test]
fn optional_sections_render() {
    let scores = [3.0, 6.0, 8.0];
    let mut hourly: Vec<BucketAverage> = aggregate::hourly_averages(Vec::new());
    hourly[9] = BucketAverage { bucket: 9, avg_score: Some(7.5), count: 4 };
    let weekly = vec![
        WeeklyAverage { week: "2026-10".into(), avg_score: 4.0, count: 3 },
        WeeklyAverage { week: "2026-11".into(), avg_score: 5.0, count: 2 },
    ];
    let sessions = vec![vec![3.0, 6.0], vec![8.0]];
    let input = ReportInput {
        scores: &scores,
        hourly: &hourly,
        weekly: &weekly,
        sessions: &sessions,
        total_prompts: 3,
        days: 30,
        ..Default::default()
    };
    let options = ReportOptions {
        show_stamina: true,
        show_session: true,
        show_trend: true,
        ..ReportOptions::default()
    };
    let report = generate_report(&input, &options);
    let text = format_ascii_report(&report, &PlainFormatter);

    assert!(text.contains("  09:00  █  7.5 (n=4)"), "{text}");
    assert!(text.contains("  10:00  ·"));
    assert!(text.contains("Legend: ·=none ▫=low ▪=med █=high"));
    assert!(text.contains("   1. █████░░░░░ 5.5 (n=2)"), "{text}");
    assert!(text.contains("▁█  (improving)"), "{text}");

    let report = full(report);
    assert_eq!(report.trend_direction, Some(TrendDirection::Improving));
    assert_eq!(report.stamina.unwrap().by_hour.len(), 1);
}

#[test]
fn empty_report_is_no_data() {
    let report = generate_report(&ReportInput::default(), &ReportOptions::default());
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        serde_json::json!({"error": "No prompts found", "prompts_analyzed": 0})
    );
    assert_eq!(format_ascii_report(&report, &PlainFormatter), "No prompts found\n");
}
