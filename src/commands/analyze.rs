use super::custom_library;
use crate::cli::AnalyzeArgs;
use crate::config::LazyMeterConfig;
use crate::errors::LazyMeterError;
use crate::formatting::FormattingConfig;
use crate::history::{DayWindow, HistoryFilter, HistoryReader, Prompt};
use crate::output;
use crate::patterns::PatternLibrary;
use crate::report::{generate_report, Report, ReportInput, ReportOptions};
use crate::scoring::{PromptScorer, Score};
use crate::sessions::{group_sessions, SessionPoint};
use crate::storage::{aggregate, BucketAverage, ScoreDatabase, ScoreRecord, WeeklyAverage};
use anyhow::{Context, Result};
use chrono::{Duration, Local};
use rayon::prelude::*;

/// Weeks covered by the weekly trend.
const TREND_WEEKS: u32 = 8;

/// A history prompt with its score.
struct ScoredPrompt {
    prompt: Prompt,
    score: Score,
}

/// Time-bucketed averages, from the database or computed in memory.
#[derive(Default)]
struct Aggregates {
    hourly: Vec<BucketAverage>,
    weekday: Vec<BucketAverage>,
    weekly: Vec<WeeklyAverage>,
}

pub fn handle_analyze(args: &AnalyzeArgs, config: &LazyMeterConfig) -> Result<()> {
    let formatting = if args.plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    };

    let report = build_report(args, config)?;
    output::output_report(&report, args.format, args.output.as_deref(), formatting)
}

/// Read, score, persist and summarize history according to `args`.
pub fn build_report(args: &AnalyzeArgs, config: &LazyMeterConfig) -> Result<Report> {
    let reader = history_reader(args, config)?;
    let filter = history_filter(args, config);
    let prompts: Vec<Prompt> = reader
        .prompts(&filter)
        .with_context(|| format!("Failed to read history from {}", reader.path().display()))?
        .collect();
    log::info!(
        "Read {} prompts from {}",
        prompts.len(),
        reader.path().display()
    );

    let custom = custom_library(config)?;
    let library = custom.as_ref().unwrap_or_else(|| PatternLibrary::builtin());
    let scored = score_prompts(prompts, PromptScorer::new(library));

    let aggregates = if args.no_store {
        in_memory_aggregates(&scored, args)
    } else {
        persist_and_aggregate(&scored, args, config)?
    };

    let scores: Vec<f64> = scored.iter().map(|s| s.score.total).collect();
    let prompts_with_scores: Vec<(String, f64)> = scored
        .iter()
        .map(|s| (s.prompt.text.clone(), s.score.total))
        .collect();
    let paste_count = scored.iter().filter(|s| s.prompt.has_paste).count();

    let sessions = if args.session {
        let points: Vec<SessionPoint<'_>> = scored
            .iter()
            .map(|s| SessionPoint {
                timestamp: s.prompt.timestamp,
                project: &s.prompt.project,
                score: s.score.total,
            })
            .collect();
        group_sessions(
            &points,
            Duration::minutes(i64::from(config.report.session_gap_minutes)),
        )
    } else {
        Vec::new()
    };

    let input = ReportInput {
        scores: &scores,
        prompts_with_scores: &prompts_with_scores,
        hourly: &aggregates.hourly,
        weekday: &aggregates.weekday,
        weekly: &aggregates.weekly,
        sessions: &sessions,
        paste_count,
        total_prompts: scored.len(),
        days: report_days(args, config),
    };
    Ok(generate_report(&input, &report_options(args, config)))
}

fn history_reader(args: &AnalyzeArgs, config: &LazyMeterConfig) -> Result<HistoryReader> {
    match &args.history {
        Some(path) => {
            let reader = HistoryReader::new(path);
            if !reader.exists() {
                return Err(LazyMeterError::HistoryNotFound(path.clone()).into());
            }
            Ok(reader)
        }
        None => Ok(HistoryReader::new(config.history_path())),
    }
}

fn report_days(args: &AnalyzeArgs, config: &LazyMeterConfig) -> u32 {
    if args.today || args.yesterday {
        1
    } else {
        args.days.unwrap_or(config.report.days)
    }
}

fn history_filter(args: &AnalyzeArgs, config: &LazyMeterConfig) -> HistoryFilter {
    let window = if args.today {
        DayWindow::Today
    } else if args.yesterday {
        DayWindow::Yesterday
    } else {
        DayWindow::All
    };

    HistoryFilter {
        limit: args.limit,
        days: Some(args.days.unwrap_or(config.report.days)),
        project: args.project.clone(),
        skip_commands: true,
        window,
    }
}

fn report_options(args: &AnalyzeArgs, config: &LazyMeterConfig) -> ReportOptions {
    ReportOptions {
        show_shame: !args.no_shame,
        show_pride: !args.no_pride,
        show_stamina: args.stamina,
        show_session: args.session,
        show_trend: args.trend,
        shame_limit: config.report.shame_limit,
        fame_limit: config.report.fame_limit,
        preview_chars: config.report.preview_chars,
        max_session_positions: config.report.max_session_positions,
    }
}

fn score_prompts(prompts: Vec<Prompt>, scorer: PromptScorer<'_>) -> Vec<ScoredPrompt> {
    prompts
        .into_par_iter()
        .map(|prompt| {
            let score = scorer.score(&prompt.text);
            ScoredPrompt { prompt, score }
        })
        .collect()
}

fn persist_and_aggregate(
    scored: &[ScoredPrompt],
    args: &AnalyzeArgs,
    config: &LazyMeterConfig,
) -> Result<Aggregates> {
    let path = args.database.clone().unwrap_or_else(|| config.database_path());
    let mut db = ScoreDatabase::open(&path)
        .with_context(|| format!("Failed to open score database {}", path.display()))?;

    let records: Vec<ScoreRecord<'_>> = scored
        .iter()
        .map(|s| ScoreRecord {
            text: &s.prompt.text,
            score: s.score.total,
            category: s.score.category,
            timestamp: s.prompt.timestamp,
            project: &s.prompt.project,
        })
        .collect();
    db.store_batch(&records)?;

    let mut aggregates = Aggregates::default();
    if args.stamina {
        aggregates.hourly = db.hourly_averages()?;
        aggregates.weekday = db.day_of_week_averages()?;
    }
    if args.trend {
        aggregates.weekly = db.weekly_averages(TREND_WEEKS)?;
    }
    Ok(aggregates)
}

fn in_memory_aggregates(scored: &[ScoredPrompt], args: &AnalyzeArgs) -> Aggregates {
    let points = || scored.iter().map(|s| (s.prompt.timestamp, s.score.total));

    let mut aggregates = Aggregates::default();
    if args.stamina {
        aggregates.hourly = aggregate::hourly_averages(points());
        aggregates.weekday = aggregate::day_of_week_averages(points());
    }
    if args.trend {
        let since = aggregate::trend_start(Local::now(), TREND_WEEKS);
        aggregates.weekly = aggregate::weekly_averages_since(points(), since);
    }
    aggregates
}
