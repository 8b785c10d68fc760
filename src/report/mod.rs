//! Report Builder
//!
//! Summarizes a set of scores into a serializable [`Report`] and renders it
//! as ASCII for terminals. An empty score set produces [`Report::NoData`]
//! rather than numeric errors.

pub mod ascii;
pub mod charts;

pub use ascii::format_ascii_report;
pub use charts::{bar_chart, sparkline};

use crate::scoring::{round_to, Category};
use crate::storage::{BucketAverage, WeeklyAverage, WEEKDAY_NAMES};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Week-over-week change beyond which the trend is not "stable".
pub const TREND_THRESHOLD: f64 = 0.2;

/// Inputs for one report. Empty slices mean "not available".
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportInput<'a> {
    pub scores: &'a [f64],
    /// (prompt text, score)
    pub prompts_with_scores: &'a [(String, f64)],
    pub hourly: &'a [BucketAverage],
    pub weekday: &'a [BucketAverage],
    pub weekly: &'a [WeeklyAverage],
    pub sessions: &'a [Vec<f64>],
    pub paste_count: usize,
    pub total_prompts: usize,
    pub days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub show_shame: bool,
    pub show_pride: bool,
    pub show_stamina: bool,
    pub show_session: bool,
    pub show_trend: bool,
    pub shame_limit: usize,
    pub fame_limit: usize,
    pub preview_chars: usize,
    pub max_session_positions: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            show_shame: true,
            show_pride: true,
            show_stamina: false,
            show_session: false,
            show_trend: false,
            shame_limit: 5,
            fame_limit: 5,
            preview_chars: 80,
            max_session_positions: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    NoData(NoData),
    Full(Box<PromptReport>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoData {
    pub error: String,
    pub prompts_analyzed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptReport {
    pub summary: Summary,
    pub distribution: Distribution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paste_reliance: Option<PasteReliance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hall_of_shame: Option<Vec<RankedPrompt>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hall_of_fame: Option<Vec<RankedPrompt>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stamina: Option<Stamina>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_pattern: Option<Vec<PositionAverage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_trend: Option<Vec<WeeklyAverage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_direction: Option<TrendDirection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub prompts_analyzed: usize,
    pub time_period_days: u32,
    pub average_score: f64,
    pub median_score: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryShare {
    pub count: usize,
    pub percent: f64,
}

/// Count and share of each category, in fixed category order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Distribution {
    pub grunt: CategoryShare,
    pub minimal: CategoryShare,
    pub adequate: CategoryShare,
    pub solid: CategoryShare,
    pub excellent: CategoryShare,
}

impl Distribution {
    pub fn get(&self, category: Category) -> &CategoryShare {
        match category {
            Category::Grunt => &self.grunt,
            Category::Minimal => &self.minimal,
            Category::Adequate => &self.adequate,
            Category::Solid => &self.solid,
            Category::Excellent => &self.excellent,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut CategoryShare {
        match category {
            Category::Grunt => &mut self.grunt,
            Category::Minimal => &mut self.minimal,
            Category::Adequate => &mut self.adequate,
            Category::Solid => &mut self.solid,
            Category::Excellent => &mut self.excellent,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryShare)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PasteReliance {
    pub prompts_with_paste: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPrompt {
    pub text: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BucketSummary {
    pub avg: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: &'static str,
    pub avg: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stamina {
    /// Populated hours only, keyed by hour of day
    pub by_hour: BTreeMap<usize, BucketSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_day: Option<Vec<DaySummary>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionAverage {
    /// 1-based position within a session
    pub position: usize,
    pub avg_score: f64,
    pub sample_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }
}

fn by_score(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// Upper median: the element at index `len / 2` of the sorted scores.
pub fn median(scores: &[f64]) -> Option<f64> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(by_score);
    sorted.get(sorted.len() / 2).copied()
}

pub fn distribution(scores: &[f64]) -> Distribution {
    let mut dist = Distribution::default();
    if scores.is_empty() {
        return dist;
    }

    for &score in scores {
        dist.get_mut(Category::from_total(score)).count += 1;
    }
    let total = scores.len() as f64;
    for category in Category::ALL {
        let share = dist.get_mut(category);
        share.percent = share.count as f64 / total * 100.0;
    }
    dist
}

/// Lowest-scoring prompts, worst first. Ties keep input order.
pub fn hall_of_shame(prompts: &[(String, f64)], limit: usize) -> Vec<&(String, f64)> {
    let mut sorted: Vec<_> = prompts.iter().collect();
    sorted.sort_by(|a, b| by_score(&a.1, &b.1));
    sorted.truncate(limit);
    sorted
}

/// Highest-scoring prompts, best first. Ties keep input order.
pub fn hall_of_fame(prompts: &[(String, f64)], limit: usize) -> Vec<&(String, f64)> {
    let mut sorted: Vec<_> = prompts.iter().collect();
    sorted.sort_by(|a, b| by_score(&b.1, &a.1));
    sorted.truncate(limit);
    sorted
}

/// Average score at each position across sessions.
pub fn session_pattern(sessions: &[Vec<f64>], max_positions: usize) -> Vec<PositionAverage> {
    let longest = sessions.iter().map(Vec::len).max().unwrap_or(0);

    (0..longest.min(max_positions))
        .filter_map(|pos| {
            let at_position: Vec<f64> = sessions
                .iter()
                .filter_map(|s| s.get(pos).copied())
                .collect();
            mean(&at_position).map(|avg| PositionAverage {
                position: pos + 1,
                avg_score: round_to(avg, 1),
                sample_size: at_position.len(),
            })
        })
        .collect()
}

/// Compare the last two weeks. Needs at least two populated weeks.
pub fn trend_direction(weekly: &[WeeklyAverage]) -> Option<TrendDirection> {
    let [.., previous, recent] = weekly else {
        return None;
    };
    let change = recent.avg_score - previous.avg_score;
    Some(if change > TREND_THRESHOLD {
        TrendDirection::Improving
    } else if change < -TREND_THRESHOLD {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    })
}

/// First `max_chars` characters, with `...` when cut.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn ranked(prompts: Vec<&(String, f64)>, preview_chars: usize) -> Vec<RankedPrompt> {
    prompts
        .into_iter()
        .map(|(text, score)| RankedPrompt {
            text: truncate_preview(text, preview_chars),
            score: *score,
        })
        .collect()
}

fn stamina(hourly: &[BucketAverage], weekday: &[BucketAverage]) -> Option<Stamina> {
    let by_hour: BTreeMap<usize, BucketSummary> = hourly
        .iter()
        .filter_map(|b| {
            b.avg_score.map(|avg| {
                (
                    b.bucket,
                    BucketSummary {
                        avg: round_to(avg, 1),
                        count: b.count,
                    },
                )
            })
        })
        .collect();

    if by_hour.is_empty() {
        return None;
    }

    let by_day: Vec<DaySummary> = weekday
        .iter()
        .filter_map(|b| {
            let day = *WEEKDAY_NAMES.get(b.bucket)?;
            b.avg_score.map(|avg| DaySummary {
                day,
                avg: round_to(avg, 1),
                count: b.count,
            })
        })
        .collect();

    Some(Stamina {
        by_hour,
        by_day: (!by_day.is_empty()).then_some(by_day),
    })
}

pub fn generate_report(input: &ReportInput<'_>, options: &ReportOptions) -> Report {
    let Some(average) = mean(input.scores) else {
        return Report::NoData(NoData {
            error: "No prompts found".to_string(),
            prompts_analyzed: 0,
        });
    };
    let median = median(input.scores).unwrap_or(average);

    let paste_reliance = (input.total_prompts > 0).then(|| PasteReliance {
        prompts_with_paste: input.paste_count,
        percent: round_to(
            input.paste_count as f64 / input.total_prompts as f64 * 100.0,
            1,
        ),
    });

    let hall_of_shame = options.show_shame.then(|| {
        ranked(
            hall_of_shame(input.prompts_with_scores, options.shame_limit),
            options.preview_chars,
        )
    });
    let hall_of_fame = options.show_pride.then(|| {
        ranked(
            hall_of_fame(input.prompts_with_scores, options.fame_limit),
            options.preview_chars,
        )
    });

    let stamina = if options.show_stamina {
        stamina(input.hourly, input.weekday)
    } else {
        None
    };

    let session_pattern = (options.show_session && !input.sessions.is_empty())
        .then(|| session_pattern(input.sessions, options.max_session_positions));

    let (weekly_trend, trend_direction) = if options.show_trend && !input.weekly.is_empty() {
        (Some(input.weekly.to_vec()), trend_direction(input.weekly))
    } else {
        (None, None)
    };

    Report::Full(Box::new(PromptReport {
        summary: Summary {
            prompts_analyzed: input.scores.len(),
            time_period_days: input.days,
            average_score: round_to(average, 1),
            median_score: round_to(median, 1),
        },
        distribution: distribution(input.scores),
        paste_reliance,
        hall_of_shame,
        hall_of_fame,
        stamina,
        session_pattern,
        weekly_trend,
        trend_direction,
    }))
}

/// Pretty-printed JSON for a report.
pub fn to_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
