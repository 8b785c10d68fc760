//! History Reader
//!
//! Reads user prompts from a JSON Lines history file (one object per line
//! with `display`, `timestamp` in epoch milliseconds, `project`, and
//! `pastedContents`). Records are produced lazily, one line at a time;
//! malformed lines are skipped without failing the stream.

pub mod cleanse;

pub use cleanse::{is_command, strip_paste_markers};

use crate::errors::Result;
use chrono::{DateTime, Duration, Local, TimeZone};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines};
use std::path::{Path, PathBuf};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// A single user prompt from history.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    /// Typed text only (paste and image markers stripped)
    pub text: String,
    pub timestamp: DateTime<Local>,
    pub project: String,
    /// Whether pasted content was attached
    pub has_paste: bool,
    /// Original display field
    pub raw_display: String,
}

#[derive(Debug, Deserialize)]
struct HistoryEntry {
    #[serde(default)]
    display: Option<String>,
    #[serde(default)]
    timestamp: Option<f64>,
    #[serde(default)]
    project: Option<String>,
    #[serde(default, rename = "pastedContents")]
    pasted_contents: Option<serde_json::Value>,
}

fn has_content(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Calendar restriction relative to local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayWindow {
    #[default]
    All,
    /// Since local midnight
    Today,
    /// From the previous local midnight up to (excluding) today's
    Yesterday,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Maximum number of prompts to yield
    pub limit: Option<usize>,
    /// Only prompts from the last N days (ignored when a day window is set)
    pub days: Option<u32>,
    /// Case-insensitive substring of the project path
    pub project: Option<String>,
    pub skip_commands: bool,
    pub window: DayWindow,
}

impl Default for HistoryFilter {
    fn default() -> Self {
        Self {
            limit: None,
            days: None,
            project: None,
            skip_commands: true,
            window: DayWindow::All,
        }
    }
}

/// Half-open millisecond range `[start, end)`; `None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeBounds {
    pub start_ms: Option<i64>,
    pub end_ms: Option<i64>,
}

impl TimeBounds {
    pub fn contains(&self, timestamp_ms: i64) -> bool {
        self.start_ms.is_none_or(|start| timestamp_ms >= start)
            && self.end_ms.is_none_or(|end| timestamp_ms < end)
    }
}

fn local_midnight(now: DateTime<Local>) -> Option<DateTime<Local>> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(Local)
        .earliest()
}

impl HistoryFilter {
    /// Resolve the time restriction against `now`.
    pub fn bounds(&self, now: DateTime<Local>) -> TimeBounds {
        match self.window {
            DayWindow::Today => TimeBounds {
                start_ms: local_midnight(now).map(|m| m.timestamp_millis()),
                end_ms: None,
            },
            DayWindow::Yesterday => match local_midnight(now) {
                Some(today) => TimeBounds {
                    start_ms: Some((today - Duration::days(1)).timestamp_millis()),
                    end_ms: Some(today.timestamp_millis()),
                },
                None => TimeBounds::default(),
            },
            DayWindow::All => TimeBounds {
                start_ms: self
                    .days
                    .filter(|&d| d > 0)
                    .map(|d| now.timestamp_millis() - i64::from(d) * MILLIS_PER_DAY),
                end_ms: None,
            },
        }
    }

    fn project_needle(&self) -> Option<String> {
        self.project
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(str::to_lowercase)
    }

    fn effective_limit(&self) -> Option<usize> {
        self.limit.filter(|&n| n > 0)
    }
}

/// Reader over a history file. Every call to [`HistoryReader::prompts`]
/// starts again from the top of the file.
#[derive(Debug, Clone)]
pub struct HistoryReader {
    path: PathBuf,
}

impl HistoryReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        crate::io::file_exists(&self.path)
    }

    /// Lazily yield prompts matching `filter`, with time bounds resolved
    /// against the current local time.
    pub fn prompts(&self, filter: &HistoryFilter) -> Result<Prompts> {
        self.prompts_at(filter, Local::now())
    }

    pub fn prompts_at(&self, filter: &HistoryFilter, now: DateTime<Local>) -> Result<Prompts> {
        let lines = match File::open(&self.path) {
            Ok(file) => Some(BufReader::new(file).lines()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("History file {} not found", self.path.display());
                None
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Prompts {
            lines,
            bounds: filter.bounds(now),
            project: filter.project_needle(),
            skip_commands: filter.skip_commands,
            limit: filter.effective_limit(),
            yielded: 0,
        })
    }

    /// Sorted unique project names, commands included.
    pub fn projects(&self) -> Result<Vec<String>> {
        let filter = HistoryFilter {
            skip_commands: false,
            ..HistoryFilter::default()
        };
        let projects: BTreeSet<String> = self
            .prompts(&filter)?
            .map(|prompt| prompt.project)
            .filter(|project| !project.is_empty())
            .collect();
        Ok(projects.into_iter().collect())
    }
}

/// Lazy stream of prompts from a history file.
pub struct Prompts {
    lines: Option<Lines<BufReader<File>>>,
    bounds: TimeBounds,
    project: Option<String>,
    skip_commands: bool,
    limit: Option<usize>,
    yielded: usize,
}

impl Prompts {
    fn accept(&self, line: &str) -> Option<Prompt> {
        let entry: HistoryEntry = match serde_json::from_str(line) {
            Ok(entry) => entry,
            Err(e) => {
                log::trace!("Skipping malformed history line: {}", e);
                return None;
            }
        };

        let display = entry.display.unwrap_or_default();
        let timestamp_ms = entry.timestamp.unwrap_or(0.0) as i64;
        let project = entry.project.unwrap_or_default();

        if !self.bounds.contains(timestamp_ms) {
            return None;
        }
        if self.skip_commands && is_command(&display) {
            return None;
        }
        if let Some(needle) = &self.project {
            if !project.to_lowercase().contains(needle) {
                return None;
            }
        }

        let text = strip_paste_markers(&display);
        if text.is_empty() {
            return None;
        }

        let Some(timestamp) = Local.timestamp_millis_opt(timestamp_ms).single() else {
            log::trace!("Skipping history entry with invalid timestamp {}", timestamp_ms);
            return None;
        };

        Some(Prompt {
            text,
            timestamp,
            project,
            has_paste: entry.pasted_contents.as_ref().is_some_and(has_content),
            raw_display: display,
        })
    }
}

impl Iterator for Prompts {
    type Item = Prompt;

    fn next(&mut self) -> Option<Prompt> {
        loop {
            if self.limit.is_some_and(|limit| self.yielded >= limit) {
                return None;
            }

            let line = match self.lines.as_mut()?.next()? {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    log::trace!("Skipping non-UTF-8 history line");
                    continue;
                }
                Err(e) => {
                    log::warn!("Stopped reading history: {}", e);
                    return None;
                }
            };

            if let Some(prompt) = self.accept(&line) {
                self.yielded += 1;
                return Some(prompt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon(year: i32, month: u32, day: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .unwrap()
    }

    #[test]
    fn test_days_bound() {
        let now = noon(2026, 3, 10);
        let filter = HistoryFilter {
            days: Some(2),
            ..HistoryFilter::default()
        };
        let bounds = filter.bounds(now);
        assert_eq!(
            bounds.start_ms,
            Some(now.timestamp_millis() - 2 * MILLIS_PER_DAY)
        );
        assert_eq!(bounds.end_ms, None);
    }

    #[test]
    fn test_zero_days_means_unbounded() {
        let filter = HistoryFilter {
            days: Some(0),
            ..HistoryFilter::default()
        };
        assert_eq!(filter.bounds(noon(2026, 3, 10)), TimeBounds::default());
    }

    #[test]
    fn test_yesterday_window_is_half_open() {
        let now = noon(2026, 3, 10);
        let filter = HistoryFilter {
            window: DayWindow::Yesterday,
            ..HistoryFilter::default()
        };
        let bounds = filter.bounds(now);
        let today_midnight = Local
            .with_ymd_and_hms(2026, 3, 10, 0, 0, 0)
            .single()
            .unwrap()
            .timestamp_millis();

        assert!(bounds.contains(noon(2026, 3, 9).timestamp_millis()));
        assert!(!bounds.contains(today_midnight));
        assert!(!bounds.contains(now.timestamp_millis()));
    }

    #[test]
    fn test_today_window_overrides_days() {
        let now = noon(2026, 3, 10);
        let filter = HistoryFilter {
            days: Some(30),
            window: DayWindow::Today,
            ..HistoryFilter::default()
        };
        let bounds = filter.bounds(now);
        assert!(!bounds.contains(noon(2026, 3, 9).timestamp_millis()));
        assert!(bounds.contains(now.timestamp_millis()));
    }

    #[test]
    fn test_has_content() {
        assert!(!has_content(&serde_json::json!({})));
        assert!(!has_content(&serde_json::Value::Null));
        assert!(has_content(&serde_json::json!({"1": {"content": "x"}})));
    }
}
