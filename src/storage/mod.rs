//! Score Store
//!
//! SQLite persistence for historical scores and trend queries. The schema is
//! created on open (`IF NOT EXISTS`); there are no migrations.
//!
//! Rows are keyed by [`hash_prompt`] over the prompt text and timestamp, and
//! writes are `INSERT OR REPLACE`, so re-scoring the same history is
//! idempotent.

pub mod aggregate;

pub use aggregate::{BucketAverage, BucketStats, WeeklyAverage, WEEKDAY_NAMES};

use crate::errors::Result;
use crate::scoring::Category;
use chrono::{DateTime, Duration, Local, SecondsFormat};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use sha2::{Digest, Sha256};
use std::path::Path;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS scores (
        prompt_hash TEXT PRIMARY KEY,
        score REAL,
        category TEXT,
        timestamp INTEGER,
        project TEXT,
        text_preview TEXT,
        created_at INTEGER DEFAULT (strftime('%s', 'now'))
    );
    CREATE INDEX IF NOT EXISTS idx_timestamp ON scores(timestamp);
    CREATE INDEX IF NOT EXISTS idx_project ON scores(project);
";

const UPSERT: &str = "
    INSERT OR REPLACE INTO scores
    (prompt_hash, score, category, timestamp, project, text_preview)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
";

const PREVIEW_CHARS: usize = 100;

/// Stable identity for a prompt: first 16 hex digits of SHA-256 over
/// `"{text}:{timestamp}"`.
pub fn hash_prompt(text: &str, timestamp: &DateTime<Local>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(b":");
    hasher.update(
        timestamp
            .to_rfc3339_opts(SecondsFormat::AutoSi, false)
            .as_bytes(),
    );
    let digest = format!("{:x}", hasher.finalize());
    digest[..16].to_string()
}

/// First 100 characters of `text`, with `...` appended when cut.
pub fn text_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// A score to persist.
#[derive(Debug, Clone, Copy)]
pub struct ScoreRecord<'a> {
    pub text: &'a str,
    pub score: f64,
    pub category: Category,
    pub timestamp: DateTime<Local>,
    pub project: &'a str,
}

/// A score record read back from the database.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredScore {
    pub prompt_hash: String,
    pub score: f64,
    /// Always re-derived from `score`
    pub category: Category,
    pub timestamp: DateTime<Local>,
    pub project: String,
    pub text_preview: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreQuery {
    pub days: Option<u32>,
    /// Substring of the project
    pub project: Option<String>,
    pub limit: Option<usize>,
}

fn from_epoch_seconds(seconds: i64) -> Option<DateTime<Local>> {
    DateTime::from_timestamp(seconds, 0).map(|utc| utc.with_timezone(&Local))
}

fn cutoff_seconds(now: DateTime<Local>, days: i64) -> i64 {
    (now - Duration::days(days)).timestamp()
}

fn stored_score_from_row(row: &Row<'_>) -> rusqlite::Result<(StoredScore, String)> {
    let score: f64 = row.get("score")?;
    let timestamp: i64 = row.get("timestamp")?;
    let category: Option<String> = row.get("category")?;
    Ok((
        StoredScore {
            prompt_hash: row.get("prompt_hash")?,
            score,
            category: Category::from_total(score),
            timestamp: from_epoch_seconds(timestamp).unwrap_or_default(),
            project: row.get::<_, Option<String>>("project")?.unwrap_or_default(),
            text_preview: row
                .get::<_, Option<String>>("text_preview")?
                .unwrap_or_default(),
        },
        category.unwrap_or_default(),
    ))
}

/// Handle to a score database. Pass it explicitly; there is no global
/// connection.
pub struct ScoreDatabase {
    conn: Connection,
}

impl ScoreDatabase {
    /// Open (creating if needed) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                crate::io::ensure_dir(parent)?;
            }
        }
        log::debug!("Opening score database at {}", path.display());
        Self::initialize(Connection::open(path)?)
    }

    /// A private database that disappears when dropped.
    pub fn in_memory() -> Result<Self> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn store(&self, record: &ScoreRecord<'_>) -> Result<()> {
        self.conn.execute(
            UPSERT,
            params![
                hash_prompt(record.text, &record.timestamp),
                record.score,
                Category::from_total(record.score).as_str(),
                record.timestamp.timestamp(),
                record.project,
                text_preview(record.text),
            ],
        )?;
        Ok(())
    }

    /// Store many scores in one transaction. Returns the number written.
    pub fn store_batch(&mut self, records: &[ScoreRecord<'_>]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(UPSERT)?;
            for record in records {
                stmt.execute(params![
                    hash_prompt(record.text, &record.timestamp),
                    record.score,
                    Category::from_total(record.score).as_str(),
                    record.timestamp.timestamp(),
                    record.project,
                    text_preview(record.text),
                ])?;
            }
        }
        tx.commit()?;
        log::info!("Stored {} scores", records.len());
        Ok(records.len())
    }

    /// Scores matching `query`, most recent first.
    pub fn query(&self, query: &ScoreQuery) -> Result<Vec<StoredScore>> {
        self.query_at(query, Local::now())
    }

    pub fn query_at(&self, query: &ScoreQuery, now: DateTime<Local>) -> Result<Vec<StoredScore>> {
        let mut sql = String::from("SELECT * FROM scores WHERE 1=1");
        let mut values: Vec<Value> = Vec::new();

        if let Some(days) = query.days.filter(|&d| d > 0) {
            sql.push_str(" AND timestamp >= ?");
            values.push(Value::Integer(cutoff_seconds(now, i64::from(days))));
        }
        if let Some(project) = query.project.as_deref().filter(|p| !p.is_empty()) {
            sql.push_str(" AND project LIKE ?");
            values.push(Value::Text(format!("%{project}%")));
        }
        sql.push_str(" ORDER BY timestamp DESC");
        if let Some(limit) = query.limit.filter(|&n| n > 0) {
            sql.push_str(" LIMIT ?");
            values.push(Value::Integer(limit as i64));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values), stored_score_from_row)?;

        let mut scores = Vec::new();
        for row in rows {
            let (stored, category_text) = row?;
            if category_text != stored.category.as_str() {
                log::debug!(
                    "Re-derived category for {}: stored '{}', now '{}'",
                    stored.prompt_hash,
                    category_text,
                    stored.category
                );
            }
            scores.push(stored);
        }
        Ok(scores)
    }

    fn timestamped_scores(&self, since: Option<i64>) -> Result<Vec<(DateTime<Local>, f64)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT timestamp, score FROM scores WHERE timestamp >= ?1")?;
        let rows = stmt.query_map([since.unwrap_or(i64::MIN)], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, f64>(1)?))
        })?;

        let mut scores = Vec::new();
        for row in rows {
            let (seconds, score) = row?;
            match from_epoch_seconds(seconds) {
                Some(timestamp) => scores.push((timestamp, score)),
                None => log::warn!("Ignoring stored score with invalid timestamp {}", seconds),
            }
        }
        Ok(scores)
    }

    /// Average score per week over the last `weeks` weeks.
    pub fn weekly_averages(&self, weeks: u32) -> Result<Vec<WeeklyAverage>> {
        let since = aggregate::trend_start(Local::now(), weeks);
        let scores = self.timestamped_scores(Some(since.timestamp()))?;
        Ok(aggregate::weekly_averages_since(scores, since))
    }

    /// 24 buckets by local hour of day.
    pub fn hourly_averages(&self) -> Result<Vec<BucketAverage>> {
        Ok(aggregate::hourly_averages(self.timestamped_scores(None)?))
    }

    /// 7 buckets by local weekday, Monday = 0.
    pub fn day_of_week_averages(&self) -> Result<Vec<BucketAverage>> {
        Ok(aggregate::day_of_week_averages(
            self.timestamped_scores(None)?,
        ))
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM scores", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete scores older than `days` days. Returns the number removed.
    pub fn clear_older_than(&self, days: u32) -> Result<usize> {
        let cutoff = cutoff_seconds(Local::now(), i64::from(days));
        let removed = self
            .conn
            .execute("DELETE FROM scores WHERE timestamp < ?1", [cutoff])?;
        log::info!("Removed {} scores older than {} days", removed, days);
        Ok(removed)
    }
}
