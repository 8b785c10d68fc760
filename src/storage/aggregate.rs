//! Time-bucketed score averages.
//!
//! Buckets keep a running sum and count; an empty bucket reports no average
//! instead of dividing by zero.

use chrono::{DateTime, Datelike, Duration, Local, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;

pub const HOURS_PER_DAY: usize = 24;
pub const DAYS_PER_WEEK: usize = 7;
pub const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BucketStats {
    sum: f64,
    count: usize,
}

impl BucketStats {
    pub fn push(&mut self, score: f64) {
        self.sum += score;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Average for one bucket (an hour of the day or a weekday, Monday = 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BucketAverage {
    pub bucket: usize,
    pub avg_score: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyAverage {
    /// `YYYY-WW`, weeks starting on Monday
    pub week: String,
    pub avg_score: f64,
    pub count: usize,
}

fn fixed_buckets<I, F>(scores: I, size: usize, key: F) -> Vec<BucketAverage>
where
    I: IntoIterator<Item = (DateTime<Local>, f64)>,
    F: Fn(&DateTime<Local>) -> usize,
{
    let mut stats = vec![BucketStats::default(); size];
    for (timestamp, score) in scores {
        stats[key(&timestamp) % size].push(score);
    }

    stats
        .iter()
        .enumerate()
        .map(|(bucket, s)| BucketAverage {
            bucket,
            avg_score: s.average(),
            count: s.count(),
        })
        .collect()
}

/// Exactly 24 buckets, indexed by local hour.
pub fn hourly_averages<I>(scores: I) -> Vec<BucketAverage>
where
    I: IntoIterator<Item = (DateTime<Local>, f64)>,
{
    fixed_buckets(scores, HOURS_PER_DAY, |t| t.hour() as usize)
}

/// Exactly 7 buckets, Monday = 0.
pub fn day_of_week_averages<I>(scores: I) -> Vec<BucketAverage>
where
    I: IntoIterator<Item = (DateTime<Local>, f64)>,
{
    fixed_buckets(scores, DAYS_PER_WEEK, |t| {
        t.weekday().num_days_from_monday() as usize
    })
}

/// Populated weeks only, oldest first.
pub fn weekly_averages<I>(scores: I) -> Vec<WeeklyAverage>
where
    I: IntoIterator<Item = (DateTime<Local>, f64)>,
{
    let mut weeks: BTreeMap<String, BucketStats> = BTreeMap::new();
    for (timestamp, score) in scores {
        weeks
            .entry(timestamp.format("%Y-%W").to_string())
            .or_default()
            .push(score);
    }

    weeks
        .into_iter()
        .filter_map(|(week, stats)| {
            stats.average().map(|avg_score| WeeklyAverage {
                week,
                avg_score,
                count: stats.count(),
            })
        })
        .collect()
}

/// Start of a `weeks`-long trend window ending at `now`.
pub fn trend_start(now: DateTime<Local>, weeks: u32) -> DateTime<Local> {
    now - Duration::weeks(i64::from(weeks))
}

/// [`weekly_averages`] over scores at or after `since`, compared in whole
/// seconds to match the stored timestamps.
pub fn weekly_averages_since<I>(scores: I, since: DateTime<Local>) -> Vec<WeeklyAverage>
where
    I: IntoIterator<Item = (DateTime<Local>, f64)>,
{
    let cutoff = since.timestamp();
    weekly_averages(
        scores
            .into_iter()
            .filter(|(timestamp, _)| timestamp.timestamp() >= cutoff),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Local> {
        // March 2026: the 2nd is a Monday
        Local
            .with_ymd_and_hms(2026, 3, day, hour, 15, 0)
            .single()
            .unwrap()
    }

    #[test]
    fn test_empty_bucket_has_no_average() {
        let stats = BucketStats::default();
        assert_eq!(stats.average(), None);
        assert_eq!(stats.count(), 0);
    }

    #[test]
    fn test_hourly_averages_fill_all_hours() {
        let hours = hourly_averages(vec![(at(2, 9), 4.0), (at(3, 9), 6.0), (at(2, 22), 2.0)]);
        assert_eq!(hours.len(), 24);
        assert_eq!(hours[9].avg_score, Some(5.0));
        assert_eq!(hours[9].count, 2);
        assert_eq!(hours[22].avg_score, Some(2.0));
        assert_eq!(hours[0].avg_score, None);
        assert_eq!(hours[0].count, 0);
    }

    #[test]
    fn test_day_of_week_is_monday_based() {
        let days = day_of_week_averages(vec![(at(2, 10), 3.0), (at(8, 10), 7.0)]);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].avg_score, Some(3.0));
        assert_eq!(days[6].avg_score, Some(7.0));
        assert_eq!(days[3].count, 0);
    }

    #[test]
    fn test_weekly_averages_sorted_and_populated_only() {
        let weeks = weekly_averages(vec![(at(10, 10), 8.0), (at(2, 10), 2.0), (at(3, 10), 4.0)]);
        assert_eq!(weeks.len(), 2);
        assert!(weeks[0].week < weeks[1].week);
        assert_eq!(weeks[0].avg_score, 3.0);
        assert_eq!(weeks[0].count, 2);
        assert_eq!(weeks[1].avg_score, 8.0);
    }

    #[test]
    fn test_weekly_averages_since_drops_older_weeks() {
        let since = trend_start(at(16, 10), 1);
        assert_eq!(since, at(9, 10));

        let weeks = weekly_averages_since(
            vec![(at(2, 10), 2.0), (at(9, 10), 4.0), (at(10, 10), 8.0)],
            since,
        );
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].avg_score, 6.0);
        assert_eq!(weeks[0].count, 2);
    }
}
