//! Session grouping for the session-position trend.
//!
//! A session is a run of prompts in one project where each prompt follows
//! the previous one within the configured gap.

use chrono::{DateTime, Duration, Local};

#[derive(Debug, Clone, Copy)]
pub struct SessionPoint<'a> {
    pub timestamp: DateTime<Local>,
    pub project: &'a str,
    pub score: f64,
}

/// Group points into sessions. Each session is the list of its scores in
/// time order; sessions are ordered by project, then by start time.
pub fn group_sessions(points: &[SessionPoint<'_>], max_gap: Duration) -> Vec<Vec<f64>> {
    let mut ordered: Vec<&SessionPoint<'_>> = points.iter().collect();
    ordered.sort_by(|a, b| {
        a.project
            .cmp(b.project)
            .then_with(|| a.timestamp.cmp(&b.timestamp))
    });

    let mut sessions: Vec<Vec<f64>> = Vec::new();
    let mut previous: Option<&SessionPoint<'_>> = None;

    for point in ordered {
        let continues = previous.is_some_and(|prev| {
            prev.project == point.project && point.timestamp - prev.timestamp <= max_gap
        });

        match sessions.last_mut() {
            Some(current) if continues => current.push(point.score),
            _ => sessions.push(vec![point.score]),
        }
        previous = Some(point);
    }

    sessions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 4, 1, 10, 0, 0)
            .single()
            .unwrap()
            + Duration::minutes(i64::from(minute))
    }

    fn point(minute: u32, project: &str, score: f64) -> SessionPoint<'_> {
        SessionPoint {
            timestamp: at(minute),
            project,
            score,
        }
    }

    #[test]
    fn test_gap_splits_sessions() {
        let points = [
            point(0, "api", 3.0),
            point(10, "api", 5.0),
            point(90, "api", 7.0),
        ];
        let sessions = group_sessions(&points, Duration::minutes(30));
        assert_eq!(sessions, vec![vec![3.0, 5.0], vec![7.0]]);
    }

    #[test]
    fn test_projects_never_share_a_session() {
        let points = [
            point(5, "web", 2.0),
            point(0, "api", 4.0),
            point(1, "web", 6.0),
        ];
        let sessions = group_sessions(&points, Duration::minutes(30));
        assert_eq!(sessions, vec![vec![4.0], vec![6.0, 2.0]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_sessions(&[], Duration::minutes(30)).is_empty());
    }
}
