use chrono::{Duration, Local, TimeZone};
use lazymeter::storage::hash_prompt;
use lazymeter::{Category, ScoreDatabase, ScoreQuery, ScoreRecord};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn record<'a>(text: &'a str, score: f64, days_ago: i64, project: &'a str) -> ScoreRecord<'a> {
    ScoreRecord {
        text,
        score,
        category: Category::from_total(score),
        timestamp: Local::now() - Duration::days(days_ago),
        project,
    }
}

#[test]
fn store_is_idempotent_per_text_and_timestamp() {
    let db = ScoreDatabase::in_memory().unwrap();
    let first = record("Add pagination", 4.0, 1, "/api");
    db.store(&first).unwrap();
    db.store(&ScoreRecord { score: 6.5, category: Category::Solid, ..first }).unwrap();

    assert_eq!(db.count().unwrap(), 1);
    let stored = db.query(&ScoreQuery::default()).unwrap();
    assert_eq!(stored[0].score, 6.5);
    assert_eq!(stored[0].prompt_hash, hash_prompt("Add pagination", &first.timestamp));
}

#[test]
fn query_filters_and_orders_by_recency() {
    let mut db = ScoreDatabase::in_memory().unwrap();
    db.store_batch(&[
        record("old", 3.0, 40, "/web/app"),
        record("recent", 5.0, 2, "/web/app"),
        record("newest", 7.0, 1, "/cli/tool"),
        record("middle", 8.5, 5, "/web/app"),
    ])
    .unwrap();

    let recent: Vec<String> = db
        .query(&ScoreQuery {
            days: Some(30),
            ..ScoreQuery::default()
        })
        .unwrap()
        .into_iter()
        .map(|s| s.text_preview)
        .collect();
    assert_eq!(recent, vec!["newest", "recent", "middle"]);

    let web = db
        .query(&ScoreQuery {
            project: Some("web".to_string()),
            limit: Some(2),
            ..ScoreQuery::default()
        })
        .unwrap();
    assert_eq!(web.len(), 2);
    assert_eq!(web[0].text_preview, "recent");
    assert_eq!(web[1].category, Category::Excellent);
}

#[test]
fn category_is_rederived_on_read() {
    let db = ScoreDatabase::in_memory().unwrap();
    db.store(&ScoreRecord {
        category: Category::Grunt,
        ..record("mislabelled", 6.0, 0, "/p")
    })
    .unwrap();

    let stored = db.query(&ScoreQuery::default()).unwrap();
    assert_eq!(stored[0].category, Category::Adequate);
}

#[test]
fn long_text_is_stored_as_preview() {
    let db = ScoreDatabase::in_memory().unwrap();
    let long = "word ".repeat(40);
    db.store(&record(&long, 5.0, 0, "/p")).unwrap();

    let stored = db.query(&ScoreQuery::default()).unwrap();
    assert_eq!(stored[0].text_preview.chars().count(), 103);
    assert!(stored[0].text_preview.ends_with("..."));
}

#[test]
fn aggregates_handle_empty_buckets() {
    let db = ScoreDatabase::in_memory().unwrap();
    let at_nine = Local.with_ymd_and_hms(2026, 3, 4, 9, 0, 0).single().unwrap();
    db.store(&ScoreRecord {
        timestamp: at_nine,
        ..record("a", 4.0, 0, "/p")
    })
    .unwrap();
    db.store(&ScoreRecord {
        timestamp: at_nine + Duration::minutes(5),
        ..record("b", 6.0, 0, "/p")
    })
    .unwrap();

    let hourly = db.hourly_averages().unwrap();
    assert_eq!(hourly.len(), 24);
    assert_eq!(hourly[9].avg_score, Some(5.0));
    assert_eq!(hourly[9].count, 2);
    assert_eq!(hourly[10].avg_score, None);
    assert_eq!(hourly[10].count, 0);

    let weekdays = db.day_of_week_averages().unwrap();
    assert_eq!(weekdays.len(), 7);
    // 2026-03-04 is a Wednesday
    assert_eq!(weekdays[2].count, 2);
}

#[test]
fn weekly_averages_cover_recent_weeks_only() {
    let mut db = ScoreDatabase::in_memory().unwrap();
    db.store_batch(&[
        record("this week", 6.0, 0, "/p"),
        record("long ago", 2.0, 120, "/p"),
    ])
    .unwrap();

    let weeks = db.weekly_averages(8).unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].avg_score, 6.0);
    assert!(db.weekly_averages(8).unwrap().iter().all(|w| w.count > 0));
}

#[test]
fn clear_older_than_removes_only_old_rows() {
    let mut db = ScoreDatabase::in_memory().unwrap();
    db.store_batch(&[record("keep", 5.0, 3, "/p"), record("drop", 5.0, 400, "/p")])
        .unwrap();

    assert_eq!(db.clear_older_than(365).unwrap(), 1);
    assert_eq!(db.count().unwrap(), 1);
}

#[test]
fn database_file_is_created_with_parents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("scores.db");
    {
        let db = ScoreDatabase::open(&path).unwrap();
        db.store(&record("persisted", 7.0, 0, "/p")).unwrap();
    }

    let reopened = ScoreDatabase::open(&path).unwrap();
    assert_eq!(reopened.count().unwrap(), 1);
}
