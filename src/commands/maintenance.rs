use crate::config::LazyMeterConfig;
use crate::errors::LazyMeterError;
use crate::history::HistoryReader;
use crate::storage::ScoreDatabase;
use anyhow::{Context, Result};
use std::path::Path;

pub fn list_projects(history: Option<&Path>, config: &LazyMeterConfig) -> Result<()> {
    let reader = match history {
        Some(path) if !crate::io::file_exists(path) => {
            return Err(LazyMeterError::HistoryNotFound(path.to_path_buf()).into())
        }
        Some(path) => HistoryReader::new(path),
        None => HistoryReader::new(config.history_path()),
    };

    for project in reader.projects()? {
        println!("{project}");
    }
    Ok(())
}

fn open_database(database: Option<&Path>, config: &LazyMeterConfig) -> Result<ScoreDatabase> {
    let path = database.map_or_else(|| config.database_path(), Path::to_path_buf);
    ScoreDatabase::open(&path)
        .with_context(|| format!("Failed to open score database {}", path.display()))
}

pub fn show_stats(database: Option<&Path>, config: &LazyMeterConfig) -> Result<()> {
    let path = database.map_or_else(|| config.database_path(), Path::to_path_buf);
    let db = open_database(Some(&path), config)?;
    println!("Database: {}", path.display());
    println!("Stored scores: {}", db.count()?);
    Ok(())
}

pub fn prune_scores(
    days: Option<u32>,
    database: Option<&Path>,
    config: &LazyMeterConfig,
) -> Result<()> {
    let days = days.unwrap_or(config.storage.retention_days);
    let removed = open_database(database, config)?.clear_older_than(days)?;
    println!("Removed {removed} scores older than {days} days");
    Ok(())
}
