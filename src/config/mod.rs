//! `.lazymeter.toml` configuration.
//!
//! Every section is optional; missing keys fall back to the values below.

mod loader;

pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_config, CONFIG_FILE_NAME,
};

use crate::errors::Result;
use crate::patterns::{PatternLibrary, SignalFamily};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LazyMeterConfig {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub report: ReportConfig,
    /// Replacement pattern lists, keyed by family name
    #[serde(default)]
    pub patterns: BTreeMap<SignalFamily, FamilyOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Defaults to `~/.claude/history.jsonl`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Defaults to `<local data dir>/lazymeter/scores.db`
    #[serde(default)]
    pub database: Option<PathBuf>,
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: None,
            retention_days: default_retention_days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default = "default_list_limit")]
    pub shame_limit: usize,
    #[serde(default = "default_list_limit")]
    pub fame_limit: usize,
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
    #[serde(default = "default_session_gap_minutes")]
    pub session_gap_minutes: u32,
    #[serde(default = "default_max_session_positions")]
    pub max_session_positions: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            shame_limit: default_list_limit(),
            fame_limit: default_list_limit(),
            preview_chars: default_preview_chars(),
            session_gap_minutes: default_session_gap_minutes(),
            max_session_positions: default_max_session_positions(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyOverride {
    pub patterns: Vec<String>,
}

pub fn default_retention_days() -> u32 {
    365
}

pub fn default_days() -> u32 {
    30
}

pub fn default_list_limit() -> usize {
    5
}

pub fn default_preview_chars() -> usize {
    80
}

pub fn default_session_gap_minutes() -> u32 {
    30
}

pub fn default_max_session_positions() -> usize {
    15
}

pub fn default_history_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".claude")
        .join("history.jsonl")
}

pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_default()
        .join("lazymeter")
        .join("scores.db")
}

impl LazyMeterConfig {
    pub fn history_path(&self) -> PathBuf {
        self.history
            .path
            .clone()
            .unwrap_or_else(default_history_path)
    }

    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database
            .clone()
            .unwrap_or_else(default_database_path)
    }

    pub fn has_pattern_overrides(&self) -> bool {
        !self.patterns.is_empty()
    }

    /// Compile the built-in tables with this configuration's overrides.
    pub fn pattern_library(&self) -> Result<PatternLibrary> {
        let overrides: BTreeMap<SignalFamily, Vec<String>> = self
            .patterns
            .iter()
            .map(|(family, o)| (*family, o.patterns.clone()))
            .collect();
        PatternLibrary::with_overrides(&overrides)
    }
}
