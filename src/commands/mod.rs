//! CLI command implementations.
//!
//! - **analyze**: score history prompts, persist them, and print a report
//! - **score**: score a single prompt
//! - **projects**, **stats**, **prune**: history and database maintenance
//! - **init**: write a default configuration file

pub mod analyze;
pub mod init;
pub mod maintenance;
pub mod score;

pub use analyze::handle_analyze;
pub use init::init_config;
pub use maintenance::{list_projects, prune_scores, show_stats};
pub use score::handle_score;

use crate::config::{self, LazyMeterConfig};
use crate::patterns::PatternLibrary;
use anyhow::{Context, Result};
use std::path::Path;

/// Load the configuration named on the command line, or discover one.
pub fn resolve_config(path: Option<&Path>) -> Result<LazyMeterConfig> {
    match path {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(config::load_config()),
    }
}

/// A pattern library compiled with configured overrides, if there are any.
/// Callers fall back to [`PatternLibrary::builtin`].
pub(crate) fn custom_library(config: &LazyMeterConfig) -> Result<Option<PatternLibrary>> {
    if !config.has_pattern_overrides() {
        return Ok(None);
    }
    let library = config
        .pattern_library()
        .context("Failed to compile configured patterns")?;
    Ok(Some(library))
}
