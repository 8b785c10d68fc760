use std::path::{Path, PathBuf};

use super::LazyMeterConfig;
use crate::errors::{LazyMeterError, Result};

pub const CONFIG_FILE_NAME: &str = ".lazymeter.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse a configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<LazyMeterConfig> {
    let config: LazyMeterConfig = toml::from_str(contents)?;

    if config.report.preview_chars == 0 {
        return Err(LazyMeterError::config("report.preview_chars must be positive"));
    }
    for (family, o) in &config.patterns {
        if o.patterns.is_empty() {
            log::warn!("Pattern family '{}' is configured with no patterns", family);
        }
    }
    if config.has_pattern_overrides() {
        config.pattern_library()?;
    }

    Ok(config)
}

/// Load an explicitly named configuration file. Unlike discovery, a missing
/// or invalid file is an error.
pub fn load_config_from(path: &Path) -> Result<LazyMeterConfig> {
    let contents = crate::io::read_file(path)?;
    let config = parse_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<LazyMeterConfig> {
    let contents = match crate::io::read_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{} in {}. Using defaults.", e, config_path.display());
            None
        }
    }
}

/// `start` and its parents, nearest first, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find `.lazymeter.toml` in the current directory or one of its parents.
pub fn load_config() -> LazyMeterConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return LazyMeterConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            LazyMeterConfig::default()
        })
}
