//! Shared error types for lazymeter.
//!
//! Library code returns [`Result`] with a [`LazyMeterError`]; command
//! handlers wrap these in `anyhow` with added context.
//!
//! Scoring itself never fails: every `&str` produces a valid score. Errors
//! only come from the edges (history file, score database, configuration,
//! and custom pattern tables that fail to compile).

use crate::patterns::SignalFamily;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lazymeter operations
#[derive(Debug, Error)]
pub enum LazyMeterError {
    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Score database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configured pattern that is not a valid regular expression
    #[error("Invalid pattern in family '{family}': {source}")]
    Pattern {
        family: SignalFamily,
        #[source]
        source: regex::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The history file does not exist
    #[error("History file not found: {}", .0.display())]
    HistoryNotFound(PathBuf),
}

impl LazyMeterError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the user can fix this by editing files or arguments.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::Toml(_) | Self::Pattern { .. } | Self::Config(_) | Self::HistoryNotFound(_)
        )
    }
}

/// Result type alias using [`LazyMeterError`]
pub type Result<T> = std::result::Result<T, LazyMeterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_error_names_family() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = LazyMeterError::Pattern {
            family: SignalFamily::Hedge,
            source,
        };
        let message = err.to_string();
        assert!(message.contains("hedge"), "got: {message}");
        assert!(err.is_user_fixable());
    }

    #[test]
    fn test_io_error_is_not_user_fixable() {
        let err: LazyMeterError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(!err.is_user_fixable());
    }

    #[test]
    fn test_history_not_found_message() {
        let err = LazyMeterError::HistoryNotFound(PathBuf::from("/tmp/missing.jsonl"));
        assert_eq!(
            err.to_string(),
            "History file not found: /tmp/missing.jsonl"
        );
    }
}
