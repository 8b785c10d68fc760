//! Heuristic quality scoring for prompts sent to an AI coding assistant.
//!
//! Prompts are read from a JSON Lines history, scored 1-10 by weighted
//! pattern signals, stored in SQLite for trends, and summarized as JSON or
//! terminal reports.

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod history;
pub mod io;
pub mod output;
pub mod patterns;
pub mod report;
pub mod scoring;
pub mod sessions;
pub mod signals;
pub mod storage;

pub use crate::errors::{LazyMeterError, Result};
pub use crate::history::{HistoryFilter, HistoryReader, Prompt};
pub use crate::patterns::{PatternLibrary, SignalFamily, SignalSource};
pub use crate::report::{generate_report, Report, ReportInput, ReportOptions};
pub use crate::scoring::{score_prompt, Category, PromptScorer, Score};
pub use crate::storage::{ScoreDatabase, ScoreQuery, ScoreRecord, StoredScore};
