use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lazymeter")]
#[command(about = "Heuristic quality scoring for your AI assistant prompts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .lazymeter.toml)
    #[arg(long, global = true, env = "LAZYMETER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score prompts from history and print a quality report
    Analyze(AnalyzeArgs),

    /// Score a single prompt (reads stdin when TEXT is omitted)
    Score {
        /// Prompt text
        text: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Disable colors
        #[arg(long)]
        plain: bool,
    },

    /// List projects found in the history file
    Projects {
        /// History file to read
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Show stored score statistics
    Stats {
        /// Score database
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Delete stored scores older than the retention period
    Prune {
        /// Keep scores from the last N days (defaults to storage.retention_days)
        #[arg(long)]
        days: Option<u32>,

        /// Score database
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Write a default .lazymeter.toml to the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Analyze the last N days (defaults to report.days; 0 for all)
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Only prompts whose project contains this text
    #[arg(short, long)]
    pub project: Option<String>,

    /// Maximum number of prompts to analyze
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Only prompts since local midnight
    #[arg(long, conflicts_with = "yesterday")]
    pub today: bool,

    /// Only prompts from yesterday
    #[arg(long)]
    pub yesterday: bool,

    /// History file to read
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Score database
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Do not persist scores
    #[arg(long)]
    pub no_store: bool,

    /// Include quality by hour and weekday
    #[arg(long)]
    pub stamina: bool,

    /// Include quality by position within a session
    #[arg(long)]
    pub session: bool,

    /// Include the weekly trend
    #[arg(long)]
    pub trend: bool,

    /// Hide the lowest-scoring prompts
    #[arg(long)]
    pub no_shame: bool,

    /// Hide the highest-scoring prompts
    #[arg(long)]
    pub no_pride: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub plain: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    #[default]
    Terminal,
}

/// Log filter for a `-v` count.
pub fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
