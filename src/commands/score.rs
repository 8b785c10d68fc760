use super::custom_library;
use crate::cli::OutputFormat;
use crate::config::LazyMeterConfig;
use crate::formatting::FormattingConfig;
use crate::output;
use crate::patterns::PatternLibrary;
use crate::scoring::PromptScorer;
use anyhow::{Context, Result};

pub fn handle_score(
    text: Option<&str>,
    format: OutputFormat,
    plain: bool,
    config: &LazyMeterConfig,
) -> Result<()> {
    let input = match text {
        Some(text) => text.to_string(),
        None => crate::io::read_stdin().context("Failed to read prompt from stdin")?,
    };

    let custom = custom_library(config)?;
    let library = custom.as_ref().unwrap_or_else(|| PatternLibrary::builtin());
    let score = PromptScorer::new(library).score(&input);
    log::debug!("Scored {} chars: {}", input.chars().count(), score.total);

    let formatting = if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    };
    output::output_score(&score, format, formatting)
}
