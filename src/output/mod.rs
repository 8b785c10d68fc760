pub mod json;
pub mod terminal;

pub use json::output_json;
pub use terminal::format_score_terminal;

use crate::cli::OutputFormat;
use crate::formatting::FormattingConfig;
use crate::report::{format_ascii_report, Report};
use crate::scoring::Score;
use anyhow::Result;
use std::path::Path;

pub fn output_report(
    report: &Report,
    format: OutputFormat,
    output_file: Option<&Path>,
    formatting: FormattingConfig,
) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(report, output_file),
        OutputFormat::Terminal => {
            // Files never get color escapes
            let formatting = match output_file {
                Some(_) => FormattingConfig::plain(),
                None => formatting,
            };
            let text = format_ascii_report(report, formatting.formatter().as_ref());
            crate::io::write_output(&text, output_file)?;
            Ok(())
        }
    }
}

pub fn output_score(
    score: &Score,
    format: OutputFormat,
    formatting: FormattingConfig,
) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(score, None),
        OutputFormat::Terminal => {
            let text = format_score_terminal(score, formatting.formatter().as_ref());
            crate::io::write_output(&text, None)?;
            Ok(())
        }
    }
}
