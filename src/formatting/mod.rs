use crate::scoring::Category;
use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormattingConfig {
    pub color: ColorMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode) -> Self {
        Self { color }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    /// Plain output: no ANSI escapes.
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
        }
    }

    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        if self.color.should_use_color() {
            Box::new(ColoredFormatter::new())
        } else {
            Box::new(PlainFormatter)
        }
    }
}

pub trait OutputFormatter {
    fn header(&self, text: &str) -> String;
    fn bold(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
    /// Color `text` by the quality band of `category`.
    fn category(&self, category: Category, text: &str) -> String;
}

pub struct ColoredFormatter;

impl ColoredFormatter {
    pub fn new() -> Self {
        colored::control::set_override(true);
        Self
    }
}

impl Default for ColoredFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for ColoredFormatter {
    fn header(&self, text: &str) -> String {
        text.blue().bold().to_string()
    }

    fn bold(&self, text: &str) -> String {
        text.bold().to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.dimmed().to_string()
    }

    fn category(&self, category: Category, text: &str) -> String {
        match category {
            Category::Grunt => text.red().to_string(),
            Category::Minimal => text.yellow().to_string(),
            Category::Adequate => text.normal().to_string(),
            Category::Solid => text.cyan().to_string(),
            Category::Excellent => text.green().bold().to_string(),
        }
    }
}

pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn header(&self, text: &str) -> String {
        text.to_string()
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }

    fn category(&self, _category: Category, text: &str) -> String {
        text.to_string()
    }
}

fn detect_color_support() -> bool {
    // Check if we're in a dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}
