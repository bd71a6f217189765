//! Output formatting for CLI

use anyhow::Result;
use serde::{Deserialize, Serialize};

mod formatters;
mod table;

pub use formatters::{JsonFormatter, PlainFormatter};
pub use table::TableFormatter;

/// Output format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Table output (default)
    #[default]
    Table,
    /// Plain text output
    Plain,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "table" => Some(Self::Table),
            "plain" => Some(Self::Plain),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

/// Types that can be printed in every output format.
///
/// JSON and plain output come from the serialized form; tables are drawn by
/// each type.
pub trait Formattable: Serialize {
    /// Format as table
    fn format_table(&self) -> Result<String>;

    /// Format as JSON
    fn format_json(&self) -> Result<String> {
        JsonFormatter::format(self)
    }

    /// Format as plain text
    fn format_plain(&self) -> Result<String> {
        PlainFormatter::format(self)
    }

    /// Format using the specified format
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Table => self.format_table(),
            OutputFormat::Plain => self.format_plain(),
        }
    }
}

/// Color helpers
pub mod colors {
    use colored::*;

    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    pub fn error(s: &str) -> ColoredString {
        s.red()
    }

    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    pub fn bold(s: &str) -> ColoredString {
        s.bold()
    }

    /// Green for good scores, yellow for middling, red for poor
    pub fn score(value: f64) -> ColoredString {
        let text = format!("{:.3}", value);
        if value >= 0.75 {
            text.green()
        } else if value >= 0.5 {
            text.yellow()
        } else {
            text.red()
        }
    }
}
