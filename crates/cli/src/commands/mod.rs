//! CLI commands

pub mod config;
pub mod feedback;
pub mod metrics;
pub mod score;

use crate::output::{Formattable, OutputFormat};
use anyhow::Result;
use llm_quality_common::EvalConfig;

/// Context passed to all commands
pub struct CommandContext {
    pub config: EvalConfig,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context, taking the output format from the
    /// configuration unless one is given
    pub fn new(config: EvalConfig, format: Option<OutputFormat>) -> Self {
        let format = format
            .or_else(|| OutputFormat::parse(&config.output.format))
            .unwrap_or_default();
        Self { config, format }
    }

    /// Print a value in the selected output format
    pub fn print<T: Formattable>(&self, value: &T) -> Result<()> {
        println!("{}", value.format(self.format)?);
        Ok(())
    }
}
