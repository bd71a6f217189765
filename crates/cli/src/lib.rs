//! LLM Quality CLI Library
//!
//! Command implementations, input readers and output formatting for the
//! `llm-quality` command-line tool.

pub mod commands;
pub mod input;
pub mod output;

pub use output::{JsonFormatter, OutputFormat, PlainFormatter, TableFormatter};

/// Re-export common types
pub use anyhow::{Context, Result};
