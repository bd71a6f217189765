//! Configuration management for quality evaluation runs.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `config/default.toml` (if it exists)
//! 3. `config/{QUALITY_ENV}.toml` (if it exists)
//! 4. An explicit file passed on the command line
//! 5. Environment variables prefixed with `QUALITY_`
//!
//! ## Example Configuration
//!
//! ```toml
//! [scoring]
//! ideal_length = 200
//! metrics = ["response_quality", "relevance", "conciseness", "accuracy"]
//! parallel = false
//!
//! [telemetry]
//! log_level = "info"
//! json_logging = false
//!
//! [output]
//! format = "table"
//! colored = true
//! ```
//!
//! Environment overrides use `__` between section and key, e.g.
//! `QUALITY_SCORING__IDEAL_LENGTH=120` or
//! `QUALITY_SCORING__METRICS=relevance,accuracy`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canonical names of the four lexical heuristics enabled by default
pub const DEFAULT_METRICS: [&str; 4] = ["response_quality", "relevance", "conciseness", "accuracy"];

/// Default answer length (in characters) above which conciseness drops
pub const DEFAULT_IDEAL_LENGTH: usize = 200;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_OUTPUT_FORMATS: [&str; 3] = ["table", "json", "plain"];

/// Main evaluation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvalConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Scoring engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Ideal answer length for the conciseness metric
    #[serde(default = "default_ideal_length")]
    pub ideal_length: usize,

    /// Built-in metrics to register, in order
    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,

    /// Score batches on a thread pool
    #[serde(default)]
    pub parallel: bool,

    /// Thread pool size for parallel scoring (defaults to the number of CPUs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_threads: Option<usize>,

    /// Treat ground-truth comparisons as case-sensitive
    #[serde(default)]
    pub case_sensitive: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging format
    #[serde(default)]
    pub json_logging: bool,
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (table, json, plain)
    #[serde(default = "default_output_format")]
    pub format: String,

    /// Enable colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

fn default_ideal_length() -> usize {
    DEFAULT_IDEAL_LENGTH
}

fn default_metrics() -> Vec<String> {
    DEFAULT_METRICS.iter().map(|m| m.to_string()).collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_format() -> String {
    "table".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ideal_length: default_ideal_length(),
            metrics: default_metrics(),
            parallel: false,
            max_threads: None,
            case_sensitive: false,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
            colored: true,
        }
    }
}

impl EvalConfig {
    /// Load configuration from the default file locations and environment.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use llm_quality_common::config::EvalConfig;
    ///
    /// let config = EvalConfig::load().expect("Failed to load configuration");
    /// println!("Ideal answer length: {}", config.scoring.ideal_length);
    /// ```
    pub fn load() -> Result<Self> {
        Self::load_with_file(None)
    }

    /// Load configuration, layering an explicit file over the default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let env = std::env::var("QUALITY_ENV").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false));

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("QUALITY")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("scoring.metrics"),
            )
            .build()
            .context("Failed to build configuration")?;

        let eval_config: EvalConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        eval_config.validate()?;

        Ok(eval_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.scoring.ideal_length == 0 {
            anyhow::bail!("Ideal length must be greater than 0");
        }

        if self.scoring.metrics.is_empty() {
            anyhow::bail!("At least one metric must be enabled");
        }

        if self.scoring.max_threads == Some(0) {
            anyhow::bail!("Maximum thread count must be greater than 0");
        }

        if !VALID_LOG_LEVELS.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                VALID_LOG_LEVELS.join(", ")
            );
        }

        if !VALID_OUTPUT_FORMATS.contains(&self.output.format.as_str()) {
            anyhow::bail!(
                "Invalid output format '{}'. Must be one of: {}",
                self.output.format,
                VALID_OUTPUT_FORMATS.join(", ")
            );
        }

        Ok(())
    }
}
