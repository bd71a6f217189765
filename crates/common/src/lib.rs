//! Shared configuration and logging for the LLM quality workspace.
//!
//! - [`config`]: layered configuration (files, then `QUALITY_` environment)
//! - [`telemetry`]: `tracing` subscriber setup

pub mod config;
pub mod telemetry;

pub use config::{
    EvalConfig, OutputConfig, ScoringConfig, TelemetryConfig, DEFAULT_IDEAL_LENGTH,
    DEFAULT_METRICS,
};
pub use telemetry::{init_from_config, init_tracing};

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
