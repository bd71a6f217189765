//! Structured logging setup.
//!
//! Installs a `tracing` subscriber with an environment filter and either a
//! JSON or a human-readable formatting layer.

use crate::config::TelemetryConfig;
use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Initialize tracing.
///
/// `RUST_LOG` takes precedence over `log_level` when it is set.
///
/// # Arguments
///
/// * `json_format` - Whether to use JSON formatting for logs
/// * `log_level` - Log level filter (e.g., "info", "debug")
///
/// # Examples
///
/// ```no_run
/// use llm_quality_common::telemetry::init_tracing;
///
/// init_tracing(false, "info").expect("Failed to initialize tracing");
/// ```
pub fn init_tracing(json_format: bool, log_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = Registry::default().with(env_filter);

    if json_format {
        registry
            .with(json_layer())
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
    } else {
        registry
            .with(pretty_layer())
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
    }

    Ok(())
}

/// Initialize tracing from the telemetry section of the configuration
pub fn init_from_config(config: &TelemetryConfig) -> Result<()> {
    init_tracing(config.json_logging, &config.log_level)
}

/// Create a JSON logging layer
fn json_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
}

/// Create a human-readable logging layer
fn pretty_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .compact()
        .with_target(true)
        .with_level(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
}
