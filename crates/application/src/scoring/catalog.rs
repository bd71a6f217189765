//! Lookup of built-in metrics by canonical name.

use super::heuristics::{Accuracy, Conciseness, Relevance, ResponseQuality};
use super::matchers::{Contains, Equals, LevenshteinRatio};
use super::metric::Metric;
use llm_quality_common::ScoringConfig;
use llm_quality_domain::{ScoringError, ScoringResult};
use std::sync::Arc;

/// Canonical names of every built-in metric
pub const BUILTIN_METRICS: [&str; 7] = [
    ResponseQuality::DEFAULT_NAME,
    Relevance::DEFAULT_NAME,
    Conciseness::DEFAULT_NAME,
    Accuracy::DEFAULT_NAME,
    Contains::DEFAULT_NAME,
    Equals::DEFAULT_NAME,
    LevenshteinRatio::DEFAULT_NAME,
];

/// Construct a built-in metric from its canonical name.
///
/// `ideal_length` and `case_sensitive` are taken from the configuration.
pub fn builtin_metric(name: &str, config: &ScoringConfig) -> ScoringResult<Arc<dyn Metric>> {
    let metric: Arc<dyn Metric> = match name {
        ResponseQuality::DEFAULT_NAME => Arc::new(ResponseQuality::new()),
        Relevance::DEFAULT_NAME => Arc::new(Relevance::new()),
        Conciseness::DEFAULT_NAME => Arc::new(Conciseness::with_ideal_length(config.ideal_length)?),
        Accuracy::DEFAULT_NAME => Arc::new(Accuracy::new()),
        Contains::DEFAULT_NAME => Arc::new(Contains::new().case_sensitive(config.case_sensitive)),
        Equals::DEFAULT_NAME => Arc::new(Equals::new().case_sensitive(config.case_sensitive)),
        LevenshteinRatio::DEFAULT_NAME => {
            Arc::new(LevenshteinRatio::new().case_sensitive(config.case_sensitive))
        }
        other => return Err(ScoringError::UnknownMetric(other.to_string())),
    };
    Ok(metric)
}

/// All built-ins with default settings, in catalog order
pub fn all_builtin_metrics() -> Vec<Arc<dyn Metric>> {
    let config = ScoringConfig::default();
    BUILTIN_METRICS
        .iter()
        .filter_map(|name| builtin_metric(name, &config).ok())
        .collect()
}
