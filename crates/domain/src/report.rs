//! Aggregated batch results.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Summary statistics of one metric across a batch.
///
/// Only scored observations count; items where the metric was not applicable
/// or faulted are excluded from every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Mean of the scored values
    pub mean: f64,
    /// Number of scored values
    pub count: usize,
    /// Lowest scored value
    pub min: f64,
    /// Highest scored value
    pub max: f64,
    /// Sample standard deviation (0.0 for fewer than two values)
    pub std_dev: f64,
}

/// Per-metric summaries of a batch, keyed by metric name.
///
/// Metrics keep the order they were registered in. A metric with no scored
/// observation has no entry at all; it is never reported as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateReport {
    metrics: IndexMap<String, MetricSummary>,
}

impl AggregateReport {
    /// An empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a metric summary
    pub fn insert(&mut self, metric_name: impl Into<String>, summary: MetricSummary) {
        self.metrics.insert(metric_name.into(), summary);
    }

    /// Summary of a metric, if it was scored at least once
    pub fn get(&self, metric_name: &str) -> Option<&MetricSummary> {
        self.metrics.get(metric_name)
    }

    /// Mean score of a metric, if it was scored at least once
    pub fn mean(&self, metric_name: &str) -> Option<f64> {
        self.get(metric_name).map(|s| s.mean)
    }

    /// Whether the metric was scored at least once
    pub fn contains(&self, metric_name: &str) -> bool {
        self.metrics.contains_key(metric_name)
    }

    /// Number of metrics with a summary
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Whether no metric was scored
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Iterate summaries in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricSummary)> {
        self.metrics.iter().map(|(name, summary)| (name.as_str(), summary))
    }

    /// Metric name to mean, the shape report sinks expect
    pub fn means(&self) -> IndexMap<String, f64> {
        self.metrics
            .iter()
            .map(|(name, summary)| (name.clone(), summary.mean))
            .collect()
    }
}
