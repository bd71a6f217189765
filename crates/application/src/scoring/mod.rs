//! Scoring module - metrics and the score engine
//!
//! Metrics implement [`Metric`] and are registered on a [`ScoreEngine`],
//! which applies them to every item and folds the results into an
//! [`AggregateReport`](llm_quality_domain::AggregateReport).

mod aggregate;
mod catalog;
mod engine;
mod heuristics;
mod matchers;
mod metric;
pub mod text;

pub use aggregate::{mean, std_dev, summarize, ReportAccumulator};
pub use catalog::{all_builtin_metrics, builtin_metric, BUILTIN_METRICS};
pub use engine::*;
pub use heuristics::{Accuracy, Conciseness, Relevance, ResponseQuality};
pub use matchers::{indel_distance, Contains, Equals, LevenshteinRatio};
pub use metric::{metric_fn, FnMetric, Metric, Score};
