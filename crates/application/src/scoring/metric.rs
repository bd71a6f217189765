//! The metric trait and the score type metrics return.

use llm_quality_domain::{EvaluationItem, ItemField, MetricError};
use std::fmt;

/// What a metric concluded about one item.
///
/// "Not applicable" is its own variant so it can never be confused with a
/// computed zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Score {
    /// A score in [0, 1]
    Value {
        value: f64,
        reason: Option<String>,
    },
    /// The metric declines to score this item
    NotApplicable { reason: String },
}

impl Score {
    pub fn value(value: f64) -> Self {
        Self::Value {
            value,
            reason: None,
        }
    }

    pub fn not_applicable(reason: impl Into<String>) -> Self {
        Self::NotApplicable {
            reason: reason.into(),
        }
    }

    /// Attach an explanation to a scored value; no-op for not applicable
    pub fn with_reason(self, reason: impl Into<String>) -> Self {
        match self {
            Self::Value { value, .. } => Self::Value {
                value,
                reason: Some(reason.into()),
            },
            other => other,
        }
    }

    /// The numeric score, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Value { value, .. } => Some(*value),
            Self::NotApplicable { .. } => None,
        }
    }
}

/// A named, stateless scoring function over evaluation items.
///
/// Implementations must be pure: the same item always yields the same score,
/// and nothing is shared between calls, so the engine is free to score items
/// on several threads at once.
pub trait Metric: Send + Sync {
    /// Name under which results and aggregates are reported
    fn name(&self) -> &str;

    /// Score one item
    fn score(&self, item: &EvaluationItem) -> Result<Score, MetricError>;

    /// Item fields the metric looks at
    fn reads(&self) -> &'static [ItemField] {
        &[ItemField::Output]
    }

    /// One-line human description
    fn description(&self) -> &'static str {
        ""
    }
}

/// A metric backed by a closure.
///
/// ```rust
/// use llm_quality_application::scoring::{metric_fn, Metric, Score};
/// use llm_quality_domain::EvaluationItem;
///
/// let non_empty = metric_fn("non_empty", |item: &EvaluationItem| {
///     Ok(Score::value(if item.output.is_empty() { 0.0 } else { 1.0 }))
/// });
/// assert_eq!(non_empty.name(), "non_empty");
/// ```
pub struct FnMetric<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for FnMetric<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMetric").field("name", &self.name).finish()
    }
}

/// Wrap a closure as a [`Metric`]
pub fn metric_fn<F>(name: impl Into<String>, f: F) -> FnMetric<F>
where
    F: Fn(&EvaluationItem) -> Result<Score, MetricError> + Send + Sync,
{
    FnMetric {
        name: name.into(),
        f,
    }
}

impl<F> Metric for FnMetric<F>
where
    F: Fn(&EvaluationItem) -> Result<Score, MetricError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, item: &EvaluationItem) -> Result<Score, MetricError> {
        (self.f)(item)
    }

    fn reads(&self) -> &'static [ItemField] {
        &[
            ItemField::Question,
            ItemField::Output,
            ItemField::ExpectedAnswer,
            ItemField::Reference,
            ItemField::Category,
        ]
    }

    fn description(&self) -> &'static str {
        "Custom metric"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_reason_only_on_values() {
        let scored = Score::value(0.5).with_reason("half");
        assert_eq!(
            scored,
            Score::Value {
                value: 0.5,
                reason: Some("half".to_string())
            }
        );

        let na = Score::not_applicable("no ground truth").with_reason("ignored");
        assert_eq!(na, Score::not_applicable("no ground truth"));
        assert_eq!(na.as_f64(), None);
    }

    #[test]
    fn test_fn_metric() {
        let metric = metric_fn("length_over_ten", |item: &EvaluationItem| {
            Ok(Score::value(if item.output.len() > 10 { 1.0 } else { 0.0 }))
        });

        let short = EvaluationItem::new("q", "short");
        let long = EvaluationItem::new("q", "a much longer answer");

        assert_eq!(metric.score(&short).unwrap().as_f64(), Some(0.0));
        assert_eq!(metric.score(&long).unwrap().as_f64(), Some(1.0));
    }
}
