//! Per-item metric results.

use serde::{Deserialize, Serialize};

/// The outcome of one metric applied to one item.
///
/// `value` is `None` when the metric did not score the item, either because it
/// does not apply (no ground truth) or because the metric faulted. `reason`
/// says which. A real score of zero is always `Some(0.0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// Name of the metric that produced this result
    pub metric_name: String,

    /// Score in [0, 1], or `None` when unscored
    pub value: Option<f64>,

    /// Explanation, mandatory for unscored results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl MetricResult {
    /// A scored result
    pub fn scored(metric_name: impl Into<String>, value: f64) -> Self {
        Self {
            metric_name: metric_name.into(),
            value: Some(value),
            reason: None,
        }
    }

    /// The metric declined to score the item
    pub fn not_applicable(metric_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            metric_name: metric_name.into(),
            value: None,
            reason: Some(reason.into()),
        }
    }

    /// Attach an explanation to the result
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Whether the result carries a score
    pub fn is_scored(&self) -> bool {
        self.value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_not_unscored() {
        let zero = MetricResult::scored("relevance", 0.0);
        assert!(zero.is_scored());
        assert_eq!(zero.value, Some(0.0));

        let na = MetricResult::not_applicable("accuracy", "no expected answer");
        assert!(!na.is_scored());
        assert_eq!(na.reason.as_deref(), Some("no expected answer"));
    }

    #[test]
    fn test_serialization_keeps_null_value() {
        let na = MetricResult::not_applicable("accuracy", "no expected answer");
        let json = serde_json::to_value(&na).unwrap();
        assert!(json["value"].is_null());
        assert_eq!(json["metric_name"], "accuracy");
    }
}
