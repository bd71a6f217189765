//! Mock metrics and tasks.
//!
//! Metrics that return fixed scores, fail, panic, or record what they saw,
//! and tasks that stand in for a model call.

use crate::fixtures::{canned_answer, SampleQuestion};
use llm_quality_application::{Metric, Score, Task};
use llm_quality_domain::{EvaluationItem, MetricError};
use parking_lot::RwLock;
use std::sync::Arc;

/// Metric that always returns the same score
#[derive(Debug, Clone)]
pub struct ConstantMetric {
    name: String,
    score: Score,
}

impl ConstantMetric {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            score: Score::value(value),
        }
    }

    /// Metric that never applies
    pub fn not_applicable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: Score::not_applicable("mock metric never applies"),
        }
    }
}

impl Metric for ConstantMetric {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, _item: &EvaluationItem) -> Result<Score, MetricError> {
        Ok(self.score.clone())
    }

    fn description(&self) -> &'static str {
        "Constant mock score"
    }
}

/// Metric that returns an error for every item
#[derive(Debug, Clone)]
pub struct FailingMetric {
    name: String,
    message: String,
}

impl FailingMetric {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: "mock metric failure".to_string(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Metric for FailingMetric {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, _item: &EvaluationItem) -> Result<Score, MetricError> {
        Err(MetricError::Internal(self.message.clone()))
    }
}

/// Metric that panics, optionally only on answers containing a marker
#[derive(Debug, Clone)]
pub struct PanickingMetric {
    name: String,
    trigger: Option<String>,
}

impl PanickingMetric {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trigger: None,
        }
    }

    /// Panic only when the answer contains `marker`, score 1.0 otherwise
    pub fn when_output_contains(mut self, marker: impl Into<String>) -> Self {
        self.trigger = Some(marker.into());
        self
    }
}

impl Metric for PanickingMetric {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, item: &EvaluationItem) -> Result<Score, MetricError> {
        match &self.trigger {
            Some(marker) if !item.output.contains(marker.as_str()) => Ok(Score::value(1.0)),
            _ => panic!("mock metric panicked on '{}'", item.question),
        }
    }
}

/// Metric that records the question of every item it scores
#[derive(Debug, Clone)]
pub struct RecordingMetric {
    name: String,
    seen: Arc<RwLock<Vec<String>>>,
}

impl RecordingMetric {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seen: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Questions scored so far, in call order
    pub fn seen(&self) -> Vec<String> {
        self.seen.read().clone()
    }

    pub fn call_count(&self) -> usize {
        self.seen.read().len()
    }
}

impl Metric for RecordingMetric {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, item: &EvaluationItem) -> Result<Score, MetricError> {
        self.seen.write().push(item.question.clone());
        Ok(Score::value(0.5))
    }
}

/// Task answering every sample question with the same canned text
#[derive(Debug, Clone, Default)]
pub struct CannedAnswerTask {
    answer: Option<String>,
}

impl CannedAnswerTask {
    /// Answers "This is a sample answer to: {question}"
    pub fn new() -> Self {
        Self { answer: None }
    }

    /// Answers every question with `answer`
    pub fn with_answer(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
        }
    }
}

impl Task<SampleQuestion> for CannedAnswerTask {
    fn run(&self, row: &SampleQuestion) -> anyhow::Result<EvaluationItem> {
        let answer = match &self.answer {
            Some(answer) => answer.clone(),
            None => canned_answer(&row.question),
        };
        Ok(row.answered(answer))
    }
}

/// Task that fails like an unreachable model endpoint
#[derive(Debug, Clone)]
pub struct FailingTask {
    message: String,
}

impl FailingTask {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingTask {
    fn default() -> Self {
        Self::new("model endpoint returned HTTP 503")
    }
}

impl<Row> Task<Row> for FailingTask {
    fn run(&self, _row: &Row) -> anyhow::Result<EvaluationItem> {
        anyhow::bail!("{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_questions;

    #[test]
    fn test_recording_metric_shares_log_between_clones() {
        let metric = RecordingMetric::new("recorder");
        let clone = metric.clone();

        clone.score(&EvaluationItem::new("first", "a")).unwrap();
        metric.score(&EvaluationItem::new("second", "b")).unwrap();

        assert_eq!(metric.seen(), vec!["first", "second"]);
        assert_eq!(clone.call_count(), 2);
    }

    #[test]
    fn test_canned_answer_task() {
        let rows = sample_questions();
        let item = CannedAnswerTask::new().run(&rows[0]).unwrap();

        assert_eq!(item.output, "This is a sample answer to: What is machine learning?");
        assert_eq!(item.reference, item.expected_answer);
        assert_eq!(item.category.as_deref(), Some("technical"));
    }

    #[test]
    fn test_failing_task() {
        let err = FailingTask::default().run(&42u32).unwrap_err();
        assert!(err.to_string().contains("503"));
    }
}
