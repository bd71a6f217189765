//! Folding per-item results into an [`AggregateReport`].

use indexmap::IndexMap;
use llm_quality_domain::{
    AggregateReport, FeedbackError, FeedbackScore, MetricResult, MetricSummary,
};

/// Collects scored values per metric and summarizes them.
///
/// Metric names seeded with [`ReportAccumulator::with_metrics`] fix the
/// report order; names seen later (feedback, ad-hoc metrics) are appended.
/// Unscored results never contribute.
#[derive(Debug, Clone, Default)]
pub struct ReportAccumulator {
    values: IndexMap<String, Vec<f64>>,
}

impl ReportAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulator whose report lists these metrics first, in this order
    pub fn with_metrics<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: names.into_iter().map(|n| (n.into(), Vec::new())).collect(),
        }
    }

    /// Record the results of one item
    pub fn observe(&mut self, results: &[MetricResult]) {
        for result in results {
            if let Some(value) = result.value {
                self.observe_value(&result.metric_name, value);
            }
        }
    }

    /// Record one scored value
    pub fn observe_value(&mut self, metric_name: &str, value: f64) {
        match self.values.get_mut(metric_name) {
            Some(values) => values.push(value),
            None => {
                self.values.insert(metric_name.to_string(), vec![value]);
            }
        }
    }

    /// Record a reviewer's feedback under its metric name
    pub fn observe_feedback(&mut self, feedback: &FeedbackScore) -> Result<(), FeedbackError> {
        feedback.validate()?;
        self.observe_value(&feedback.metric_name, feedback.value);
        Ok(())
    }

    /// Merge another accumulator's observations after this one's
    pub fn merge(&mut self, other: ReportAccumulator) {
        for (name, values) in other.values {
            self.values.entry(name).or_default().extend(values);
        }
    }

    /// Number of scored observations for a metric
    pub fn count(&self, metric_name: &str) -> usize {
        self.values.get(metric_name).map_or(0, Vec::len)
    }

    /// Summarize; metrics without a single scored value are left out
    pub fn finish(&self) -> AggregateReport {
        let mut report = AggregateReport::new();
        for (name, values) in &self.values {
            if let Some(summary) = summarize(values) {
                report.insert(name.clone(), summary);
            }
        }
        report
    }
}

/// Summary statistics of a set of scores, `None` when there are none
pub fn summarize(values: &[f64]) -> Option<MetricSummary> {
    if values.is_empty() {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(MetricSummary {
        mean: mean(values),
        count: values.len(),
        min,
        max,
        std_dev: std_dev(values),
    })
}

/// Arithmetic mean
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let mean = mean(values);
    let variance: f64 =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_quality_domain::TraceId;

    #[test]
    fn test_unscored_results_are_skipped() {
        let mut acc = ReportAccumulator::with_metrics(["relevance", "accuracy"]);
        acc.observe(&[
            MetricResult::scored("relevance", 0.5),
            MetricResult::not_applicable("accuracy", "no expected answer"),
        ]);
        acc.observe(&[
            MetricResult::scored("relevance", 1.0),
            MetricResult::not_applicable("accuracy", "no expected answer"),
        ]);

        let report = acc.finish();
        assert_eq!(report.len(), 1);
        assert_eq!(report.mean("relevance"), Some(0.75));
        assert!(!report.contains("accuracy"));
    }

    #[test]
    fn test_zero_scores_count() {
        let mut acc = ReportAccumulator::new();
        acc.observe(&[MetricResult::scored("relevance", 0.0)]);
        acc.observe(&[MetricResult::scored("relevance", 0.0)]);

        let summary = acc.finish().get("relevance").cloned().unwrap();
        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn test_seeded_order_with_feedback_last() {
        let mut acc = ReportAccumulator::with_metrics(["conciseness", "relevance"]);
        let feedback =
            FeedbackScore::from_star_rating(TraceId::new(), "user_rating", 4, None).unwrap();
        acc.observe_feedback(&feedback).unwrap();
        acc.observe(&[
            MetricResult::scored("relevance", 0.2),
            MetricResult::scored("conciseness", 1.0),
        ]);

        let report = acc.finish();
        let names: Vec<&str> = report.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["conciseness", "relevance", "user_rating"]);
        assert!((report.mean("user_rating").unwrap() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_feedback_is_not_recorded() {
        let mut acc = ReportAccumulator::new();
        let mut feedback = FeedbackScore::thumbs(TraceId::new(), "helpful", true).unwrap();
        feedback.value = 4.0;

        assert_eq!(
            acc.observe_feedback(&feedback),
            Err(FeedbackError::ValueOutOfRange(4.0))
        );
        assert_eq!(acc.count("helpful"), 0);
    }

    #[test]
    fn test_merge_appends_values() {
        let mut a = ReportAccumulator::with_metrics(["relevance"]);
        a.observe_value("relevance", 1.0);
        let mut b = ReportAccumulator::new();
        b.observe_value("relevance", 0.0);
        b.observe_value("accuracy", 0.5);

        a.merge(b);
        assert_eq!(a.count("relevance"), 2);
        assert_eq!(a.finish().mean("accuracy"), Some(0.5));
    }

    #[test]
    fn test_summary_statistics() {
        let summary = summarize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(summary.mean, 5.0);
        assert_eq!(summary.count, 8);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert!((summary.std_dev - 2.138).abs() < 0.01);

        assert!(summarize(&[]).is_none());
        assert_eq!(std_dev(&[0.5]), 0.0);
    }
}
