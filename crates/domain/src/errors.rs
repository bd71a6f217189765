//! Error types for the quality-scoring domain.
//!
//! Errors fall into three groups that are handled very differently:
//!
//! - [`ScoringError`]: configuration mistakes, raised when a metric or registry
//!   is built and never recovered from
//! - [`MetricError`]: a single metric failing on a single item; the engine turns
//!   these into unscored results and carries on with the batch
//! - [`FeedbackError`]: invalid human feedback submitted out-of-band

use serde::{Deserialize, Serialize};

/// Top-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Registry or metric configuration errors
    #[error("Scoring configuration error: {0}")]
    Scoring(#[from] ScoringError),

    /// A metric failed on an item
    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),

    /// Feedback could not be accepted
    #[error("Feedback error: {0}")]
    Feedback(#[from] FeedbackError),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Scoring(_) => "SCORING_CONFIGURATION_ERROR",
            Self::Metric(_) => "METRIC_ERROR",
            Self::Feedback(_) => "FEEDBACK_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the error only affects one item and the run may continue
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Metric(_))
    }
}

/// Configuration errors, raised at construction or registration time
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    /// A metric with the same name is already registered
    #[error("Duplicate metric: {0}")]
    DuplicateMetric(String),

    /// Metric names must not be blank
    #[error("Metric name must not be empty")]
    EmptyMetricName,

    /// Conciseness needs a positive ideal length
    #[error("Ideal length must be greater than 0, got {0}")]
    InvalidIdealLength(usize),

    /// No built-in metric has this name
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// Any other invalid setting
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Item field a metric can depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    /// [`EvaluationItem::question`](crate::EvaluationItem::question)
    Question,
    /// [`EvaluationItem::output`](crate::EvaluationItem::output)
    Output,
    /// [`EvaluationItem::expected_answer`](crate::EvaluationItem::expected_answer)
    ExpectedAnswer,
    /// [`EvaluationItem::reference`](crate::EvaluationItem::reference)
    Reference,
    /// [`EvaluationItem::category`](crate::EvaluationItem::category)
    Category,
}

impl ItemField {
    /// Field name as it appears in serialized items
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Output => "output",
            Self::ExpectedAnswer => "expected_answer",
            Self::Reference => "reference",
            Self::Category => "category",
        }
    }
}

impl std::fmt::Display for ItemField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-item metric faults
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    /// The metric needs a field the item does not carry
    #[error("Missing field '{field}' required by {metric}")]
    MissingField {
        /// Metric that needed the field
        metric: String,
        /// The absent field
        field: ItemField,
    },

    /// The item carries data the metric cannot handle
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The metric failed for any other reason
    #[error("Internal metric failure: {0}")]
    Internal(String),
}

/// Errors raised when building feedback scores
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedbackError {
    /// Star rating outside 1..=max
    #[error("Rating {rating} out of range 1..={max}")]
    RatingOutOfRange {
        /// The rejected rating
        rating: u8,
        /// Highest accepted rating
        max: u8,
    },

    /// Normalized value outside [0, 1]
    #[error("Feedback value {0} must be within [0, 1]")]
    ValueOutOfRange(f64),

    /// Feedback must name the metric it feeds
    #[error("Feedback metric name must not be empty")]
    EmptyMetricName,

    /// Feedback would be mixed into an automated metric of the same name
    #[error("Feedback metric '{0}' collides with a registered metric")]
    MetricNameCollision(String),
}

/// Application-wide result type
pub type AppResult<T> = Result<T, AppError>;

/// Result of registry and metric construction
pub type ScoringResult<T> = Result<T, ScoringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::Scoring(ScoringError::DuplicateMetric("relevance".to_string()));
        assert_eq!(err.error_code(), "SCORING_CONFIGURATION_ERROR");
        assert!(!err.is_recoverable());

        let err = AppError::from(MetricError::Internal("boom".to_string()));
        assert_eq!(err.error_code(), "METRIC_ERROR");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_error_messages() {
        let err = MetricError::MissingField {
            metric: "accuracy".to_string(),
            field: ItemField::ExpectedAnswer,
        };
        assert_eq!(
            err.to_string(),
            "Missing field 'expected_answer' required by accuracy"
        );

        let err = FeedbackError::RatingOutOfRange { rating: 7, max: 5 };
        assert_eq!(err.to_string(), "Rating 7 out of range 1..=5");
    }
}
