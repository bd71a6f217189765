//! Human feedback submitted out-of-band by reviewers.
//!
//! Feedback is just another named metric source: once normalized to [0, 1] it
//! folds into the same [`AggregateReport`](crate::report::AggregateReport) as
//! the automated metrics.

use crate::errors::FeedbackError;
use crate::identifiers::TraceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest star rating reviewers can give
pub const MAX_STAR_RATING: u8 = 5;

/// Default metric name for star ratings
pub const USER_RATING_METRIC: &str = "user_rating";

/// A reviewer's judgement of one traced model interaction
///
/// Deserialized records go through the same checks as
/// [`FeedbackScore::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFeedbackScore")]
pub struct FeedbackScore {
    /// The interaction being judged
    pub trace_id: TraceId,

    /// Metric the feedback contributes to
    pub metric_name: String,

    /// Normalized score in [0, 1]
    pub value: f64,

    /// Reviewer comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// When the feedback was recorded
    pub recorded_at: DateTime<Utc>,
}

/// Wire shape of [`FeedbackScore`] before validation
#[derive(Deserialize)]
struct RawFeedbackScore {
    trace_id: TraceId,
    metric_name: String,
    value: f64,
    #[serde(default)]
    reason: Option<String>,
    recorded_at: DateTime<Utc>,
}

impl TryFrom<RawFeedbackScore> for FeedbackScore {
    type Error = FeedbackError;

    fn try_from(raw: RawFeedbackScore) -> Result<Self, Self::Error> {
        let score = Self {
            trace_id: raw.trace_id,
            metric_name: raw.metric_name,
            value: raw.value,
            reason: raw.reason,
            recorded_at: raw.recorded_at,
        };
        score.validate()?;
        Ok(score)
    }
}

impl FeedbackScore {
    /// Feedback with an already-normalized value
    pub fn new(
        trace_id: TraceId,
        metric_name: impl Into<String>,
        value: f64,
        reason: Option<String>,
    ) -> Result<Self, FeedbackError> {
        let score = Self {
            trace_id,
            metric_name: metric_name.into(),
            value,
            reason,
            recorded_at: Utc::now(),
        };
        score.validate()?;
        Ok(score)
    }

    /// Check the metric name is not blank and the value is within [0, 1]
    pub fn validate(&self) -> Result<(), FeedbackError> {
        if self.metric_name.trim().is_empty() {
            return Err(FeedbackError::EmptyMetricName);
        }
        if !self.value.is_finite() || !(0.0..=1.0).contains(&self.value) {
            return Err(FeedbackError::ValueOutOfRange(self.value));
        }
        Ok(())
    }

    /// Feedback from a 1-5 star rating, normalized as `rating / 5`
    pub fn from_star_rating(
        trace_id: TraceId,
        metric_name: impl Into<String>,
        rating: u8,
        reason: Option<String>,
    ) -> Result<Self, FeedbackError> {
        if !(1..=MAX_STAR_RATING).contains(&rating) {
            return Err(FeedbackError::RatingOutOfRange {
                rating,
                max: MAX_STAR_RATING,
            });
        }
        Self::new(
            trace_id,
            metric_name,
            f64::from(rating) / f64::from(MAX_STAR_RATING),
            reason,
        )
    }

    /// Thumbs up (1.0) or down (0.0)
    pub fn thumbs(
        trace_id: TraceId,
        metric_name: impl Into<String>,
        up: bool,
    ) -> Result<Self, FeedbackError> {
        Self::new(trace_id, metric_name, if up { 1.0 } else { 0.0 }, None)
    }
}
