//! Record a reviewer star rating as a feedback score
//!
//! The printed record can be appended to a JSON lines file and passed to
//! `score --feedback`.

use anyhow::{Context, Result};
use serde::Serialize;

use llm_quality_domain::{FeedbackScore, TraceId};

use super::CommandContext;
use crate::output::{Formattable, TableFormatter};

/// Options of the `feedback` command
#[derive(Debug, Clone)]
pub struct FeedbackOptions {
    pub trace_id: Option<TraceId>,
    pub rating: u8,
    pub metric: String,
    pub reason: Option<String>,
}

/// A recorded feedback score
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct FeedbackRecord(pub FeedbackScore);

impl Formattable for FeedbackRecord {
    fn format_table(&self) -> Result<String> {
        let score = &self.0;
        Ok(TableFormatter::key_value(vec![
            ("Trace", score.trace_id.to_string()),
            ("Metric", score.metric_name.clone()),
            ("Value", format!("{:.2}", score.value)),
            ("Reason", score.reason.clone().unwrap_or_else(|| "-".to_string())),
            ("Recorded", score.recorded_at.to_rfc3339()),
        ]))
    }

    /// One line, so records can be appended to a JSON lines file
    fn format_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

/// Normalize the rating into a feedback score
pub fn record(options: FeedbackOptions) -> Result<FeedbackRecord> {
    let trace_id = options.trace_id.unwrap_or_default();
    let score = FeedbackScore::from_star_rating(
        trace_id,
        options.metric,
        options.rating,
        options.reason,
    )
    .context("Invalid feedback")?;

    tracing::info!(trace_id = %trace_id, value = score.value, "Recorded feedback");
    Ok(FeedbackRecord(score))
}

/// Run the `feedback` command
pub fn run(ctx: &CommandContext, options: FeedbackOptions) -> Result<()> {
    ctx.print(&record(options)?)
}
