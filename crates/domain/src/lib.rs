//! LLM Quality Domain Types
//!
//! Core data model for scoring model answers: the items being scored, the
//! per-metric results, the aggregated batch report, human feedback, and the
//! error taxonomy shared by every crate in the workspace.
//!
//! ## Modules
//!
//! - **identifiers**: UUID v7 identifiers for traces and experiment runs
//! - **item**: [`EvaluationItem`], one answered question
//! - **result**: [`MetricResult`], one metric applied to one item
//! - **report**: [`AggregateReport`] and [`MetricSummary`]
//! - **feedback**: [`FeedbackScore`], reviewer ratings normalized to [0, 1]
//! - **errors**: configuration, per-item and feedback errors
//!
//! ## Usage
//!
//! ```rust
//! use llm_quality_domain::{EvaluationItem, MetricResult};
//!
//! let item = EvaluationItem::new("What is 2 + 2?", "4").with_expected_answer("4");
//! assert_eq!(item.expected(), Some("4"));
//!
//! let unscored = MetricResult::not_applicable("accuracy", "no expected answer");
//! assert!(!unscored.is_scored());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod feedback;
pub mod identifiers;
pub mod item;
pub mod report;
pub mod result;

pub use errors::{
    AppError, AppResult, FeedbackError, ItemField, MetricError, ScoringError, ScoringResult,
};
pub use feedback::{FeedbackScore, MAX_STAR_RATING, USER_RATING_METRIC};
pub use identifiers::*;
pub use item::EvaluationItem;
pub use report::{AggregateReport, MetricSummary};
pub use result::MetricResult;
