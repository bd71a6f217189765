//! Application layer for LLM answer-quality scoring
//!
//! This crate turns the domain types into a working evaluation pipeline.
//!
//! ## Modules
//!
//! - `scoring` - the [`Metric`] trait, built-in metrics and the [`ScoreEngine`]
//! - `experiment` - runs a task over dataset rows and scores the answers
//!
//! ## Example
//!
//! ```rust
//! use llm_quality_application::{Accuracy, Relevance, ScoreEngine};
//! use llm_quality_domain::EvaluationItem;
//!
//! let mut engine = ScoreEngine::default();
//! engine.register(Relevance::new()).unwrap();
//! engine.register(Accuracy::new()).unwrap();
//!
//! let items = vec![
//!     EvaluationItem::new("What is 2 + 2?", "4").with_expected_answer("4"),
//!     EvaluationItem::new("What is the capital of France?", "Paris."),
//! ];
//!
//! let report = engine.score_batch(&items);
//! assert_eq!(report.mean("accuracy"), Some(1.0));
//! ```

pub mod experiment;
pub mod scoring;

pub use experiment::{Experiment, ExperimentResult, ExperimentRunner, Task, TaskFailure};
pub use scoring::{
    builtin_metric, metric_fn, Accuracy, BatchOutcome, Conciseness, Contains, Equals, ItemScores,
    LevenshteinRatio, Metric, MetricFault, ReportAccumulator, Relevance, ResponseQuality, Score,
    ScoreEngine, ScoreEngineBuilder, ScoreEngineConfig, BUILTIN_METRICS,
};
