//! Testing utilities for LLM answer-quality scoring
//!
//! This crate provides:
//! - Fixtures: the sample question dataset and random items
//! - A builder for evaluation items
//! - Mock metrics (constant, failing, panicking, recording) and tasks
//! - Proptest strategies for property-based tests
//!
//! # Examples
//!
//! ```
//! use llm_quality_testing::{fixtures::*, builders::*};
//!
//! let items = sample_items();
//! assert_eq!(items.len(), 3);
//!
//! let item = EvaluationItemBuilder::new()
//!     .with_output_len(250)
//!     .with_expected_answer("subset of AI")
//!     .build();
//! assert_eq!(item.output.chars().count(), 250);
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;
pub mod strategies;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
