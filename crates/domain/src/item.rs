//! Evaluation items: one answered question, ready to be scored.

use crate::errors::ItemField;
use serde::{Deserialize, Serialize};

/// A question, the model's answer, and whatever ground truth the dataset row
/// carried.
///
/// Items are produced once by the task that called the model and are never
/// mutated afterwards; metrics only ever see `&EvaluationItem`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationItem {
    /// The prompt sent to the model
    #[serde(alias = "input")]
    pub question: String,

    /// The model's answer
    #[serde(alias = "answer")]
    pub output: String,

    /// Ground-truth answer, when the dataset row has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_answer: Option<String>,

    /// Reference text the answer should draw on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Free-form grouping label (e.g. "technical", "support")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl EvaluationItem {
    /// Create an item with only a question and an answer
    pub fn new(question: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            output: output.into(),
            expected_answer: None,
            reference: None,
            category: None,
        }
    }

    pub fn with_expected_answer(mut self, expected: impl Into<String>) -> Self {
        self.expected_answer = Some(expected.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// The question, or `None` when it is empty
    pub fn input(&self) -> Option<&str> {
        non_empty(Some(self.question.as_str()))
    }

    /// Expected answer, treating an empty string as absent
    pub fn expected(&self) -> Option<&str> {
        non_empty(self.expected_answer.as_deref())
    }

    /// Reference text, treating an empty string as absent
    pub fn reference_text(&self) -> Option<&str> {
        non_empty(self.reference.as_deref())
    }

    /// Ground truth for comparison metrics: the reference, else the expected answer
    pub fn ground_truth(&self) -> Option<&str> {
        self.reference_text().or_else(|| self.expected())
    }

    /// Whether the given field is present and non-empty
    pub fn has(&self, field: ItemField) -> bool {
        match field {
            ItemField::Question => self.input().is_some(),
            ItemField::Output => !self.output.is_empty(),
            ItemField::ExpectedAnswer => self.expected().is_some(),
            ItemField::Reference => self.reference_text().is_some(),
            ItemField::Category => non_empty(self.category.as_deref()).is_some(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
