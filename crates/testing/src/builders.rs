//! Fluent builder for constructing test items.

use fake::{
    faker::lorem::en::{Paragraph, Sentence},
    Fake,
};
use llm_quality_domain::EvaluationItem;

/// Builder for creating EvaluationItem test instances
#[derive(Debug, Clone)]
pub struct EvaluationItemBuilder {
    question: String,
    output: String,
    expected_answer: Option<String>,
    reference: Option<String>,
    category: Option<String>,
}

impl EvaluationItemBuilder {
    pub fn new() -> Self {
        Self {
            question: "What is machine learning?".to_string(),
            output: "Machine learning is a subset of AI that learns patterns from data."
                .to_string(),
            expected_answer: None,
            reference: None,
            category: None,
        }
    }

    /// Start from random lorem question and answer
    pub fn random() -> Self {
        Self {
            question: Sentence(4..10).fake(),
            output: Paragraph(1..3).fake(),
            ..Self::new()
        }
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = question.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    /// Answer made of `len` copies of `'x'`
    pub fn with_output_len(mut self, len: usize) -> Self {
        self.output = "x".repeat(len);
        self
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

    pub fn build(self) -> EvaluationItem {
        EvaluationItem {
            question: self.question,
            output: self.output,
            expected_answer: self.expected_answer,
            reference: self.reference,
            category: self.category,
        }
    }
}

impl Default for EvaluationItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}
