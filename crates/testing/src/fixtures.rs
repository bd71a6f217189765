//! Test fixtures for evaluation items and dataset rows.
//!
//! The sample questions are the small support/technical dataset used by the
//! quality-tracking demos; the random helpers fill items with lorem text.

use fake::{
    faker::lorem::en::{Paragraph, Sentence, Word},
    Fake,
};
use llm_quality_domain::{EvaluationItem, FeedbackScore, TraceId, USER_RATING_METRIC};
use serde::{Deserialize, Serialize};

/// A dataset row before the model has answered it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleQuestion {
    pub question: String,
    pub expected_answer: String,
    pub category: String,
}

impl SampleQuestion {
    pub fn new(
        question: impl Into<String>,
        expected_answer: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            expected_answer: expected_answer.into(),
            category: category.into(),
        }
    }

    /// Item for this row with the given answer; the expected answer doubles
    /// as the reference
    pub fn answered(&self, answer: impl Into<String>) -> EvaluationItem {
        EvaluationItem::new(self.question.clone(), answer)
            .with_expected_answer(self.expected_answer.clone())
            .with_reference(self.expected_answer.clone())
            .with_category(self.category.clone())
    }
}

/// The three-question quality-tracking dataset
pub fn sample_questions() -> Vec<SampleQuestion> {
    vec![
        SampleQuestion::new(
            "What is machine learning?",
            "Machine learning is a subset of AI that enables systems to learn from data",
            "technical",
        ),
        SampleQuestion::new(
            "How do I reset my password?",
            "Click forgot password, check your email, and follow the reset link",
            "support",
        ),
        SampleQuestion::new(
            "What are your business hours?",
            "We are open Monday to Friday, 9 AM to 5 PM",
            "general",
        ),
    ]
}

/// The canned answer the demos use in place of a model call
pub fn canned_answer(question: &str) -> String {
    format!("This is a sample answer to: {}", question)
}

/// Sample questions answered with the canned answer
pub fn sample_items() -> Vec<EvaluationItem> {
    sample_questions()
        .iter()
        .map(|q| q.answered(canned_answer(&q.question)))
        .collect()
}

/// "What is the capital of France?" answered with "Paris."
pub fn create_paris_item() -> EvaluationItem {
    EvaluationItem::new("What is the capital of France?", "Paris.")
}

/// "What is 2 + 2?" answered correctly
pub fn create_arithmetic_item() -> EvaluationItem {
    EvaluationItem::new("What is 2 + 2?", "4").with_expected_answer("4")
}

/// Item with random question, answer and expected answer
pub fn create_test_item() -> EvaluationItem {
    let question: String = Sentence(4..10).fake();
    let output: String = Paragraph(1..3).fake();
    let expected: String = Sentence(2..6).fake();

    EvaluationItem::new(question, output)
        .with_expected_answer(expected)
        .with_category(Word().fake::<String>())
}

/// `count` random items
pub fn create_test_items(count: usize) -> Vec<EvaluationItem> {
    (0..count).map(|_| create_test_item()).collect()
}

/// A 1-5 star rating for a fresh trace
pub fn create_test_star_rating(rating: u8) -> FeedbackScore {
    FeedbackScore::from_star_rating(
        TraceId::new(),
        USER_RATING_METRIC,
        rating,
        Some("Reviewer rating".to_string()),
    )
    .expect("rating fixture must be within 1..=5")
}
