//! Lexical quality heuristics.
//!
//! Four cheap metrics that need no model and no external service:
//!
//! - [`ResponseQuality`]: length, reference overlap, sentence shape, capitalization
//! - [`Relevance`]: share of question words repeated in the answer
//! - [`Conciseness`]: penalty for answers longer than an ideal length
//! - [`Accuracy`]: share of expected-answer words found in the answer

use super::metric::{Metric, Score};
use super::text::{char_len, count_char, lowercase_words, starts_uppercase, word_set};
use llm_quality_common::DEFAULT_IDEAL_LENGTH;
use llm_quality_domain::{EvaluationItem, ItemField, MetricError, ScoringError, ScoringResult};
use tracing::trace;

/// Answers longer than this many characters count as complete
const COMPLETE_LENGTH: usize = 50;

/// Minimum number of spaces for an answer to look like a sentence
const SENTENCE_SPACES: usize = 5;

/// Weight of each of the four response-quality checks
const CHECK_WEIGHT: f64 = 0.25;

/// Overall response quality from four equally weighted checks.
///
/// Each check adds 0.25:
///
/// 1. the answer is longer than 50 characters
/// 2. a reference is given and any of its words occurs in the answer
///    (case-insensitive substring)
/// 3. the answer has at least one `.` and at least five spaces
/// 4. the answer starts with an uppercase letter
#[derive(Debug, Clone)]
pub struct ResponseQuality {
    name: String,
}

impl ResponseQuality {
    pub const DEFAULT_NAME: &'static str = "response_quality";

    pub fn new() -> Self {
        Self::named(Self::DEFAULT_NAME)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for ResponseQuality {
    fn default() -> Self {
        Self::new()
    }
}

impl Metric for ResponseQuality {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, item: &EvaluationItem) -> Result<Score, MetricError> {
        let output = item.output.as_str();
        let mut checks = Vec::with_capacity(4);

        if char_len(output) > COMPLETE_LENGTH {
            checks.push("complete");
        }

        if let Some(reference) = item.reference_text() {
            let output_lower = output.to_lowercase();
            if lowercase_words(reference)
                .iter()
                .any(|word| output_lower.contains(word.as_str()))
            {
                checks.push("addresses reference");
            }
        }

        if count_char(output, '.') >= 1 && count_char(output, ' ') >= SENTENCE_SPACES {
            checks.push("coherent");
        }

        if starts_uppercase(output) {
            checks.push("capitalized");
        }

        let value = CHECK_WEIGHT * checks.len() as f64;
        trace!(metric = %self.name, value, ?checks, "response quality");

        let score = Score::value(value);
        if checks.is_empty() {
            Ok(score)
        } else {
            Ok(score.with_reason(checks.join(", ")))
        }
    }

    fn reads(&self) -> &'static [ItemField] {
        &[ItemField::Output, ItemField::Reference]
    }

    fn description(&self) -> &'static str {
        "Length, reference overlap, sentence shape and capitalization (0.25 each)"
    }
}

/// Share of the question's distinct words that reappear in the answer.
///
/// Both sides are lowercased and split on whitespace; punctuation stays part
/// of the word. A missing or blank question scores 0.0.
#[derive(Debug, Clone)]
pub struct Relevance {
    name: String,
}

impl Relevance {
    pub const DEFAULT_NAME: &'static str = "relevance";

    pub fn new() -> Self {
        Self::named(Self::DEFAULT_NAME)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for Relevance {
    fn default() -> Self {
        Self::new()
    }
}

impl Metric for Relevance {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, item: &EvaluationItem) -> Result<Score, MetricError> {
        let Some(input) = item.input() else {
            return Ok(Score::value(0.0).with_reason("no question"));
        };

        let question_words = word_set(input);
        if question_words.is_empty() {
            return Ok(Score::value(0.0).with_reason("question has no words"));
        }

        let answer_words = word_set(&item.output);
        let common = question_words.intersection(&answer_words).count();
        let value = (common as f64 / question_words.len() as f64).min(1.0);

        Ok(Score::value(value))
    }

    fn reads(&self) -> &'static [ItemField] {
        &[ItemField::Question, ItemField::Output]
    }

    fn description(&self) -> &'static str {
        "Share of question words repeated in the answer"
    }
}

/// Penalizes answers longer than an ideal length.
///
/// Answers up to `ideal_length` characters score 1.0. Beyond that the score
/// falls linearly and reaches 0.0 at twice the ideal length.
#[derive(Debug, Clone)]
pub struct Conciseness {
    name: String,
    ideal_length: usize,
}

impl Conciseness {
    pub const DEFAULT_NAME: &'static str = "conciseness";

    /// Conciseness with the default ideal length of 200 characters
    pub fn new() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            ideal_length: DEFAULT_IDEAL_LENGTH,
        }
    }

    /// Conciseness with a custom ideal length; zero is rejected
    pub fn with_ideal_length(ideal_length: usize) -> ScoringResult<Self> {
        if ideal_length == 0 {
            return Err(ScoringError::InvalidIdealLength(ideal_length));
        }
        Ok(Self {
            name: Self::DEFAULT_NAME.to_string(),
            ideal_length,
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn ideal_length(&self) -> usize {
        self.ideal_length
    }
}

impl Default for Conciseness {
    fn default() -> Self {
        Self::new()
    }
}

impl Metric for Conciseness {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, item: &EvaluationItem) -> Result<Score, MetricError> {
        let length = char_len(&item.output);
        if length <= self.ideal_length {
            return Ok(Score::value(1.0));
        }

        let excess = (length - self.ideal_length) as f64;
        let penalty = (excess / self.ideal_length as f64).min(1.0);

        Ok(Score::value((1.0 - penalty).max(0.0)).with_reason(format!(
            "{} characters over {}",
            length - self.ideal_length,
            self.ideal_length
        )))
    }

    fn description(&self) -> &'static str {
        "1.0 up to the ideal length, falling to 0.0 at twice that length"
    }
}

/// Share of expected-answer words found in the answer.
///
/// Words of the expected answer are matched as case-insensitive substrings of
/// the whole answer. Items without an expected answer, or whose expected
/// answer has no words, are not scored.
#[derive(Debug, Clone)]
pub struct Accuracy {
    name: String,
}

impl Accuracy {
    pub const DEFAULT_NAME: &'static str = "accuracy";

    pub fn new() -> Self {
        Self::named(Self::DEFAULT_NAME)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for Accuracy {
    fn default() -> Self {
        Self::new()
    }
}

impl Metric for Accuracy {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, item: &EvaluationItem) -> Result<Score, MetricError> {
        let Some(expected) = item.expected() else {
            return Ok(Score::not_applicable("no expected answer"));
        };

        let keywords = lowercase_words(expected);
        if keywords.is_empty() {
            return Ok(Score::not_applicable("expected answer has no words"));
        }

        let output_lower = item.output.to_lowercase();
        let matches = keywords
            .iter()
            .filter(|keyword| output_lower.contains(keyword.as_str()))
            .count();

        Ok(Score::value(matches as f64 / keywords.len() as f64)
            .with_reason(format!("{}/{} expected words found", matches, keywords.len())))
    }

    fn reads(&self) -> &'static [ItemField] {
        &[ItemField::Output, ItemField::ExpectedAnswer]
    }

    fn description(&self) -> &'static str {
        "Share of expected-answer words found in the answer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(metric: &dyn Metric, item: &EvaluationItem) -> Option<f64> {
        metric.score(item).unwrap().as_f64()
    }

    #[test]
    fn test_response_quality_short_capitalized() {
        let item = EvaluationItem::new("What is the capital of France?", "Paris.");
        assert_eq!(value(&ResponseQuality::new(), &item), Some(0.25));
    }

    #[test]
    fn test_response_quality_all_checks() {
        let item = EvaluationItem::new(
            "What is machine learning?",
            "Machine learning is a subset of AI that lets systems learn patterns from data.",
        )
        .with_reference("subset of AI");
        assert_eq!(value(&ResponseQuality::new(), &item), Some(1.0));
    }

    #[test]
    fn test_response_quality_empty_output() {
        let item = EvaluationItem::new("q", "").with_reference("anything");
        assert_eq!(value(&ResponseQuality::new(), &item), Some(0.0));
    }

    #[test]
    fn test_response_quality_reference_substring_match() {
        // "cat" is found inside "category"
        let item = EvaluationItem::new("q", "category").with_reference("Cat");
        assert_eq!(value(&ResponseQuality::new(), &item), Some(0.25));
    }

    #[test]
    fn test_relevance_example() {
        let item = EvaluationItem::new(
            "What is the capital of France?",
            "The capital of France is Paris",
        );
        let score = value(&Relevance::new(), &item).unwrap();
        assert!((score - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_relevance_without_question() {
        let item = EvaluationItem::new("", "anything at all");
        assert_eq!(value(&Relevance::new(), &item), Some(0.0));

        let item = EvaluationItem::new("   ", "anything at all");
        assert_eq!(value(&Relevance::new(), &item), Some(0.0));
    }

    #[test]
    fn test_conciseness_boundaries() {
        let metric = Conciseness::with_ideal_length(10).unwrap();

        assert_eq!(value(&metric, &EvaluationItem::new("q", "")), Some(1.0));
        assert_eq!(value(&metric, &EvaluationItem::new("q", "x".repeat(10))), Some(1.0));
        assert_eq!(value(&metric, &EvaluationItem::new("q", "x".repeat(15))), Some(0.5));
        assert_eq!(value(&metric, &EvaluationItem::new("q", "x".repeat(20))), Some(0.0));
        assert_eq!(value(&metric, &EvaluationItem::new("q", "x".repeat(400))), Some(0.0));
    }

    #[test]
    fn test_conciseness_rejects_zero_ideal_length() {
        assert_eq!(
            Conciseness::with_ideal_length(0).unwrap_err(),
            ScoringError::InvalidIdealLength(0)
        );
    }

    #[test]
    fn test_accuracy_examples() {
        let item = EvaluationItem::new("What is 2 + 2?", "4").with_expected_answer("4");
        assert_eq!(value(&Accuracy::new(), &item), Some(1.0));

        let item = EvaluationItem::new("q", "Paris is lovely").with_expected_answer("Paris France");
        assert_eq!(value(&Accuracy::new(), &item), Some(0.5));
    }

    #[test]
    fn test_accuracy_not_applicable() {
        let metric = Accuracy::new();

        let item = EvaluationItem::new("q", "answer");
        assert_eq!(value(&metric, &item), None);

        let item = EvaluationItem::new("q", "answer").with_expected_answer("");
        assert_eq!(value(&metric, &item), None);

        let item = EvaluationItem::new("q", "answer").with_expected_answer(" \t ");
        assert_eq!(
            metric.score(&item).unwrap(),
            Score::not_applicable("expected answer has no words")
        );
    }

    #[test]
    fn test_custom_names() {
        assert_eq!(ResponseQuality::named("overall_quality").name(), "overall_quality");
        assert_eq!(Relevance::named("relevance_score").name(), "relevance_score");
        assert_eq!(
            Conciseness::new().named("conciseness_score").name(),
            "conciseness_score"
        );
        assert_eq!(Accuracy::named("accuracy_score").name(), "accuracy_score");
    }
}
