//! Proptest strategies for evaluation items.

use llm_quality_domain::EvaluationItem;
use proptest::prelude::*;
use proptest::sample::select;

const VOCABULARY: &[&str] = &[
    "what", "is", "the", "capital", "of", "France", "Paris", "machine", "learning", "AI",
    "data", "reset", "password", "email", "hours", "Monday", "Friday", "4", "2", "+",
];

const CATEGORIES: &[&str] = &["technical", "support", "general"];

/// Mixed-case words drawn from a small vocabulary
pub fn arb_word() -> impl Strategy<Value = String> {
    select(VOCABULARY).prop_map(str::to_string)
}

/// Whitespace-joined text of up to `max_words` vocabulary words
pub fn arb_text(max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(arb_word(), 0..=max_words).prop_map(|words| words.join(" "))
}

/// Arbitrary unicode text, including punctuation and multi-byte chars
pub fn arb_unicode_text() -> impl Strategy<Value = String> {
    "\\PC{0,300}"
}

/// Items with random question, answer, and optional ground truth
pub fn arb_item() -> impl Strategy<Value = EvaluationItem> {
    (
        arb_text(12),
        arb_unicode_text(),
        prop::option::of(arb_text(6)),
        prop::option::of(arb_text(6)),
        prop::option::of(select(CATEGORIES)),
    )
        .prop_map(|(question, output, expected, reference, category)| EvaluationItem {
            question,
            output,
            expected_answer: expected,
            reference,
            category: category.map(str::to_string),
        })
}
