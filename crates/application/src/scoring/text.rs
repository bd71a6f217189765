//! Lexical helpers shared by the heuristic metrics.
//!
//! Tokenization is a plain whitespace split and matching is case-insensitive
//! substring containment. Punctuation stays attached to words ("france?" is
//! not "france"), and a word matches inside a longer one ("cat" matches
//! "category"). Scores depend on both behaviours.

use std::collections::HashSet;

/// Length in Unicode scalar values
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Lowercased whitespace-separated words, in order, duplicates kept
pub fn lowercase_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Distinct lowercased whitespace-separated words
pub fn word_set(text: &str) -> HashSet<String> {
    lowercase_words(text).into_iter().collect()
}

/// Whether the first character is an uppercase letter
pub fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

/// Number of occurrences of `needle` in `text`
pub fn count_char(text: &str, needle: char) -> usize {
    text.chars().filter(|&c| c == needle).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_keep_punctuation() {
        assert_eq!(
            lowercase_words("What is the capital of France?"),
            vec!["what", "is", "the", "capital", "of", "france?"]
        );
    }

    #[test]
    fn test_word_set_dedupes() {
        let words = word_set("the cat and THE dog");
        assert_eq!(words.len(), 4);
        assert!(words.contains("the"));
    }

    #[test]
    fn test_char_len_counts_scalars() {
        assert_eq!(char_len("héllo"), 5);
        assert_eq!(char_len(""), 0);
    }

    #[test]
    fn test_starts_uppercase() {
        assert!(starts_uppercase("Paris"));
        assert!(starts_uppercase("Élan"));
        assert!(!starts_uppercase("paris"));
        assert!(!starts_uppercase("42 is the answer"));
        assert!(!starts_uppercase(""));
    }

    #[test]
    fn test_count_char() {
        assert_eq!(count_char("a b c", ' '), 2);
        assert_eq!(count_char("no dots", '.'), 0);
    }
}
