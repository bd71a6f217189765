//! Reading items and feedback records from disk.
//!
//! Files hold either a single JSON array or one JSON object per line.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read records from a JSON array or JSON lines file
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_records(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse records from a JSON array or JSON lines
pub fn parse_records<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    if content.trim_start().starts_with('[') {
        return serde_json::from_str(content).context("Invalid JSON array");
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Invalid JSON on line {}", index + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_quality_domain::EvaluationItem;

    #[test]
    fn test_parse_json_array() {
        let items: Vec<EvaluationItem> = parse_records(
            r#"[
                {"question": "What is 2 + 2?", "output": "4", "expected_answer": "4"},
                {"input": "Capital of France?", "answer": "Paris.", "category": "geo"}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].question, "Capital of France?");
        assert_eq!(items[1].category.as_deref(), Some("geo"));
    }

    #[test]
    fn test_parse_json_lines() {
        let content = concat!(
            "{\"question\": \"q1\", \"output\": \"a1\"}\n",
            "\n",
            "{\"question\": \"q2\", \"output\": \"a2\"}\n",
        );
        let items: Vec<EvaluationItem> = parse_records(content).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].output, "a2");
    }

    #[test]
    fn test_parse_error_names_line() {
        let content = "{\"question\": \"q1\", \"output\": \"a1\"}\n{not json}\n";
        let err = parse_records::<EvaluationItem>(content).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_empty_file_has_no_records() {
        let items: Vec<EvaluationItem> = parse_records("").unwrap();
        assert!(items.is_empty());
    }
}
