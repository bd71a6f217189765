//! JSON and plain-text formatters

use anyhow::Result;
use serde::Serialize;

/// JSON formatter
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format a value as pretty JSON
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// Plain text formatter
pub struct PlainFormatter;

impl PlainFormatter {
    /// Format a value as indented `key: value` lines
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        let json = serde_json::to_value(value)?;
        Ok(Self::format_value(&json, 0))
    }

    fn format_value(value: &serde_json::Value, indent: usize) -> String {
        let indent_str = "  ".repeat(indent);
        match value {
            serde_json::Value::Null => "-".to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => i.to_string(),
                (None, Some(f)) => format!("{:.4}", f),
                _ => n.to_string(),
            },
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(arr) => {
                let items: Vec<String> = arr
                    .iter()
                    .map(|v| format!("\n{}- {}", indent_str, Self::format_value(v, indent + 1)))
                    .collect();
                items.concat()
            }
            serde_json::Value::Object(obj) => {
                let items: Vec<String> = obj
                    .iter()
                    .map(|(k, v)| match v {
                        serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                            format!("\n{}{}:{}", indent_str, k, Self::format_value(v, indent + 1))
                        }
                        _ => format!(
                            "\n{}{}: {}",
                            indent_str,
                            k,
                            Self::format_value(v, indent + 1)
                        ),
                    })
                    .collect();
                items.concat()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Summary {
        metric: String,
        mean: f64,
        count: usize,
    }

    #[test]
    fn test_json_formatter() {
        let data = Summary {
            metric: "relevance".to_string(),
            mean: 0.5,
            count: 3,
        };
        let result = JsonFormatter::format(&data).unwrap();
        assert!(result.contains("\"relevance\""));
    }

    #[test]
    fn test_plain_formatter() {
        let data = Summary {
            metric: "relevance".to_string(),
            mean: 2.0 / 3.0,
            count: 3,
        };
        let result = PlainFormatter::format(&data).unwrap();
        assert!(result.contains("metric: relevance"));
        assert!(result.contains("mean: 0.6667"));
        assert!(result.contains("count: 3"));
    }
}
