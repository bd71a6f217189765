//! Table formatting utilities

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, *};
use llm_quality_domain::AggregateReport;

/// Table formatter
pub struct TableFormatter;

impl TableFormatter {
    /// Create a new table with default styling
    pub fn new() -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    /// Create a simple table with headers and rows
    pub fn simple(headers: Vec<&str>, rows: Vec<Vec<String>>) -> String {
        let mut table = Self::new();
        table.set_header(headers);

        for row in rows {
            table.add_row(row);
        }

        table.to_string()
    }

    /// Create a key-value table
    pub fn key_value(items: Vec<(&str, String)>) -> String {
        let mut table = Self::new();

        for (key, value) in items {
            table.add_row(vec![Cell::new(key).add_attribute(Attribute::Bold), Cell::new(value)]);
        }

        table.to_string()
    }

    /// One row per metric: mean, count, min, max, standard deviation
    pub fn report(report: &AggregateReport) -> String {
        let mut table = Self::new();
        table.set_header(vec!["Metric", "Mean", "Count", "Min", "Max", "Std Dev"]);

        for (name, summary) in report.iter() {
            table.add_row(vec![
                Cell::new(name),
                Cell::new(format!("{:.3}", summary.mean)).fg(score_color(summary.mean)),
                Cell::new(summary.count).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", summary.min)),
                Cell::new(format!("{:.3}", summary.max)),
                Cell::new(format!("{:.3}", summary.std_dev)),
            ]);
        }

        table.to_string()
    }
}

fn score_color(value: f64) -> Color {
    if value >= 0.75 {
        Color::Green
    } else if value >= 0.5 {
        Color::Yellow
    } else {
        Color::Red
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_quality_domain::MetricSummary;

    #[test]
    fn test_simple_table() {
        let rows = vec![
            vec!["relevance".to_string(), "Output, Question".to_string()],
            vec!["accuracy".to_string(), "Output, ExpectedAnswer".to_string()],
        ];
        let result = TableFormatter::simple(vec!["Metric", "Reads"], rows);
        assert!(result.contains("accuracy"));
    }

    #[test]
    fn test_key_value_table() {
        let result = TableFormatter::key_value(vec![("Ideal length", "200".to_string())]);
        assert!(result.contains("Ideal length"));
    }

    #[test]
    fn test_report_table() {
        let mut report = AggregateReport::new();
        report.insert(
            "relevance",
            MetricSummary {
                mean: 2.0 / 3.0,
                count: 3,
                min: 0.0,
                max: 1.0,
                std_dev: 0.5774,
            },
        );

        let table = TableFormatter::report(&report);
        assert!(table.contains("relevance"));
        assert!(table.contains("0.667"));
        assert!(table.contains("Std Dev"));
    }
}
