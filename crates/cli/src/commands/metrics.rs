//! List the built-in metrics

use anyhow::Result;
use serde::Serialize;

use llm_quality_application::scoring::all_builtin_metrics;

use super::CommandContext;
use crate::output::{Formattable, TableFormatter};

/// One row of the metric listing
#[derive(Debug, Clone, Serialize)]
pub struct MetricInfo {
    pub name: String,
    pub description: String,
    pub reads: Vec<String>,
    pub enabled: bool,
}

/// All built-in metrics, marking those the configuration enables
#[derive(Debug, Clone, Serialize)]
pub struct MetricList {
    pub metrics: Vec<MetricInfo>,
}

impl MetricList {
    pub fn from_enabled(enabled: &[String]) -> Self {
        let metrics = all_builtin_metrics()
            .iter()
            .map(|metric| MetricInfo {
                name: metric.name().to_string(),
                description: metric.description().to_string(),
                reads: metric.reads().iter().map(|f| f.to_string()).collect(),
                enabled: enabled.iter().any(|name| name == metric.name()),
            })
            .collect();
        Self { metrics }
    }
}

impl Formattable for MetricList {
    fn format_table(&self) -> Result<String> {
        let rows = self
            .metrics
            .iter()
            .map(|m| {
                vec![
                    m.name.clone(),
                    if m.enabled { "yes" } else { "no" }.to_string(),
                    m.reads.join(", "),
                    m.description.clone(),
                ]
            })
            .collect::<Vec<_>>();

        Ok(TableFormatter::simple(
            vec!["Metric", "Enabled", "Reads", "Description"],
            rows,
        ))
    }
}

/// Run the `metrics` command
pub fn list(ctx: &CommandContext) -> Result<()> {
    ctx.print(&MetricList::from_enabled(&ctx.config.scoring.metrics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_quality_application::BUILTIN_METRICS;

    #[test]
    fn test_lists_every_builtin_metric() {
        let list = MetricList::from_enabled(&["relevance".to_string()]);
        let names: Vec<&str> = list.metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, BUILTIN_METRICS.to_vec());

        let relevance = list.metrics.iter().find(|m| m.name == "relevance").unwrap();
        assert!(relevance.enabled);
        assert_eq!(relevance.reads, vec!["question", "output"]);
        assert!(list.metrics.iter().filter(|m| m.enabled).count() == 1);
    }

    #[test]
    fn test_table_output() {
        let table = MetricList::from_enabled(&[]).format_table().unwrap();
        assert!(table.contains("similarity"));
        assert!(table.contains("Description"));
    }
}
