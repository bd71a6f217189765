//! Show the effective configuration

use anyhow::Result;
use serde::Serialize;

use llm_quality_common::EvalConfig;

use super::CommandContext;
use crate::output::{Formattable, TableFormatter};

/// The configuration after files and `QUALITY_` variables are layered
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ConfigView(pub EvalConfig);

impl Formattable for ConfigView {
    fn format_table(&self) -> Result<String> {
        let config = &self.0;
        let threads = match config.scoring.max_threads {
            Some(n) => n.to_string(),
            None => "(all CPUs)".to_string(),
        };

        Ok(TableFormatter::key_value(vec![
            ("scoring.metrics", config.scoring.metrics.join(", ")),
            ("scoring.ideal_length", config.scoring.ideal_length.to_string()),
            ("scoring.parallel", config.scoring.parallel.to_string()),
            ("scoring.max_threads", threads),
            ("scoring.case_sensitive", config.scoring.case_sensitive.to_string()),
            ("telemetry.log_level", config.telemetry.log_level.clone()),
            ("telemetry.json_logging", config.telemetry.json_logging.to_string()),
            ("output.format", config.output.format.clone()),
            ("output.colored", config.output.colored.to_string()),
        ]))
    }
}

/// Run the `config` command
pub fn show(ctx: &CommandContext) -> Result<()> {
    ctx.print(&ConfigView(ctx.config.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_key() {
        let table = ConfigView(EvalConfig::default()).format_table().unwrap();
        assert!(table.contains("scoring.ideal_length"));
        assert!(table.contains("200"));
        assert!(table.contains("(all CPUs)"));
    }

    #[test]
    fn test_json_matches_config_shape() {
        let json = ConfigView(EvalConfig::default()).format_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["scoring"]["ideal_length"], 200);
        assert_eq!(value["output"]["format"], "table");
    }
}
