//! Score a file of answered items
//!
//! Items are read from a JSON array or JSON lines file, scored with the
//! configured built-in metrics, and summarized per metric.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use indexmap::IndexMap;
use serde::Serialize;

use llm_quality_application::{Experiment, ExperimentRunner, MetricFault, ScoreEngine};
use llm_quality_common::{EvalConfig, ScoringConfig};
use llm_quality_domain::{AggregateReport, EvaluationItem, FeedbackScore};

use super::CommandContext;
use crate::input::read_records;
use crate::output::{colors, Formattable, TableFormatter};

/// Prefix of generated experiment names
pub const EXPERIMENT_PREFIX: &str = "quality-eval";

/// Options of the `score` command
#[derive(Debug, Clone, Default)]
pub struct ScoreOptions {
    pub file: PathBuf,
    pub by_category: bool,
    pub feedback: Option<PathBuf>,
    pub ideal_length: Option<usize>,
    pub parallel: bool,
    pub experiment: Option<String>,
    pub metrics: Vec<String>,
}

/// What the `score` command prints
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub experiment: String,
    pub items: usize,
    pub feedback: usize,
    pub report: AggregateReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_category: Option<IndexMap<String, AggregateReport>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub faults: Vec<MetricFault>,
}

impl Formattable for ScoreReport {
    fn format_table(&self) -> Result<String> {
        let mut out = format!(
            "{} {}\n{} items scored",
            colors::bold("Experiment:"),
            self.experiment,
            self.items
        );
        if self.feedback > 0 {
            out.push_str(&format!(", {} feedback scores", self.feedback));
        }
        out.push('\n');

        if self.report.is_empty() {
            out.push_str(&colors::warning("No metric produced a score.").to_string());
        } else {
            out.push_str(&TableFormatter::report(&self.report));
        }

        if let Some(categories) = &self.by_category {
            for (category, report) in categories {
                out.push_str(&format!("\n\n{} {}\n", colors::bold("Category:"), category));
                out.push_str(&TableFormatter::report(report));
            }
        }

        if !self.faults.is_empty() {
            out.push_str(&format!(
                "\n\n{}\n",
                colors::warning(&format!("{} metric faults:", self.faults.len()))
            ));
            for fault in &self.faults {
                out.push_str(&format!(
                    "  item {} {}: {}\n",
                    fault.item_index,
                    fault.metric_name,
                    colors::dim(&fault.reason)
                ));
            }
        }

        Ok(out)
    }
}

/// Scoring configuration with command-line overrides applied
pub fn effective_scoring(config: &EvalConfig, options: &ScoreOptions) -> Result<ScoringConfig> {
    let mut config = config.clone();
    if let Some(ideal_length) = options.ideal_length {
        config.scoring.ideal_length = ideal_length;
    }
    if options.parallel {
        config.scoring.parallel = true;
    }
    if !options.metrics.is_empty() {
        config.scoring.metrics = options.metrics.clone();
    }

    config.validate()?;
    Ok(config.scoring)
}

/// Score the items and build the printed report
pub fn build_report(
    scoring: &ScoringConfig,
    options: &ScoreOptions,
    items: &[EvaluationItem],
    feedback: &[FeedbackScore],
) -> Result<ScoreReport> {
    let engine = ScoreEngine::from_config(scoring).context("Invalid metric configuration")?;
    let runner = ExperimentRunner::new(engine);

    let experiment = match &options.experiment {
        Some(name) => Experiment::new(name.clone()),
        None => Experiment::dated(EXPERIMENT_PREFIX, Utc::now()),
    }
    .with_config("metrics", &scoring.metrics)?
    .with_config("ideal_length", scoring.ideal_length)?;

    let task = |item: &EvaluationItem| -> Result<EvaluationItem> { Ok(item.clone()) };
    let result = runner.run(experiment, items, &task);

    let report = if feedback.is_empty() {
        result.outcome.report.clone()
    } else {
        runner
            .engine()
            .report_with_feedback(&result.outcome, feedback)
            .context("Invalid feedback")?
    };

    Ok(ScoreReport {
        experiment: result.experiment_name,
        items: result.outcome.items.len(),
        feedback: feedback.len(),
        report,
        by_category: options.by_category.then_some(result.outcome.by_category),
        faults: result.outcome.faults,
    })
}

/// Run the `score` command
pub fn run(ctx: &CommandContext, options: ScoreOptions) -> Result<()> {
    let scoring = effective_scoring(&ctx.config, &options)?;
    let items: Vec<EvaluationItem> = read_records(&options.file)?;
    let feedback: Vec<FeedbackScore> = match &options.feedback {
        Some(path) => read_records(path)?,
        None => Vec::new(),
    };

    tracing::debug!(items = items.len(), feedback = feedback.len(), "Loaded input");

    let report = build_report(&scoring, &options, &items, &feedback)?;
    ctx.print(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_quality_domain::TraceId;

    fn items() -> Vec<EvaluationItem> {
        vec![
            EvaluationItem::new("What is 2 + 2?", "4")
                .with_expected_answer("4")
                .with_category("math"),
            EvaluationItem::new("What is the capital of France?", "Paris.").with_category("geo"),
        ]
    }

    #[test]
    fn test_overrides_are_validated() {
        let options = ScoreOptions {
            ideal_length: Some(0),
            ..Default::default()
        };
        assert!(effective_scoring(&EvalConfig::default(), &options).is_err());

        let options = ScoreOptions {
            ideal_length: Some(50),
            parallel: true,
            metrics: vec!["relevance".to_string()],
            ..Default::default()
        };
        let scoring = effective_scoring(&EvalConfig::default(), &options).unwrap();
        assert_eq!(scoring.ideal_length, 50);
        assert!(scoring.parallel);
        assert_eq!(scoring.metrics, vec!["relevance"]);
    }

    #[test]
    fn test_build_report() {
        let options = ScoreOptions {
            by_category: true,
            experiment: Some("nightly".to_string()),
            ..Default::default()
        };
        let report = build_report(&ScoringConfig::default(), &options, &items(), &[]).unwrap();

        assert_eq!(report.experiment, "nightly");
        assert_eq!(report.items, 2);
        assert_eq!(report.report.get("accuracy").unwrap().count, 1);
        let categories = report.by_category.as_ref().unwrap();
        assert!(!categories["geo"].contains("accuracy"));
        assert!(report.faults.is_empty());
    }

    #[test]
    fn test_build_report_with_feedback() {
        let feedback =
            vec![FeedbackScore::from_star_rating(TraceId::new(), "user_rating", 3, None).unwrap()];
        let report = build_report(
            &ScoringConfig::default(),
            &ScoreOptions::default(),
            &items(),
            &feedback,
        )
        .unwrap();

        assert!(report.experiment.starts_with("quality-eval-"));
        assert!(report.by_category.is_none());
        assert!((report.report.mean("user_rating").unwrap() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_metric_fails() {
        let scoring = ScoringConfig {
            metrics: vec!["bleu".to_string()],
            ..Default::default()
        };
        let err = build_report(&scoring, &ScoreOptions::default(), &items(), &[]).unwrap_err();
        assert!(format!("{:#}", err).contains("Unknown metric: bleu"));
    }

    #[test]
    fn test_table_output() {
        let options = ScoreOptions::default();
        let report = build_report(&ScoringConfig::default(), &options, &items(), &[]).unwrap();
        let table = report.format_table().unwrap();
        assert!(table.contains("response_quality"));
        assert!(table.contains("2 items scored"));
    }
}
