//! Experiment runner
//!
//! Runs a task over dataset rows to obtain answered items, then scores them.
//! The task is where a model caller plugs in; the runner never talks to a
//! model itself. A row whose task fails is recorded and skipped, the run
//! always completes.

use crate::scoring::{BatchOutcome, ScoreEngine};
use anyhow::Context;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use llm_quality_domain::{EvaluationItem, ExperimentId};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Produces an answered item from a dataset row
pub trait Task<Row> {
    fn run(&self, row: &Row) -> anyhow::Result<EvaluationItem>;
}

impl<Row, F> Task<Row> for F
where
    F: Fn(&Row) -> anyhow::Result<EvaluationItem>,
{
    fn run(&self, row: &Row) -> anyhow::Result<EvaluationItem> {
        self(row)
    }
}

/// A named evaluation run and its free-form metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: ExperimentId,
    pub name: String,
    /// Metadata passed through to the result (model version, purpose, ...)
    pub config: IndexMap<String, serde_json::Value>,
}

impl Experiment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ExperimentId::new(),
            name: name.into(),
            config: IndexMap::new(),
        }
    }

    /// Experiment named `{prefix}-YYYYMMDD-HHMM`
    pub fn dated(prefix: &str, now: DateTime<Utc>) -> Self {
        Self::new(format!("{}-{}", prefix, now.format("%Y%m%d-%H%M")))
    }

    /// Add a metadata entry
    pub fn with_config(
        mut self,
        key: impl Into<String>,
        value: impl Serialize,
    ) -> anyhow::Result<Self> {
        let key = key.into();
        let value = serde_json::to_value(value)
            .with_context(|| format!("Failed to serialize experiment config '{}'", key))?;
        self.config.insert(key, value);
        Ok(self)
    }
}

/// A row whose task did not produce an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskFailure {
    pub row_index: usize,
    pub error: String,
}

/// Everything an experiment run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub experiment_id: ExperimentId,
    pub experiment_name: String,
    pub config: IndexMap<String, serde_json::Value>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Row index of each scored item; `outcome.items[i]` came from row `scored_rows[i]`
    pub scored_rows: Vec<usize>,
    pub task_failures: Vec<TaskFailure>,
    pub outcome: BatchOutcome,
}

impl ExperimentResult {
    /// Rows attempted, successful or not
    pub fn total_rows(&self) -> usize {
        self.scored_rows.len() + self.task_failures.len()
    }

    /// Metric name to mean score
    pub fn aggregate_scores(&self) -> IndexMap<String, f64> {
        self.outcome.report.means()
    }
}

/// Runs experiments against a score engine
#[derive(Debug)]
pub struct ExperimentRunner {
    engine: ScoreEngine,
}

impl ExperimentRunner {
    pub fn new(engine: ScoreEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ScoreEngine {
        &self.engine
    }

    /// Run the task on every row and score the items it produced
    #[instrument(skip_all, fields(experiment = %experiment.name, rows = rows.len()))]
    pub fn run<Row, T>(&self, experiment: Experiment, rows: &[Row], task: &T) -> ExperimentResult
    where
        T: Task<Row> + ?Sized,
    {
        let started_at = Utc::now();
        info!("Starting experiment");

        let mut items = Vec::with_capacity(rows.len());
        let mut scored_rows = Vec::with_capacity(rows.len());
        let mut task_failures = Vec::new();

        for (row_index, row) in rows.iter().enumerate() {
            match task.run(row) {
                Ok(item) => {
                    items.push(item);
                    scored_rows.push(row_index);
                }
                Err(e) => {
                    warn!(row_index, error = %e, "Task failed");
                    task_failures.push(TaskFailure {
                        row_index,
                        error: format!("{:#}", e),
                    });
                }
            }
        }

        let outcome = self.engine.run_batch(&items);
        let finished_at = Utc::now();

        info!(
            scored = scored_rows.len(),
            task_failures = task_failures.len(),
            metric_faults = outcome.faults.len(),
            "Experiment finished"
        );

        ExperimentResult {
            experiment_id: experiment.id,
            experiment_name: experiment.name,
            config: experiment.config,
            started_at,
            finished_at,
            scored_rows,
            task_failures,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Accuracy, Relevance};
    use chrono::TimeZone;

    #[test]
    fn test_dated_name() {
        let now = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 42).unwrap();
        let experiment = Experiment::dated("quality-tracking", now);
        assert_eq!(experiment.name, "quality-tracking-20240307-0905");
    }

    #[test]
    fn test_config_metadata_keeps_order() {
        let experiment = Experiment::new("run")
            .with_config("model_version", "v1.0")
            .and_then(|e| e.with_config("purpose", "quality_monitoring"))
            .and_then(|e| e.with_config("temperature", 0.7))
            .unwrap();

        let keys: Vec<&str> = experiment.config.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["model_version", "purpose", "temperature"]);
        assert_eq!(experiment.config["temperature"], serde_json::json!(0.7));
    }

    #[test]
    fn test_unserializable_config_is_an_error() {
        let mut by_pair = std::collections::HashMap::new();
        by_pair.insert((1, 2), "non-string keys cannot be JSON object keys");

        let err = Experiment::new("run").with_config("pairs", by_pair).unwrap_err();
        assert!(format!("{:#}", err).contains("experiment config 'pairs'"));
    }

    #[test]
    fn test_task_failures_do_not_abort() {
        let mut engine = ScoreEngine::default();
        engine.register(Relevance::new()).unwrap();
        engine.register(Accuracy::new()).unwrap();
        let runner = ExperimentRunner::new(engine);

        let rows = vec!["What is 2 + 2?", "fail", "What is 3 + 3?"];
        let task = |row: &&str| -> anyhow::Result<EvaluationItem> {
            if *row == "fail" {
                anyhow::bail!("model endpoint returned 503");
            }
            Ok(EvaluationItem::new(*row, "The answer is 4").with_expected_answer("4"))
        };

        let result = runner.run(Experiment::new("arith"), &rows, &task);

        assert_eq!(result.total_rows(), 3);
        assert_eq!(result.scored_rows, vec![0, 2]);
        assert_eq!(result.task_failures.len(), 1);
        assert_eq!(result.task_failures[0].row_index, 1);
        assert!(result.task_failures[0].error.contains("503"));
        assert_eq!(result.outcome.item_count(), 2);
        assert_eq!(result.aggregate_scores()["accuracy"], 1.0);
        assert!(result.finished_at >= result.started_at);
    }
}
