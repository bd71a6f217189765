//! Score Engine - applies registered metrics to items and aggregates results
//!
//! The engine holds an ordered set of metrics. Scoring an item runs every
//! metric in registration order; a metric that errors, panics or returns a
//! value outside [0, 1] yields an unscored result for that item only. Batches
//! always complete.

use super::aggregate::ReportAccumulator;
use super::catalog::builtin_metric;
use super::metric::{Metric, Score};
use indexmap::IndexMap;
use llm_quality_common::ScoringConfig;
use llm_quality_domain::{
    AggregateReport, EvaluationItem, FeedbackError, FeedbackScore, MetricResult, ScoringError,
    ScoringResult,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Score engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreEngineConfig {
    /// Score batches on a rayon pool in [`ScoreEngine::run_batch`]
    pub parallel: bool,
    /// Pool size for parallel scoring, `None` for one thread per CPU
    pub max_threads: Option<usize>,
}

impl From<&ScoringConfig> for ScoreEngineConfig {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            parallel: config.parallel,
            max_threads: config.max_threads,
        }
    }
}

/// Results of every metric on one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemScores {
    /// Position of the item in the batch
    pub item_index: usize,
    /// One result per registered metric, in registration order
    pub results: Vec<MetricResult>,
}

impl ItemScores {
    /// Result of a metric by name
    pub fn get(&self, metric_name: &str) -> Option<&MetricResult> {
        self.results.iter().find(|r| r.metric_name == metric_name)
    }
}

/// A metric that failed on an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricFault {
    pub item_index: usize,
    pub metric_name: String,
    pub reason: String,
}

/// Everything a batch produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Per-item results, in item order
    pub items: Vec<ItemScores>,
    /// Summary over all items
    pub report: AggregateReport,
    /// Summary per item category, in order of first appearance
    pub by_category: IndexMap<String, AggregateReport>,
    /// Metric failures converted into unscored results
    pub faults: Vec<MetricFault>,
}

impl BatchOutcome {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn has_faults(&self) -> bool {
        !self.faults.is_empty()
    }
}

/// One item's results plus the faults raised while producing them
struct ScoredItem {
    scores: ItemScores,
    faults: Vec<MetricFault>,
}

/// The main score engine
pub struct ScoreEngine {
    config: ScoreEngineConfig,
    metrics: Vec<Arc<dyn Metric>>,
    /// Dedicated pool when `max_threads` is set; the global pool otherwise
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for ScoreEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreEngine")
            .field("config", &self.config)
            .field("metrics", &self.metric_names())
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new(ScoreEngineConfig::default())
    }
}

impl ScoreEngine {
    /// Create an engine with no metrics registered
    pub fn new(config: ScoreEngineConfig) -> Self {
        let pool = config.max_threads.and_then(|threads| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| warn!(error = %e, threads, "Failed to build thread pool"))
                .ok()
        });

        Self {
            config,
            metrics: Vec::new(),
            pool,
        }
    }

    /// Create an engine with the built-in metrics named in the configuration
    pub fn from_config(config: &ScoringConfig) -> ScoringResult<Self> {
        let mut engine = Self::new(ScoreEngineConfig::from(config));
        for name in &config.metrics {
            engine.register_arc(builtin_metric(name, config)?)?;
        }
        Ok(engine)
    }

    /// Register a metric; names must be unique and non-blank
    pub fn register<M: Metric + 'static>(&mut self, metric: M) -> ScoringResult<()> {
        self.register_arc(Arc::new(metric))
    }

    /// Register a shared metric
    pub fn register_arc(&mut self, metric: Arc<dyn Metric>) -> ScoringResult<()> {
        let name = metric.name();
        if name.trim().is_empty() {
            return Err(ScoringError::EmptyMetricName);
        }
        if self.metrics.iter().any(|m| m.name() == name) {
            return Err(ScoringError::DuplicateMetric(name.to_string()));
        }

        debug!(metric = %name, "Registered metric");
        self.metrics.push(metric);
        Ok(())
    }

    /// Get a metric by name
    pub fn get_metric(&self, name: &str) -> Option<Arc<dyn Metric>> {
        self.metrics.iter().find(|m| m.name() == name).cloned()
    }

    /// Names of the registered metrics, in registration order
    pub fn metric_names(&self) -> Vec<&str> {
        self.metrics.iter().map(|m| m.name()).collect()
    }

    pub fn metrics(&self) -> &[Arc<dyn Metric>] {
        &self.metrics
    }

    pub fn config(&self) -> &ScoreEngineConfig {
        &self.config
    }

    /// Apply every metric to one item, in registration order
    pub fn score(&self, item: &EvaluationItem) -> Vec<MetricResult> {
        self.score_item(0, item).scores.results
    }

    /// Score a batch and return only the aggregate report
    pub fn score_batch(&self, items: &[EvaluationItem]) -> AggregateReport {
        self.score_batch_detailed(items).report
    }

    /// Score a batch sequentially, keeping per-item results and faults
    #[instrument(skip(self, items), fields(items = items.len(), metrics = self.metrics.len()))]
    pub fn score_batch_detailed(&self, items: &[EvaluationItem]) -> BatchOutcome {
        let scored: Vec<ScoredItem> = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.score_item(index, item))
            .collect();

        self.fold(items, scored)
    }

    /// Score a batch on a rayon pool.
    ///
    /// Produces the same outcome as [`ScoreEngine::score_batch_detailed`]:
    /// results are folded in item order after scoring. Uses the engine's own
    /// pool when `max_threads` is set and rayon's global pool otherwise.
    #[instrument(skip(self, items), fields(items = items.len(), metrics = self.metrics.len()))]
    pub fn score_batch_parallel(&self, items: &[EvaluationItem]) -> BatchOutcome {
        let score_all = || -> Vec<ScoredItem> {
            items
                .par_iter()
                .enumerate()
                .map(|(index, item)| self.score_item(index, item))
                .collect()
        };

        let scored = match (&self.pool, self.config.max_threads) {
            (Some(pool), _) => pool.install(score_all),
            (None, None) => score_all(),
            (None, Some(_)) => {
                warn!("No thread pool available, scoring sequentially");
                return self.score_batch_detailed(items);
            }
        };

        self.fold(items, scored)
    }

    /// Score a batch, in parallel when the configuration asks for it
    pub fn run_batch(&self, items: &[EvaluationItem]) -> BatchOutcome {
        if self.config.parallel {
            self.score_batch_parallel(items)
        } else {
            self.score_batch_detailed(items)
        }
    }

    /// Re-aggregate a batch together with reviewer feedback.
    ///
    /// Feedback metrics appear after the registered metrics. Feedback must be
    /// valid and must not reuse the name of a registered metric; otherwise
    /// nothing is aggregated.
    pub fn report_with_feedback(
        &self,
        outcome: &BatchOutcome,
        feedback: &[FeedbackScore],
    ) -> Result<AggregateReport, FeedbackError> {
        for score in feedback {
            if self.get_metric(&score.metric_name).is_some() {
                return Err(FeedbackError::MetricNameCollision(score.metric_name.clone()));
            }
        }

        let mut accumulator = self.accumulator();
        for item in &outcome.items {
            accumulator.observe(&item.results);
        }
        for score in feedback {
            accumulator.observe_feedback(score)?;
        }
        Ok(accumulator.finish())
    }

    fn accumulator(&self) -> ReportAccumulator {
        ReportAccumulator::with_metrics(self.metrics.iter().map(|m| m.name().to_string()))
    }

    fn score_item(&self, item_index: usize, item: &EvaluationItem) -> ScoredItem {
        let mut results = Vec::with_capacity(self.metrics.len());
        let mut faults = Vec::new();

        for metric in &self.metrics {
            let name = metric.name();
            match apply(metric.as_ref(), item) {
                Ok(result) => results.push(result),
                Err(reason) => {
                    warn!(item_index, metric = %name, reason = %reason, "Metric fault");
                    results.push(MetricResult::not_applicable(name, reason.clone()));
                    faults.push(MetricFault {
                        item_index,
                        metric_name: name.to_string(),
                        reason,
                    });
                }
            }
        }

        let scored = results.iter().filter(|r| r.is_scored()).count();
        debug!(item_index, scored, "Scored item");

        ScoredItem {
            scores: ItemScores {
                item_index,
                results,
            },
            faults,
        }
    }

    fn fold(&self, items: &[EvaluationItem], scored: Vec<ScoredItem>) -> BatchOutcome {
        let mut overall = self.accumulator();
        let mut categories: IndexMap<String, ReportAccumulator> = IndexMap::new();
        let mut outcome = BatchOutcome::default();

        for (item, ScoredItem { scores, faults }) in items.iter().zip(scored) {
            overall.observe(&scores.results);

            if let Some(category) = item.category.as_deref().filter(|c| !c.is_empty()) {
                categories
                    .entry(category.to_string())
                    .or_insert_with(|| self.accumulator())
                    .observe(&scores.results);
            }

            outcome.items.push(scores);
            outcome.faults.extend(faults);
        }

        outcome.report = overall.finish();
        outcome.by_category = categories
            .into_iter()
            .map(|(category, acc)| (category, acc.finish()))
            .collect();

        info!(
            items = outcome.items.len(),
            metrics = outcome.report.len(),
            faults = outcome.faults.len(),
            "Batch scored"
        );

        outcome
    }
}

/// Run one metric on one item, turning every failure mode into a reason
fn apply(metric: &dyn Metric, item: &EvaluationItem) -> Result<MetricResult, String> {
    let name = metric.name();
    let score = match catch_unwind(AssertUnwindSafe(|| metric.score(item))) {
        Ok(Ok(score)) => score,
        Ok(Err(e)) => return Err(e.to_string()),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            return Err(format!("metric panicked: {}", message));
        }
    };

    match score {
        Score::Value { value, reason } => {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(format!("score {} outside [0, 1]", value));
            }
            let result = MetricResult::scored(name, value);
            Ok(match reason {
                Some(reason) => result.with_reason(reason),
                None => result,
            })
        }
        Score::NotApplicable { reason } => Ok(MetricResult::not_applicable(name, reason)),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

/// Builder for ScoreEngine
pub struct ScoreEngineBuilder {
    config: ScoreEngineConfig,
    metrics: Vec<Arc<dyn Metric>>,
}

impl ScoreEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: ScoreEngineConfig::default(),
            metrics: Vec::new(),
        }
    }

    pub fn config(mut self, config: ScoreEngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    pub fn max_threads(mut self, threads: usize) -> Self {
        self.config.max_threads = Some(threads);
        self
    }

    pub fn metric<M: Metric + 'static>(mut self, metric: M) -> Self {
        self.metrics.push(Arc::new(metric));
        self
    }

    pub fn metric_arc(mut self, metric: Arc<dyn Metric>) -> Self {
        self.metrics.push(metric);
        self
    }

    /// Build the engine, failing on the first invalid or duplicate metric
    pub fn build(self) -> ScoringResult<ScoreEngine> {
        let mut engine = ScoreEngine::new(self.config);
        for metric in self.metrics {
            engine.register_arc(metric)?;
        }
        Ok(engine)
    }
}

impl Default for ScoreEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
