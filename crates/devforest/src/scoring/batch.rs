//! Batch scorer.
//!
//! Each record is scored by every registered [`TaskModel`]. Failures are
//! isolated per record and reported next to the successful outputs, so one
//! malformed profile never aborts a batch. Records may be processed in
//! parallel; the report always lists them in input order.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use bon::Builder;
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::data::{ProfileRecord, Task};
use crate::error::{Error, Result};
use crate::model::TaskModel;
use crate::utils::run_with_threads;

// =============================================================================
// Configuration
// =============================================================================

/// Batch scoring options.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(derive(Clone, Debug))]
pub struct ScorerConfig {
    /// Worker threads. 0 = all cores, 1 = sequential. Default: 0.
    #[builder(default = 0)]
    pub n_threads: usize,

    /// Attach the winning vote fraction to every output. Default: true.
    #[builder(default = true)]
    pub with_confidence: bool,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// =============================================================================
// Report types
// =============================================================================

/// One task's prediction for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    /// Position of the record in the input batch.
    pub record_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    pub task: Task,
    /// Display name of the predicted class.
    pub label: &'static str,
    pub class: u32,
    /// Vote fraction of the winning class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Normalized quality score, quality task only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
}

/// A task that failed for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordError {
    pub record_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    pub task: Task,
    #[serde(serialize_with = "serialize_display")]
    pub error: Error,
}

fn serialize_display<S: Serializer>(error: &Error, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Outcome of a batch.
///
/// `scored + skipped + errored == processed`. Unless `interrupted`,
/// `processed` equals the batch size.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub scored: usize,
    pub skipped: usize,
    pub errored: usize,
    /// Cancellation stopped the batch early; only the first `processed`
    /// records are covered.
    pub interrupted: bool,
    pub outputs: Vec<ScoreRecord>,
    pub errors: Vec<RecordError>,
}

enum Outcome {
    Scored(Vec<ScoreRecord>),
    Skipped,
    Errored(Vec<RecordError>),
}

// =============================================================================
// BatchScorer
// =============================================================================

type RecordFilter = Box<dyn Fn(&ProfileRecord) -> bool + Send + Sync>;

/// Scores record batches against one model per task.
///
/// ```
/// use devforest::scoring::{BatchScorer, ScorerConfig};
/// use devforest::testing::synthetic_profiles;
/// use devforest::{ForestConfig, Task, TaskModel};
///
/// let records = synthetic_profiles(30, 7);
/// let config = ForestConfig::builder().n_trees(5).build().unwrap();
/// let model = TaskModel::train(Task::Quality, &records, &config).unwrap();
///
/// let scorer = BatchScorer::new(ScorerConfig::default()).with_model(model);
/// let report = scorer.score(&records).unwrap();
/// assert_eq!(report.scored, 30);
/// assert_eq!(report.outputs.len(), 30);
/// ```
pub struct BatchScorer {
    models: BTreeMap<Task, TaskModel>,
    filter: Option<RecordFilter>,
    config: ScorerConfig,
}

impl std::fmt::Debug for BatchScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchScorer")
            .field("tasks", &self.models.keys().collect::<Vec<_>>())
            .field("filtered", &self.filter.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl BatchScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { models: BTreeMap::new(), filter: None, config }
    }

    /// Register a model, replacing any previous model for the same task.
    pub fn with_model(mut self, model: TaskModel) -> Self {
        self.insert_model(model);
        self
    }

    pub fn insert_model(&mut self, model: TaskModel) {
        self.models.insert(model.task(), model);
    }

    /// Only score records accepted by `filter`; the rest count as skipped.
    pub fn with_filter(mut self, filter: impl Fn(&ProfileRecord) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Tasks with a registered model, in task order.
    pub fn tasks(&self) -> impl Iterator<Item = Task> + '_ {
        self.models.keys().copied()
    }

    pub fn model(&self, task: Task) -> Option<&TaskModel> {
        self.models.get(&task)
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Score every record.
    ///
    /// # Errors
    ///
    /// [`Error::UntrainedModel`] if no model is registered. Per-record
    /// failures are reported in [`BatchReport::errors`] instead.
    pub fn score(&self, records: &[ProfileRecord]) -> Result<BatchReport> {
        self.score_with_cancel(records, &AtomicBool::new(false))
    }

    /// Score records until `cancel` is set.
    ///
    /// Once the flag is observed no further records are started. The report
    /// covers the longest prefix of the batch whose records all completed.
    pub fn score_with_cancel(&self, records: &[ProfileRecord], cancel: &AtomicBool) -> Result<BatchReport> {
        if self.models.is_empty() {
            return Err(Error::UntrainedModel);
        }

        let outcomes = run_with_threads(self.config.n_threads, |parallelism| {
            parallelism.maybe_par_map(0..records.len(), |idx| {
                if cancel.load(Ordering::Relaxed) {
                    return None;
                }
                Some(self.score_record(idx, &records[idx]))
            })
        });

        let mut report = BatchReport::default();
        for outcome in outcomes {
            let Some(outcome) = outcome else {
                report.interrupted = true;
                break;
            };
            report.processed += 1;
            match outcome {
                Outcome::Scored(outputs) => {
                    report.scored += 1;
                    report.outputs.extend(outputs);
                }
                Outcome::Skipped => report.skipped += 1,
                Outcome::Errored(errors) => {
                    report.errored += 1;
                    report.errors.extend(errors);
                }
            }
        }

        if report.interrupted {
            warn!(processed = report.processed, total = records.len(), "batch interrupted");
        }
        info!(
            scored = report.scored,
            skipped = report.skipped,
            errored = report.errored,
            "batch scored"
        );
        Ok(report)
    }

    fn score_record(&self, record_index: usize, record: &ProfileRecord) -> Outcome {
        if self.filter.as_ref().is_some_and(|accept| !accept(record)) {
            debug!(record_index, "record skipped");
            return Outcome::Skipped;
        }

        let profile_id = record.identifier();
        let mut outputs = Vec::with_capacity(self.models.len());
        let mut errors = Vec::new();
        for (&task, model) in &self.models {
            match model.predict_record(record) {
                Ok(prediction) => outputs.push(ScoreRecord {
                    record_index,
                    profile_id: profile_id.clone(),
                    task,
                    label: model.label_name(prediction.class).unwrap_or("unknown"),
                    class: prediction.class,
                    confidence: self.config.with_confidence.then(|| prediction.confidence()),
                    quality_score: model.quality_score(prediction.class),
                }),
                Err(error) => {
                    warn!(record_index, profile_id = ?profile_id, %task, %error, "record failed");
                    errors.push(RecordError { record_index, profile_id: profile_id.clone(), task, error });
                }
            }
        }

        if errors.is_empty() {
            debug!(record_index, "record scored");
            Outcome::Scored(outputs)
        } else {
            Outcome::Errored(errors)
        }
    }
}
