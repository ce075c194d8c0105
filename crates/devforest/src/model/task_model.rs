//! A forest bound to one classification task.

use tracing::warn;

use crate::data::{build_features, heuristic_label, LabeledDataset, LabeledSample, ProfileRecord, QualityLabel, Task};
use crate::error::{Error, Result, SchemaError};
use crate::repr::{Prediction, RandomForest};
use crate::training::{accuracy, TrainingLogger, Verbosity};
use crate::utils::run_with_threads;

use super::config::ForestConfig;

/// Fewest usable records [`TaskModel::train`] accepts.
pub const MIN_TRAINING_RECORDS: usize = 20;

/// A record left out of a training set, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// Position of the record in the training input.
    pub record_index: usize,
    pub profile_id: Option<String>,
    pub error: SchemaError,
}

/// Labeled samples for `task` plus every record that could not be used.
///
/// Each rejection is also logged as a `tracing` warning.
pub fn training_samples(task: Task, records: &[ProfileRecord]) -> (Vec<LabeledSample>, Vec<RejectedRecord>) {
    let mut samples = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    for (record_index, record) in records.iter().enumerate() {
        let sample = build_features(record, task)
            .and_then(|features| Ok(LabeledSample::new(features, heuristic_label(task, record)?)));
        match sample {
            Ok(sample) => samples.push(sample),
            Err(error) => {
                let profile_id = record.identifier();
                warn!(record_index, profile_id = ?profile_id, %task, %error, "training record rejected");
                rejected.push(RejectedRecord { record_index, profile_id, error });
            }
        }
    }
    (samples, rejected)
}

/// A random forest trained for a [`Task`].
///
/// Records go in, predictions come out: features are extracted with the
/// task's schema before the forest votes.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskModel {
    task: Task,
    forest: RandomForest,
}

impl TaskModel {
    /// Train on raw profile records labeled by the task's heuristic rules.
    ///
    /// Records whose features or label cannot be derived are left out of the
    /// training set; see [`training_samples`].
    ///
    /// # Errors
    ///
    /// - [`Error::InsufficientData`] with fewer than [`MIN_TRAINING_RECORDS`] usable records
    /// - any configuration error from [`RandomForest::train`]
    pub fn train(task: Task, records: &[ProfileRecord], config: &ForestConfig) -> Result<Self> {
        Self::train_with_minimum(task, records, config, MIN_TRAINING_RECORDS)
    }

    /// Like [`TaskModel::train`] with a custom minimum record count.
    pub fn train_with_minimum(
        task: Task,
        records: &[ProfileRecord],
        config: &ForestConfig,
        min_records: usize,
    ) -> Result<Self> {
        let logger = TrainingLogger::new(config.verbosity);

        let (samples, rejected) = training_samples(task, records);
        if !rejected.is_empty() {
            logger.warning(&format!("{} of {} records unusable for {task} training", rejected.len(), records.len()));
        }
        if samples.len() < min_records.max(1) {
            return Err(Error::InsufficientData { required: min_records.max(1), actual: samples.len() });
        }

        let dataset = LabeledDataset::from_samples(&samples, task.n_classes())?;
        logger.class_distribution(task.class_names(), &dataset.class_counts());

        let forest = RandomForest::train(&dataset, config)?;
        if logger.enabled(Verbosity::Info) {
            let acc = run_with_threads(config.n_threads, |parallelism| accuracy(&forest, &dataset, parallelism))?;
            logger.training_accuracy(acc);
        }
        Ok(Self { task, forest })
    }

    /// Wrap an existing forest, e.g. one loaded from storage.
    ///
    /// # Errors
    ///
    /// [`Error::Shape`] if a trained forest's feature count differs from the
    /// task schema, [`Error::InvalidLabel`] if its class count differs.
    pub fn from_forest(task: Task, forest: RandomForest) -> Result<Self> {
        if forest.is_trained() {
            if forest.n_features() != task.n_features() {
                return Err(Error::Shape { expected: task.n_features(), actual: forest.n_features() });
            }
            if forest.n_classes() != task.n_classes() {
                return Err(Error::InvalidLabel {
                    label: forest.n_classes().saturating_sub(1) as u32,
                    n_classes: task.n_classes(),
                });
            }
        }
        Ok(Self { task, forest })
    }

    #[inline]
    pub fn task(&self) -> Task {
        self.task
    }

    #[inline]
    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    pub fn into_forest(self) -> RandomForest {
        self.forest
    }

    /// Extract the task's features from `record` and vote.
    ///
    /// # Errors
    ///
    /// [`Error::Schema`] for malformed records, [`Error::UntrainedModel`] for
    /// a forest without trees.
    pub fn predict_record(&self, record: &ProfileRecord) -> Result<Prediction> {
        let features = build_features(record, self.task)?;
        self.forest.predict_with_votes(&features)
    }

    /// Display name of a class, e.g. `"Excellent"`.
    pub fn label_name(&self, class: u32) -> Option<&'static str> {
        self.task.class_name(class)
    }

    /// Normalized quality score of a class. `None` for other tasks.
    pub fn quality_score(&self, class: u32) -> Option<f64> {
        match self.task {
            Task::Quality => QualityLabel::from_index(class).map(QualityLabel::score),
            Task::Complexity => None,
        }
    }
}
