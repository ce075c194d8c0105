//! Trained random forest and majority-vote inference.

use ndarray::ArrayView2;

use super::tree::{DecisionTree, TreeValidationError};
use crate::data::LabeledDataset;
use crate::error::{Error, Result};
use crate::model::ForestConfig;
use crate::training::ForestTrainer;
use crate::utils::Parallelism;

/// Structural validation errors for [`RandomForest`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForestValidationError {
    #[error("tree {tree_idx} has {actual} features, forest has {expected}")]
    FeatureCountMismatch { tree_idx: usize, expected: usize, actual: usize },
    #[error("tree {tree_idx} has {actual} classes, forest has {expected}")]
    ClassCountMismatch { tree_idx: usize, expected: usize, actual: usize },
    #[error("bootstrap fraction {0} outside (0, 1]")]
    InvalidBootstrapFraction(f64),
    #[error("tree {tree_idx}: {error}")]
    InvalidTree { tree_idx: usize, error: TreeValidationError },
}

/// Majority-vote outcome for one feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Winning class index.
    pub class: u32,
    /// Fraction of trees voting for each class; sums to 1.0.
    pub votes: Vec<f64>,
}

impl Prediction {
    /// Vote fraction of the winning class.
    #[inline]
    pub fn confidence(&self) -> f64 {
        self.votes[self.class as usize]
    }
}

/// Ensemble of decision trees trained on bootstrap resamples.
///
/// Trees are fixed at construction; the forest is `Send + Sync` and can be
/// shared across threads for prediction without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
    n_classes: usize,
    bootstrap_fraction: f64,
}

impl Default for RandomForest {
    /// A forest without trees. Every prediction fails with [`Error::UntrainedModel`].
    fn default() -> Self {
        Self { trees: Vec::new(), n_features: 0, n_classes: 0, bootstrap_fraction: 1.0 }
    }
}

impl RandomForest {
    /// Train a forest with the given configuration.
    ///
    /// Uses `config.n_threads` worker threads (0 = all cores). The result is
    /// identical for every thread count.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyDataset`] if the dataset has no samples
    /// - [`Error::InvalidHyperparameter`] if the configuration is out of range
    pub fn train(dataset: &LabeledDataset, config: &ForestConfig) -> Result<Self> {
        ForestTrainer::new(config.to_trainer_params()).train_with_threads(dataset, config.n_threads)
    }

    pub(crate) fn from_trees(
        trees: Vec<DecisionTree>,
        n_features: usize,
        n_classes: usize,
        bootstrap_fraction: f64,
    ) -> Self {
        Self { trees, n_features, n_classes, bootstrap_fraction }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Bootstrap fraction used at training time.
    #[inline]
    pub fn bootstrap_fraction(&self) -> f64 {
        self.bootstrap_fraction
    }

    #[inline]
    pub fn is_trained(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Trees in training order.
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    #[inline]
    pub fn tree(&self, idx: usize) -> &DecisionTree {
        &self.trees[idx]
    }

    // =========================================================================
    // Prediction
    // =========================================================================

    /// Number of trees voting for each class.
    ///
    /// # Errors
    ///
    /// - [`Error::UntrainedModel`] if the forest has no trees
    /// - [`Error::Shape`] if `features.len()` differs from the training feature count
    pub fn vote_counts(&self, features: &[f64]) -> Result<Vec<usize>> {
        if self.trees.is_empty() {
            return Err(Error::UntrainedModel);
        }
        let mut counts = vec![0usize; self.n_classes];
        for tree in &self.trees {
            counts[tree.predict(features)? as usize] += 1;
        }
        Ok(counts)
    }

    /// Majority class; ties resolve to the lowest class index.
    pub fn predict(&self, features: &[f64]) -> Result<u32> {
        let counts = self.vote_counts(features)?;
        Ok(crate::training::majority_class(&counts))
    }

    /// Majority class together with the vote distribution.
    pub fn predict_with_votes(&self, features: &[f64]) -> Result<Prediction> {
        let counts = self.vote_counts(features)?;
        let n_trees = self.trees.len() as f64;
        Ok(Prediction {
            class: crate::training::majority_class(&counts),
            votes: counts.iter().map(|&c| c as f64 / n_trees).collect(),
        })
    }

    /// Predict every row of a `[n_samples, n_features]` matrix.
    pub fn predict_batch(&self, rows: ArrayView2<'_, f64>, parallelism: Parallelism) -> Result<Vec<u32>> {
        if self.trees.is_empty() {
            return Err(Error::UntrainedModel);
        }
        if rows.ncols() != self.n_features {
            return Err(Error::Shape { expected: self.n_features, actual: rows.ncols() });
        }
        parallelism
            .maybe_par_map(0..rows.nrows(), |i| {
                let row = rows.row(i);
                match row.as_slice() {
                    Some(slice) => self.predict(slice),
                    None => self.predict(&row.to_vec()),
                }
            })
            .into_iter()
            .collect()
    }

    /// Validate structural invariants (tree dimensions, node ranges).
    pub fn validate(&self) -> Result<(), ForestValidationError> {
        if !(self.bootstrap_fraction > 0.0 && self.bootstrap_fraction <= 1.0) {
            return Err(ForestValidationError::InvalidBootstrapFraction(self.bootstrap_fraction));
        }
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            if tree.n_features() != self.n_features {
                return Err(ForestValidationError::FeatureCountMismatch {
                    tree_idx,
                    expected: self.n_features,
                    actual: tree.n_features(),
                });
            }
            if tree.n_classes() != self.n_classes {
                return Err(ForestValidationError::ClassCountMismatch {
                    tree_idx,
                    expected: self.n_classes,
                    actual: tree.n_classes(),
                });
            }
            tree.validate()
                .map_err(|error| ForestValidationError::InvalidTree { tree_idx, error })?;
        }
        Ok(())
    }
}
