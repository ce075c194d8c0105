//! Random forest trainer.
//!
//! Draws a bootstrap resample and feature subset per tree from the tree's own
//! seeded stream, then grows the trees independently. Trees are collected in
//! index order, so the forest is identical for sequential and parallel runs.
//! Use [`ForestTrainer::train`] with an explicit [`Parallelism`] hint, or
//! [`ForestTrainer::train_with_threads`] to have a thread pool set up.

use std::time::Instant;

use super::grower::TreeGrower;
use super::logger::{TrainingLogger, Verbosity};
use super::params::{FeatureSubsample, ParamValidationError, TreeParams};
use super::sampling::{bootstrap_indices, feature_subset, tree_rng};
use crate::data::LabeledDataset;
use crate::error::{Error, Result};
use crate::repr::{DecisionTree, RandomForest};
use crate::utils::{run_with_threads, Parallelism};

// =============================================================================
// ForestParams
// =============================================================================

/// Parameters for forest training.
#[derive(Clone, Debug, PartialEq)]
pub struct ForestParams {
    /// Number of trees. Must be `>= 1`.
    pub n_trees: usize,
    /// Resample size as a fraction of the dataset, in (0, 1].
    pub bootstrap_fraction: f64,
    /// Per-tree stopping criteria.
    pub tree: TreeParams,
    /// Per-tree feature bagging.
    pub feature_subsample: FeatureSubsample,
    /// Seed of the bootstrap and feature sampler.
    pub seed: u64,
    /// Verbosity level for training output.
    pub verbosity: Verbosity,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 50,
            bootstrap_fraction: 1.0,
            tree: TreeParams::default(),
            feature_subsample: FeatureSubsample::All,
            seed: 42,
            verbosity: Verbosity::default(),
        }
    }
}

impl ForestParams {
    pub fn validate(&self) -> Result<(), ParamValidationError> {
        if self.n_trees < 1 {
            return Err(ParamValidationError::InvalidNTrees(self.n_trees));
        }
        if !(self.bootstrap_fraction > 0.0 && self.bootstrap_fraction <= 1.0) {
            return Err(ParamValidationError::InvalidBootstrapFraction(self.bootstrap_fraction));
        }
        self.tree.validate()
    }
}

// =============================================================================
// ForestTrainer
// =============================================================================

/// Random forest trainer.
#[derive(Clone, Debug)]
pub struct ForestTrainer {
    params: ForestParams,
}

impl ForestTrainer {
    pub fn new(params: ForestParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    /// Train inside a thread pool of `n_threads` workers (0 = all cores, 1 = sequential).
    pub fn train_with_threads(&self, dataset: &LabeledDataset, n_threads: usize) -> Result<RandomForest> {
        run_with_threads(n_threads, |parallelism| self.train(dataset, parallelism))
    }

    /// Train a forest.
    ///
    /// **Note:** This method does NOT create a thread pool. With
    /// [`Parallelism::Parallel`] trees are grown on the current rayon pool.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyDataset`] if the dataset has no samples
    /// - [`Error::InvalidHyperparameter`] if any parameter is out of range,
    ///   including a feature subsample that does not fit the dataset
    pub fn train(&self, dataset: &LabeledDataset, parallelism: Parallelism) -> Result<RandomForest> {
        self.params.validate()?;
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let n_features = dataset.n_features();
        let features_per_tree = self.params.feature_subsample.resolve(n_features)?;

        let logger = TrainingLogger::new(self.params.verbosity);
        let n_threads = if parallelism.is_parallel() { rayon::current_num_threads() } else { 1 };
        logger.start_training(self.params.n_trees, dataset.n_samples(), n_features, n_threads);
        let started = Instant::now();

        let trees = parallelism.maybe_par_map(0..self.params.n_trees, |tree_index| {
            self.train_tree(dataset, tree_index, features_per_tree, &logger)
        });

        logger.finish_training(trees.len(), started.elapsed());
        Ok(RandomForest::from_trees(trees, n_features, dataset.n_classes(), self.params.bootstrap_fraction))
    }

    fn train_tree(
        &self,
        dataset: &LabeledDataset,
        tree_index: usize,
        features_per_tree: usize,
        logger: &TrainingLogger,
    ) -> DecisionTree {
        let mut rng = tree_rng(self.params.seed, tree_index);
        let indices = bootstrap_indices(dataset.n_samples(), self.params.bootstrap_fraction, &mut rng);
        let features = feature_subset(dataset.n_features(), features_per_tree, &mut rng);
        let n_draws = indices.len();

        let root = TreeGrower::new(dataset, self.params.tree, &features).grow(indices);
        let tree = DecisionTree::from_parts(root, self.params.tree, dataset.n_features(), dataset.n_classes());
        logger.tree_built(tree_index, n_draws, features.len(), tree.depth(), tree.n_leaves());
        tree
    }
}
