//! Random forest training.
//!
//! - [`TreeGrower`]: recursive Gini-split induction of a single tree
//! - [`ForestTrainer`]: bootstrap + feature bagging over many trees
//! - [`TrainingLogger`]: verbosity-gated progress events
//! - [`accuracy`] / [`confusion_matrix`]: evaluation helpers

mod eval;
mod grower;
mod impurity;
mod logger;
mod params;
mod sampling;
mod split;
mod trainer;

pub use eval::{accuracy, confusion_matrix, predict_dataset};
pub use grower::TreeGrower;
pub use impurity::{gini, is_pure, majority_class, weighted_gini};
pub use logger::{TrainingLogger, Verbosity};
pub use params::{FeatureSubsample, ParamValidationError, TreeParams};
pub use sampling::{bootstrap_indices, bootstrap_size, feature_subset, tree_rng};
pub use split::{SplitCandidate, SplitFinder};
pub use trainer::{ForestParams, ForestTrainer};
