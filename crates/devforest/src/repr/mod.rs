//! Trained model representations.
//!
//! - [`TreeNode`] / [`SplitRule`]: owned binary tree nodes
//! - [`DecisionTree`]: a single trained tree
//! - [`RandomForest`]: ordered trees with majority-vote prediction

mod forest;
mod node;
mod tree;

pub use forest::{ForestValidationError, Prediction, RandomForest};
pub use node::{SplitRule, TreeNode};
pub use tree::{DecisionTree, TreeValidationError};
