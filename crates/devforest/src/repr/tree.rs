//! Trained decision tree.

use super::node::TreeNode;
use crate::data::LabeledDataset;
use crate::error::{Error, Result};
use crate::training::{TreeGrower, TreeParams};

/// Structural validation errors for [`DecisionTree`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeValidationError {
    #[error("split on feature {feature} but the tree has {n_features} features")]
    FeatureOutOfRange { feature: usize, n_features: usize },
    #[error("leaf class {class} but the tree has {n_classes} classes")]
    ClassOutOfRange { class: u32, n_classes: usize },
    #[error("split on feature {feature} has non-finite threshold")]
    NonFiniteThreshold { feature: usize },
}

/// A binary classification tree.
///
/// Built once by [`DecisionTree::train`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    root: TreeNode,
    params: TreeParams,
    n_features: usize,
    n_classes: usize,
}

impl DecisionTree {
    /// Train a tree on every sample and feature of `dataset`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidHyperparameter`] if `params` fail validation
    /// - [`Error::EmptyDataset`] if the dataset has no samples
    pub fn train(dataset: &LabeledDataset, params: TreeParams) -> Result<Self> {
        params.validate()?;
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let features: Vec<usize> = (0..dataset.n_features()).collect();
        let indices: Vec<u32> = (0..dataset.n_samples() as u32).collect();
        let root = TreeGrower::new(dataset, params, &features).grow(indices);
        Ok(Self::from_parts(root, params, dataset.n_features(), dataset.n_classes()))
    }

    pub(crate) fn from_parts(root: TreeNode, params: TreeParams, n_features: usize, n_classes: usize) -> Self {
        Self { root, params, n_features, n_classes }
    }

    /// Predict the class index of one feature vector.
    ///
    /// # Errors
    ///
    /// [`Error::Shape`] if `features.len()` differs from the training feature count.
    #[inline]
    pub fn predict(&self, features: &[f64]) -> Result<u32> {
        if features.len() != self.n_features {
            return Err(Error::Shape { expected: self.n_features, actual: features.len() });
        }
        Ok(self.root.traverse(features))
    }

    #[inline]
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    #[inline]
    pub fn params(&self) -> TreeParams {
        self.params
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    pub fn n_nodes(&self) -> usize {
        self.root.n_nodes()
    }

    /// Check that every split and leaf is consistent with the tree's dimensions.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        let mut error = None;
        self.root.visit(&mut |node| {
            if error.is_some() {
                return;
            }
            match node {
                TreeNode::Leaf { class } if *class as usize >= self.n_classes => {
                    error = Some(TreeValidationError::ClassOutOfRange {
                        class: *class,
                        n_classes: self.n_classes,
                    });
                }
                TreeNode::Internal { rule, .. } if rule.feature >= self.n_features => {
                    error = Some(TreeValidationError::FeatureOutOfRange {
                        feature: rule.feature,
                        n_features: self.n_features,
                    });
                }
                TreeNode::Internal { rule, .. } if !rule.threshold.is_finite() => {
                    error = Some(TreeValidationError::NonFiniteThreshold { feature: rule.feature });
                }
                _ => {}
            }
        });
        error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::SplitRule;

    fn dataset() -> LabeledDataset {
        LabeledDataset::from_rows(
            &[vec![1.0, 0.0], vec![2.0, 0.0], vec![7.0, 1.0], vec![8.0, 1.0]],
            vec![0, 0, 2, 2],
            3,
        )
        .unwrap()
    }

    #[test]
    fn train_and_predict() {
        let tree = DecisionTree::train(&dataset(), TreeParams::default()).unwrap();
        assert_eq!(tree.n_features(), 2);
        assert_eq!(tree.predict(&[1.5, 0.0]).unwrap(), 0);
        assert_eq!(tree.predict(&[9.0, 0.0]).unwrap(), 2);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let tree = DecisionTree::train(&dataset(), TreeParams::default()).unwrap();
        assert_eq!(tree.predict(&[1.0]), Err(Error::Shape { expected: 2, actual: 1 }));
        assert_eq!(tree.predict(&[1.0, 2.0, 3.0]), Err(Error::Shape { expected: 2, actual: 3 }));
    }

    #[test]
    fn invalid_params_and_empty_data_fail() {
        let err = DecisionTree::train(&dataset(), TreeParams::new(0, 2)).unwrap_err();
        assert!(matches!(err, Error::InvalidHyperparameter { name: "max_depth", .. }));

        let empty = LabeledDataset::from_samples(&[], 2).unwrap();
        assert_eq!(DecisionTree::train(&empty, TreeParams::default()), Err(Error::EmptyDataset));
    }

    #[test]
    fn validate_catches_out_of_range_nodes() {
        let root = TreeNode::internal(SplitRule::new(3, 0.5), TreeNode::leaf(0), TreeNode::leaf(1));
        let tree = DecisionTree::from_parts(root, TreeParams::default(), 2, 2);
        assert_eq!(
            tree.validate(),
            Err(TreeValidationError::FeatureOutOfRange { feature: 3, n_features: 2 })
        );

        let tree = DecisionTree::from_parts(TreeNode::leaf(5), TreeParams::default(), 2, 2);
        assert!(matches!(tree.validate(), Err(TreeValidationError::ClassOutOfRange { class: 5, .. })));
    }
}
