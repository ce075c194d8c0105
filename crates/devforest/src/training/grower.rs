//! Recursive depth-first tree induction.

use super::impurity::{gini, is_pure, majority_class};
use super::params::TreeParams;
use super::split::SplitFinder;
use crate::data::LabeledDataset;
use crate::repr::TreeNode;

/// A split must lower impurity by more than this to be kept.
const MIN_IMPURITY_DECREASE: f64 = 1e-12;

/// Grows one tree over a subset of a dataset's samples and features.
pub struct TreeGrower<'a> {
    dataset: &'a LabeledDataset,
    params: TreeParams,
    features: &'a [usize],
    finder: SplitFinder,
}

impl<'a> TreeGrower<'a> {
    /// `features` lists the visible feature indices in ascending order.
    pub fn new(dataset: &'a LabeledDataset, params: TreeParams, features: &'a [usize]) -> Self {
        Self { dataset, params, features, finder: SplitFinder::new(dataset.n_classes()) }
    }

    /// Grow a tree from the given sample indices (duplicates allowed).
    pub fn grow(mut self, indices: Vec<u32>) -> TreeNode {
        self.grow_node(indices, 0)
    }

    fn grow_node(&mut self, indices: Vec<u32>, depth: usize) -> TreeNode {
        let counts = self.class_counts(&indices);
        let leaf = TreeNode::leaf(majority_class(&counts));

        if is_pure(&counts)
            || indices.len() < self.params.min_samples_split
            || depth >= self.params.max_depth
        {
            return leaf;
        }

        let parent_impurity = gini(&counts, indices.len());
        let Some(best) = self.finder.find_best(self.dataset, &indices, self.features, &counts) else {
            return leaf;
        };
        if best.impurity > parent_impurity - MIN_IMPURITY_DECREASE
            || best.n_left == 0
            || best.n_left == indices.len()
        {
            return leaf;
        }

        let rule = best.rule;
        let (left, right): (Vec<u32>, Vec<u32>) = indices
            .into_iter()
            .partition(|&i| self.dataset.value(i as usize, rule.feature) <= rule.threshold);
        debug_assert_eq!(left.len(), best.n_left);

        let left = self.grow_node(left, depth + 1);
        let right = self.grow_node(right, depth + 1);
        TreeNode::internal(rule, left, right)
    }

    fn class_counts(&self, indices: &[u32]) -> Vec<usize> {
        let mut counts = vec![0; self.dataset.n_classes()];
        for &i in indices {
            counts[self.dataset.label(i as usize) as usize] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::SplitRule;

    fn grow(rows: &[Vec<f64>], labels: &[u32], n_classes: usize, params: TreeParams) -> TreeNode {
        let ds = LabeledDataset::from_rows(rows, labels.to_vec(), n_classes).unwrap();
        let features: Vec<usize> = (0..ds.n_features()).collect();
        let indices = (0..ds.n_samples() as u32).collect();
        TreeGrower::new(&ds, params, &features).grow(indices)
    }

    #[test]
    fn single_label_gives_single_leaf() {
        let tree = grow(&[vec![1.0], vec![5.0], vec![9.0]], &[2, 2, 2], 4, TreeParams::default());
        assert_eq!(tree, TreeNode::leaf(2));
    }

    #[test]
    fn separable_data_gives_one_split() {
        let tree = grow(
            &[vec![1.0], vec![2.0], vec![8.0], vec![9.0]],
            &[0, 0, 3, 3],
            4,
            TreeParams::default(),
        );
        assert_eq!(
            tree,
            TreeNode::internal(SplitRule::new(0, 5.0), TreeNode::leaf(0), TreeNode::leaf(3))
        );
    }

    #[test]
    fn depth_limit_stops_recursion() {
        let rows: Vec<Vec<f64>> = (0..8).map(|i| vec![i as f64]).collect();
        let labels = [0, 1, 0, 1, 0, 1, 0, 1];
        let tree = grow(&rows, &labels, 2, TreeParams::new(2, 2));
        assert!(tree.depth() <= 2);
    }

    #[test]
    fn min_samples_split_stops_recursion() {
        let tree = grow(&[vec![1.0], vec![2.0], vec![3.0]], &[0, 1, 1], 2, TreeParams::new(5, 4));
        assert_eq!(tree, TreeNode::leaf(1));
    }

    #[test]
    fn indistinguishable_samples_become_majority_leaf() {
        // Identical features, conflicting labels: no split is realizable.
        let tree = grow(&vec![vec![1.0, 1.0]; 5], &[1, 0, 1, 0, 1], 2, TreeParams::default());
        assert_eq!(tree, TreeNode::leaf(1));
    }

    #[test]
    fn leaf_majority_ties_go_to_lowest_class() {
        let tree = grow(&vec![vec![1.0]; 4], &[3, 1, 3, 1], 4, TreeParams::default());
        assert_eq!(tree, TreeNode::leaf(1));
    }

    #[test]
    fn xor_pattern_without_impurity_gain_stays_leaf() {
        let rows = [vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        let labels = [0, 1, 1, 0];
        // The root split cannot reduce impurity on XOR, so the tree stays a leaf.
        let tree = grow(&rows, &labels, 2, TreeParams::default());
        assert_eq!(tree, TreeNode::leaf(0));
    }
}
