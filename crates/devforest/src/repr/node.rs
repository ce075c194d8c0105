//! Tree node types.

/// Numeric split: samples with `x[feature] <= threshold` go left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRule {
    pub feature: usize,
    pub threshold: f64,
}

impl SplitRule {
    pub fn new(feature: usize, threshold: f64) -> Self {
        Self { feature, threshold }
    }

    #[inline]
    pub fn goes_left(&self, features: &[f64]) -> bool {
        features[self.feature] <= self.threshold
    }
}

/// A decision tree node.
///
/// Internal nodes own both children; nodes are never shared between parents.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// Terminal node predicting a class index.
    Leaf { class: u32 },
    /// Split node; `left` receives `<= threshold`.
    Internal { rule: SplitRule, left: Box<TreeNode>, right: Box<TreeNode> },
}

impl TreeNode {
    #[inline]
    pub fn leaf(class: u32) -> Self {
        TreeNode::Leaf { class }
    }

    pub fn internal(rule: SplitRule, left: TreeNode, right: TreeNode) -> Self {
        TreeNode::Internal { rule, left: Box::new(left), right: Box::new(right) }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Follow split rules from this node down to a leaf class.
    #[inline]
    pub fn traverse(&self, features: &[f64]) -> u32 {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { class } => return *class,
                TreeNode::Internal { rule, left, right } => {
                    node = if rule.goes_left(features) { &**left } else { &**right };
                }
            }
        }
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }

    pub fn n_nodes(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { left, right, .. } => 1 + left.n_nodes() + right.n_nodes(),
        }
    }

    /// Visit every node in pre-order.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a TreeNode)) {
        f(self);
        if let TreeNode::Internal { left, right, .. } = self {
            left.visit(f);
            right.visit(f);
        }
    }
}
