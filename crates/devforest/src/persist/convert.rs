//! Conversion between runtime types and schema types.
//!
//! Runtime → schema is infallible (`From`). Schema → runtime validates the
//! version, the declared tree count, tree parameters and every node index
//! (`TryFrom` with [`ReadError`]).

use super::error::ReadError;
use super::schema::{ForestSchema, NodeSchema, TreeSchema, SCHEMA_VERSION};
use crate::repr::{DecisionTree, RandomForest, SplitRule, TreeNode};
use crate::training::TreeParams;

// =============================================================================
// Node conversions
// =============================================================================

impl From<&TreeNode> for NodeSchema {
    fn from(node: &TreeNode) -> Self {
        match node {
            TreeNode::Leaf { class } => NodeSchema::Leaf { class: *class },
            TreeNode::Internal { rule, left, right } => NodeSchema::Split {
                feature: rule.feature,
                threshold: rule.threshold,
                left: Box::new(NodeSchema::from(&**left)),
                right: Box::new(NodeSchema::from(&**right)),
            },
        }
    }
}

impl From<NodeSchema> for TreeNode {
    fn from(node: NodeSchema) -> Self {
        match node {
            NodeSchema::Leaf { class } => TreeNode::leaf(class),
            NodeSchema::Split { feature, threshold, left, right } => TreeNode::internal(
                SplitRule::new(feature, threshold),
                TreeNode::from(*left),
                TreeNode::from(*right),
            ),
        }
    }
}

// =============================================================================
// Tree conversions
// =============================================================================

impl From<&DecisionTree> for TreeSchema {
    fn from(tree: &DecisionTree) -> Self {
        let params = tree.params();
        TreeSchema {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            n_features: tree.n_features(),
            root: NodeSchema::from(tree.root()),
        }
    }
}

/// Trees carry no class count of their own; it comes from the forest.
fn tree_from_schema(schema: TreeSchema, n_classes: usize) -> Result<DecisionTree, ReadError> {
    let params = TreeParams::new(schema.max_depth, schema.min_samples_split);
    params.validate().map_err(|e| ReadError::Validation(e.to_string()))?;
    let tree = DecisionTree::from_parts(TreeNode::from(schema.root), params, schema.n_features, n_classes);
    tree.validate().map_err(|e| ReadError::Validation(e.to_string()))?;
    Ok(tree)
}

// =============================================================================
// Forest conversions
// =============================================================================

impl From<&RandomForest> for ForestSchema {
    fn from(forest: &RandomForest) -> Self {
        ForestSchema {
            version: SCHEMA_VERSION,
            n_features: forest.n_features(),
            n_classes: forest.n_classes(),
            n_trees: forest.n_trees(),
            bootstrap_fraction: forest.bootstrap_fraction(),
            trees: forest.trees().iter().map(TreeSchema::from).collect(),
        }
    }
}

impl TryFrom<ForestSchema> for RandomForest {
    type Error = ReadError;

    fn try_from(schema: ForestSchema) -> Result<Self, Self::Error> {
        if schema.version != SCHEMA_VERSION {
            return Err(ReadError::UnsupportedVersion { found: schema.version, supported: SCHEMA_VERSION });
        }
        if schema.n_trees != schema.trees.len() {
            return Err(ReadError::Validation(format!(
                "declared {} trees, found {}",
                schema.n_trees,
                schema.trees.len()
            )));
        }

        let n_classes = schema.n_classes;
        let trees = schema
            .trees
            .into_iter()
            .enumerate()
            .map(|(idx, tree)| {
                tree_from_schema(tree, n_classes)
                    .map_err(|e| ReadError::Validation(format!("tree {idx}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let forest = RandomForest::from_trees(trees, schema.n_features, n_classes, schema.bootstrap_fraction);
        forest.validate().map_err(|e| ReadError::Validation(e.to_string()))?;
        Ok(forest)
    }
}
