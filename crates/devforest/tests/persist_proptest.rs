//! Property-based tests for the persist module.
//!
//! Generated forests must survive a JSON round-trip unchanged and keep
//! predicting exactly as before.

mod common;

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use common::{arb_dataset, arb_value};
use devforest::persist::{from_json_str, to_json_string, to_json_string_pretty, ForestSchema, NodeSchema, ReadError};
use devforest::{FeatureSubsample, ForestConfig, RandomForest, TreeParams};

// =============================================================================
// Strategies
// =============================================================================

fn arb_forest() -> impl Strategy<Value = RandomForest> {
    (arb_dataset(), 1usize..8, 1usize..6, 0.3f64..=1.0, any::<u64>(), any::<bool>()).prop_map(
        |(dataset, n_trees, max_depth, fraction, seed, sqrt)| {
            let config = ForestConfig::builder()
                .n_trees(n_trees)
                .tree(TreeParams::with_max_depth(max_depth))
                .bootstrap_fraction(fraction)
                .feature_subsample(if sqrt { FeatureSubsample::Sqrt } else { FeatureSubsample::All })
                .seed(seed)
                .n_threads(1)
                .build()
                .unwrap();
            RandomForest::train(&dataset, &config).unwrap()
        },
    )
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn json_roundtrip_preserves_forest(forest in arb_forest()) {
        let json = to_json_string(&forest).unwrap();
        let restored = from_json_str(&json).unwrap();
        prop_assert_eq!(&restored, &forest);

        let pretty = to_json_string_pretty(&forest).unwrap();
        prop_assert_eq!(from_json_str(&pretty).unwrap(), forest);
    }

    #[test]
    fn roundtrip_preserves_predictions(
        forest in arb_forest(),
        rows in prop_vec(prop_vec(arb_value(), 5), 1..20),
    ) {
        let restored = from_json_str(&to_json_string(&forest).unwrap()).unwrap();
        for row in rows {
            let row = &row[..forest.n_features()];
            prop_assert_eq!(forest.predict_with_votes(row), restored.predict_with_votes(row));
        }
    }

    #[test]
    fn schema_reports_tree_count(forest in arb_forest()) {
        let schema = ForestSchema::from(&forest);
        prop_assert_eq!(schema.n_trees, forest.n_trees());
        prop_assert_eq!(schema.trees.len(), forest.n_trees());
    }

    #[test]
    fn out_of_range_feature_is_rejected(forest in arb_forest()) {
        let mut schema = ForestSchema::from(&forest);
        let n_features = schema.n_features;
        schema.trees[0].root = NodeSchema::Split {
            feature: n_features,
            threshold: 0.0,
            left: Box::new(NodeSchema::Leaf { class: 0 }),
            right: Box::new(NodeSchema::Leaf { class: 0 }),
        };
        let json = serde_json::to_string(&schema).unwrap();
        prop_assert!(matches!(from_json_str(&json), Err(ReadError::Validation(_))));
    }
}
