//! Shared proptest strategies for integration tests.

#![allow(dead_code)]

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use devforest::LabeledDataset;

/// Finite feature values with plenty of ties.
pub fn arb_value() -> impl Strategy<Value = f64> {
    prop_oneof![(-50i32..50).prop_map(f64::from), -1e6f64..1e6]
}

/// A labeled dataset with 1-5 features, 2-4 classes and up to 39 samples.
pub fn arb_dataset() -> impl Strategy<Value = LabeledDataset> {
    (1usize..6, 2usize..5, 1usize..40).prop_flat_map(|(n_features, n_classes, n_samples)| {
        (
            prop_vec(prop_vec(arb_value(), n_features), n_samples),
            prop_vec(0..n_classes as u32, n_samples),
        )
            .prop_map(move |(rows, labels)| LabeledDataset::from_rows(&rows, labels, n_classes).unwrap())
    })
}
