//! Integration tests for forest training and inference.

use approx::assert_abs_diff_eq;
use rstest::rstest;

use devforest::testing::synthetic_dataset;
use devforest::training::{
    accuracy, bootstrap_indices, tree_rng, FeatureSubsample, ForestParams, ForestTrainer, TreeParams,
};
use devforest::{DecisionTree, Error, ForestConfig, LabeledDataset, Parallelism, RandomForest};

fn config(n_trees: usize, seed: u64) -> ForestConfig {
    ForestConfig::builder().n_trees(n_trees).seed(seed).build().unwrap()
}

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn quality_shaped_forest_recalls_training_vectors() {
    // 20 samples, 6 features, 4 evenly distributed labels.
    let dataset = synthetic_dataset(20, 6, 4, 42);
    assert_eq!(dataset.class_counts(), vec![5, 5, 5, 5]);

    let forest = RandomForest::train(&dataset, &config(10, 42)).unwrap();
    assert_eq!(forest.n_trees(), 10);

    for sample in 0..4 {
        let row = dataset.row(sample).to_vec();
        let prediction = forest.predict_with_votes(&row).unwrap();
        assert_eq!(prediction.class, dataset.label(sample));
        assert!(prediction.confidence() >= 0.5, "confidence {}", prediction.confidence());
        assert_abs_diff_eq!(prediction.votes.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    let acc = accuracy(&forest, &dataset, Parallelism::Sequential).unwrap();
    assert!(acc >= 0.9, "training accuracy {acc}");
}

#[test]
fn single_label_dataset_gives_single_leaf() {
    let dataset = LabeledDataset::from_rows(
        &[vec![1.0, 5.0], vec![2.0, 3.0], vec![9.0, 0.0]],
        vec![2, 2, 2],
        4,
    )
    .unwrap();
    let tree = DecisionTree::train(&dataset, TreeParams::default()).unwrap();
    assert_eq!(tree.n_nodes(), 1);
    assert_eq!(tree.predict(&[100.0, -3.0]).unwrap(), 2);

    let forest = RandomForest::train(&dataset, &config(5, 1)).unwrap();
    let prediction = forest.predict_with_votes(&[0.0, 0.0]).unwrap();
    assert_eq!(prediction.class, 2);
    assert_eq!(prediction.confidence(), 1.0);
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn same_seed_gives_identical_forests() {
    let dataset = synthetic_dataset(50, 5, 3, 7);
    let a = RandomForest::train(&dataset, &config(12, 99)).unwrap();
    let b = RandomForest::train(&dataset, &config(12, 99)).unwrap();
    assert_eq!(a, b);
}

#[rstest]
#[case(FeatureSubsample::All, 1.0)]
#[case(FeatureSubsample::Sqrt, 1.0)]
#[case(FeatureSubsample::Count(2), 0.7)]
#[case(FeatureSubsample::Fraction(0.5), 0.5)]
fn thread_count_does_not_change_the_forest(#[case] feature_subsample: FeatureSubsample, #[case] fraction: f64) {
    let dataset = synthetic_dataset(80, 6, 4, 3);
    let base = ForestConfig::builder()
        .n_trees(16)
        .feature_subsample(feature_subsample)
        .bootstrap_fraction(fraction);
    let sequential = RandomForest::train(&dataset, &base.clone().n_threads(1).build().unwrap()).unwrap();
    let parallel = RandomForest::train(&dataset, &base.n_threads(4).build().unwrap()).unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn trainer_matches_config_entry_point() {
    let dataset = synthetic_dataset(30, 4, 2, 5);
    let cfg = config(6, 17);
    let via_config = RandomForest::train(&dataset, &cfg).unwrap();
    let via_trainer = ForestTrainer::new(cfg.to_trainer_params())
        .train(&dataset, Parallelism::Sequential)
        .unwrap();
    assert_eq!(via_config, via_trainer);
}

// =============================================================================
// Bootstrap
// =============================================================================

#[test]
fn full_bootstrap_draws_n_with_about_63_percent_unique() {
    let n = 100;
    let mut unique_total = 0usize;
    let rounds = 200;
    for seed in 0..rounds {
        let mut rng = tree_rng(seed, 0);
        let mut draws = bootstrap_indices(n, 1.0, &mut rng);
        assert_eq!(draws.len(), n);
        draws.sort_unstable();
        draws.dedup();
        unique_total += draws.len();
    }
    let mean_unique = unique_total as f64 / (rounds as f64 * n as f64);
    assert!((0.60..0.67).contains(&mean_unique), "mean unique fraction {mean_unique}");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn empty_dataset_is_rejected() {
    let empty = LabeledDataset::from_samples(&[], 4).unwrap();
    assert_eq!(RandomForest::train(&empty, &config(3, 0)), Err(Error::EmptyDataset));
    assert_eq!(DecisionTree::train(&empty, TreeParams::default()), Err(Error::EmptyDataset));
}

#[rstest]
#[case(ForestParams { n_trees: 0, ..Default::default() })]
#[case(ForestParams { bootstrap_fraction: 0.0, ..Default::default() })]
#[case(ForestParams { bootstrap_fraction: 1.5, ..Default::default() })]
#[case(ForestParams { tree: TreeParams::new(5, 1), ..Default::default() })]
#[case(ForestParams { feature_subsample: FeatureSubsample::Count(9), ..Default::default() })]
fn invalid_hyperparameters_are_rejected(#[case] params: ForestParams) {
    let dataset = synthetic_dataset(10, 3, 2, 1);
    let err = ForestTrainer::new(params).train(&dataset, Parallelism::Sequential).unwrap_err();
    assert!(matches!(err, Error::InvalidHyperparameter { .. }), "{err:?}");
}

#[test]
fn wrong_vector_length_is_a_shape_error() {
    let dataset = synthetic_dataset(20, 6, 4, 2);
    let forest = RandomForest::train(&dataset, &config(3, 2)).unwrap();
    assert_eq!(forest.predict(&[1.0; 5]), Err(Error::Shape { expected: 6, actual: 5 }));
    assert_eq!(forest.predict(&[1.0; 7]), Err(Error::Shape { expected: 6, actual: 7 }));
}

#[test]
fn untrained_forest_refuses_to_predict() {
    let forest = RandomForest::default();
    assert_eq!(forest.predict(&[0.0; 6]), Err(Error::UntrainedModel));
    assert_eq!(forest.predict_with_votes(&[0.0; 6]), Err(Error::UntrainedModel));
}
