//! Evaluation of a trained forest against labeled data.

use crate::data::LabeledDataset;
use crate::error::{Error, Result};
use crate::repr::RandomForest;
use crate::utils::Parallelism;

/// Predictions for every sample of a dataset.
pub fn predict_dataset(
    forest: &RandomForest,
    dataset: &LabeledDataset,
    parallelism: Parallelism,
) -> Result<Vec<u32>> {
    forest.predict_batch(dataset.features(), parallelism)
}

/// Fraction of samples whose predicted class equals their label.
///
/// # Errors
///
/// [`Error::EmptyDataset`] for an empty dataset, otherwise whatever
/// [`RandomForest::predict_batch`] returns.
pub fn accuracy(forest: &RandomForest, dataset: &LabeledDataset, parallelism: Parallelism) -> Result<f64> {
    if dataset.is_empty() {
        return Err(Error::EmptyDataset);
    }
    let predictions = predict_dataset(forest, dataset, parallelism)?;
    let correct = predictions.iter().zip(dataset.labels()).filter(|(p, l)| p == l).count();
    Ok(correct as f64 / dataset.n_samples() as f64)
}

/// Confusion matrix indexed `[true_class][predicted_class]`.
pub fn confusion_matrix(
    forest: &RandomForest,
    dataset: &LabeledDataset,
    parallelism: Parallelism,
) -> Result<Vec<Vec<usize>>> {
    let n_classes = dataset.n_classes().max(forest.n_classes());
    let predictions = predict_dataset(forest, dataset, parallelism)?;
    let mut matrix = vec![vec![0; n_classes]; n_classes];
    for (&pred, &label) in predictions.iter().zip(dataset.labels()) {
        matrix[label as usize][pred as usize] += 1;
    }
    Ok(matrix)
}
