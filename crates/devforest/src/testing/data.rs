use ndarray::Array2;
use rand::prelude::*;

use crate::data::LabeledDataset;

/// Generate random dense features in row-major order.
///
/// Values are uniform in `[min, max)`.
pub fn random_dense(rows: usize, cols: usize, seed: u64, min: f64, max: f64) -> Vec<f64> {
    assert!(max >= min);
    let mut rng = StdRng::seed_from_u64(seed);
    let width = max - min;
    (0..rows * cols).map(|_| min + rng.r#gen::<f64>() * width).collect()
}

/// A learnable classification dataset.
///
/// Labels cycle through `0..n_classes` so classes are evenly represented.
/// Feature 0 of a class-`c` sample lies in `[10c, 10c + 5)`, which makes the
/// classes separable on that feature; every other feature is noise in `[0, 100)`.
pub fn synthetic_dataset(n_samples: usize, n_features: usize, n_classes: usize, seed: u64) -> LabeledDataset {
    assert!(n_features >= 1 && n_classes >= 1);
    let mut features = Array2::from_shape_vec(
        (n_samples, n_features),
        random_dense(n_samples, n_features, seed, 0.0, 100.0),
    )
    .expect("shape matches generated length");
    let labels: Vec<u32> = (0..n_samples).map(|i| (i % n_classes) as u32).collect();

    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    for (i, &label) in labels.iter().enumerate() {
        features[[i, 0]] = label as f64 * 10.0 + rng.r#gen::<f64>() * 5.0;
    }
    LabeledDataset::new(features, labels, n_classes).expect("labels are in range")
}
