//! Model selection utilities for cross-validation and train/test splitting.
//!
//! This module provides tools for:
//! - Seeded train/test splitting of a [`DataFrame`] and its target
//! - K-Fold cross-validation

use crate::data::DataFrame;
use crate::error::{Result, WeatherError};
use crate::primitives::Vector;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// K-Fold cross-validator.
///
/// Splits data into K consecutive folds. Each fold is used once as test set
/// while the remaining K-1 folds form the training set. The first
/// `n_samples % K` folds hold one extra sample.
///
/// # Example
///
/// ```rust
/// use weathercast::model_selection::KFold;
///
/// let kfold = KFold::new(5);
/// let splits = kfold.split(12).expect("12 samples fit 5 folds");
/// assert_eq!(splits[0].1, vec![0, 1, 2]);
/// assert_eq!(splits[4].1, vec![10, 11]);
/// ```
#[derive(Debug, Clone)]
pub struct KFold {
    n_splits: usize,
}

impl KFold {
    /// Create a new K-Fold cross-validator.
    ///
    /// # Arguments
    ///
    /// * `n_splits` - Number of folds. Must be at least 2.
    #[must_use]
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits }
    }

    /// Generate train/test indices for each fold.
    ///
    /// Returns a vector of (train_indices, test_indices) tuples.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 folds are requested or there are
    /// fewer samples than folds.
    pub fn split(&self, n_samples: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        if self.n_splits < 2 {
            return Err(WeatherError::invalid_hyperparameter(
                "n_splits",
                self.n_splits,
                ">= 2",
            ));
        }
        if n_samples < self.n_splits {
            return Err(WeatherError::invalid_hyperparameter(
                "n_splits",
                self.n_splits,
                &format!("<= n_samples ({n_samples})"),
            ));
        }

        let indices: Vec<usize> = (0..n_samples).collect();

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut result = Vec::with_capacity(self.n_splits);
        let mut start = 0;

        for i in 0..self.n_splits {
            // Distribute remainder across first folds
            let current_fold_size = if i < remainder {
                fold_size + 1
            } else {
                fold_size
            };
            let end = start + current_fold_size;

            let test_indices = indices[start..end].to_vec();

            let mut train_indices = Vec::with_capacity(n_samples - current_fold_size);
            train_indices.extend_from_slice(&indices[..start]);
            train_indices.extend_from_slice(&indices[end..]);

            result.push((train_indices, test_indices));
            start = end;
        }

        Ok(result)
    }
}

/// Row indices of a train/test partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    /// Training rows, in shuffled order
    pub train: Vec<usize>,
    /// Test rows, in shuffled order
    pub test: Vec<usize>,
}

/// Shuffles `0..n_samples` with a ChaCha8 generator seeded from `seed` and
/// takes the first `ceil(test_size * n_samples)` indices as the test rows.
///
/// # Example
///
/// ```rust
/// use weathercast::model_selection::split_indices;
///
/// let split = split_indices(10, 0.2, 42).expect("valid split");
/// assert_eq!(split.test.len(), 2);
/// assert_eq!(split.train.len(), 8);
/// ```
///
/// # Errors
///
/// Returns an error if `test_size` is outside (0, 1) or either partition
/// would be empty.
pub fn split_indices(n_samples: usize, test_size: f64, seed: u64) -> Result<SplitIndices> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(WeatherError::invalid_hyperparameter(
            "test_size",
            test_size,
            "between 0 and 1 (exclusive)",
        ));
    }

    let n_test = (test_size * n_samples as f64).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(WeatherError::Other(format!(
            "test_size={test_size} leaves an empty partition for {n_samples} samples"
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok(SplitIndices {
        train,
        test: indices,
    })
}

/// Row-aligned training and test partitions of features and target.
#[derive(Debug, Clone)]
pub struct Split {
    /// Training features
    pub x_train: DataFrame,
    /// Test features
    pub x_test: DataFrame,
    /// Training target
    pub y_train: Vector<f64>,
    /// Test target
    pub y_test: Vector<f64>,
    /// Source row indices of both partitions
    pub indices: SplitIndices,
}

/// Split a feature frame and its target into random train and test subsets.
///
/// The same shuffled indices select rows from `x` and `y`, so the partitions
/// stay aligned. Identical `seed` and input order give identical partitions.
///
/// # Errors
///
/// Returns an error if `x` and `y` differ in length or the split is invalid
/// (see [`split_indices`]).
pub fn train_test_split(
    x: &DataFrame,
    y: &Vector<f64>,
    test_size: f64,
    seed: u64,
) -> Result<Split> {
    if x.n_rows() != y.len() {
        return Err(WeatherError::dimension_mismatch("y length", x.n_rows(), y.len()));
    }

    let indices = split_indices(x.n_rows(), test_size, seed)?;
    debug!(
        train = indices.train.len(),
        test = indices.test.len(),
        seed,
        "split rows"
    );

    Ok(Split {
        x_train: x.take(&indices.train),
        x_test: x.take(&indices.test),
        y_train: y.select(&indices.train),
        y_test: y.select(&indices.test),
        indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;

    fn frame(n: usize) -> (DataFrame, Vector<f64>) {
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let df = DataFrame::new(vec![
            ("x".to_string(), Column::Numeric(Vector::from_vec(x.clone()))),
            (
                "label".to_string(),
                Column::Categorical((0..n).map(|i| format!("r{i}")).collect()),
            ),
        ])
        .expect("valid frame");
        (df, Vector::from_vec(x))
    }

    #[test]
    fn test_train_test_split_sizes() {
        let (df, y) = frame(10);
        let split = train_test_split(&df, &y, 0.2, 42).expect("split should succeed");
        assert_eq!(split.x_train.n_rows(), 8);
        assert_eq!(split.x_test.n_rows(), 2);
        assert_eq!(split.y_train.len(), 8);
        assert_eq!(split.y_test.len(), 2);
    }

    #[test]
    fn test_test_size_rounds_up() {
        let split = split_indices(11, 0.2, 42).expect("valid split");
        // ceil(2.2) = 3
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 8);
    }

    #[test]
    fn test_partitions_are_row_aligned() {
        let (df, y) = frame(25);
        let split = train_test_split(&df, &y, 0.2, 7).expect("split should succeed");

        let x_test = split.x_test.numeric("x").expect("numeric");
        assert_eq!(x_test.as_slice(), split.y_test.as_slice());

        let labels = split.x_train.categorical("label").expect("categorical");
        for (label, &target) in labels.iter().zip(split.y_train.as_slice()) {
            assert_eq!(label, &format!("r{}", target as usize));
        }
    }

    #[test]
    fn test_split_reproducible() {
        let a = split_indices(100, 0.2, 42).expect("valid split");
        let b = split_indices(100, 0.2, 42).expect("valid split");
        assert_eq!(a, b);

        let c = split_indices(100, 0.2, 43).expect("valid split");
        assert_ne!(a, c);
    }

    #[test]
    fn test_split_disjoint_and_complete() {
        let split = split_indices(37, 0.2, 42).expect("valid split");
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..37).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_errors() {
        assert!(split_indices(10, 0.0, 42).is_err());
        assert!(split_indices(10, 1.0, 42).is_err());
        assert!(split_indices(10, -0.5, 42).is_err());
        assert!(split_indices(10, f64::NAN, 42).is_err());
        // one row cannot be split
        assert!(split_indices(1, 0.2, 42).is_err());
        assert!(split_indices(0, 0.2, 42).is_err());

        let (df, _) = frame(5);
        let y = Vector::from_slice(&[1.0, 2.0]);
        assert!(train_test_split(&df, &y, 0.2, 42).is_err());
    }

    #[test]
    fn test_kfold_consecutive_folds() {
        let splits = KFold::new(3).split(7).expect("valid folds");
        let tests: Vec<Vec<usize>> = splits.iter().map(|(_, t)| t.clone()).collect();
        assert_eq!(tests, vec![vec![0, 1, 2], vec![3, 4], vec![5, 6]]);
        assert_eq!(splits[1].0, vec![0, 1, 2, 5, 6]);
    }

    #[test]
    fn test_kfold_errors() {
        assert!(KFold::new(1).split(10).is_err());
        assert!(KFold::new(5).split(4).is_err());
    }
}

#[cfg(test)]
#[path = "tests_kfold_contract.rs"]
mod tests_kfold_contract;
