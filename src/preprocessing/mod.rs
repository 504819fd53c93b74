//! Preprocessing transformers for feature scaling, expansion and encoding.
//!
//! Every transformer learns its parameters in `fit` from the training
//! partition only; `transform` applies the frozen parameters to any data.
//!
//! # Example
//!
//! ```
//! use weathercast::prelude::*;
//! use weathercast::preprocessing::StandardScaler;
//!
//! let data = Matrix::from_vec(4, 2, vec![
//!     1.0, 100.0,
//!     2.0, 200.0,
//!     3.0, 300.0,
//!     4.0, 400.0,
//! ]).expect("valid matrix dimensions");
//!
//! // Standardize to zero mean and unit variance
//! let mut scaler = StandardScaler::new();
//! let scaled = scaler.fit_transform(&data).expect("fit_transform should succeed");
//! assert!(scaled.get(0, 0).abs() < 2.0);
//! ```

mod column;
mod encoding;
mod polynomial;

pub use column::ColumnTransformer;
pub use encoding::OneHotEncoder;
pub use polynomial::PolynomialFeatures;

use crate::error::{Result, WeatherError};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// Standard deviations at or below this are treated as constant columns.
const MIN_STD: f64 = 1e-12;

/// Standardizes features by removing mean and scaling to unit variance.
///
/// The standard score of a sample x is: z = (x - mean) / std
///
/// Uses the population standard deviation. Constant columns are centered but
/// left unscaled.
///
/// # Example
///
/// ```
/// use weathercast::prelude::*;
/// use weathercast::preprocessing::StandardScaler;
///
/// let data = Matrix::from_vec(3, 2, vec![
///     0.0, 0.0,
///     1.0, 10.0,
///     2.0, 20.0,
/// ]).expect("valid matrix dimensions");
///
/// let mut scaler = StandardScaler::new();
/// let scaled = scaler.fit_transform(&data).expect("fit_transform should succeed");
///
/// let (n_rows, n_cols) = scaled.shape();
/// for j in 0..n_cols {
///     let mean: f64 = (0..n_rows).map(|i| scaled.get(i, j)).sum::<f64>() / n_rows as f64;
///     assert!(mean.abs() < 1e-12, "Mean should be ~0");
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Mean of each feature (computed during fit).
    mean: Option<Vec<f64>>,
    /// Standard deviation of each feature (computed during fit).
    std: Option<Vec<f64>>,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardScaler {
    /// Creates an unfitted `StandardScaler`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
        }
    }

    /// Returns the mean of each feature, if fitted.
    #[must_use]
    pub fn mean(&self) -> Option<&[f64]> {
        self.mean.as_deref()
    }

    /// Returns the standard deviation of each feature, if fitted.
    #[must_use]
    pub fn std(&self) -> Option<&[f64]> {
        self.std.as_deref()
    }

    /// Returns true if the scaler has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.mean.is_some()
    }

    fn fitted_params(&self) -> Result<(&[f64], &[f64])> {
        match (self.mean.as_deref(), self.std.as_deref()) {
            (Some(mean), Some(std)) => Ok((mean, std)),
            _ => Err(WeatherError::NotFitted("StandardScaler")),
        }
    }
}

impl Transformer for StandardScaler {
    /// Computes the mean and standard deviation of each feature.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples == 0 {
            return Err(WeatherError::empty_input("StandardScaler::fit"));
        }

        let mut mean = vec![0.0; n_features];
        for i in 0..n_samples {
            for (m, &v) in mean.iter_mut().zip(x.row_slice(i)) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n_samples as f64;
        }

        // Population std (divide by n, not n-1)
        let mut std = vec![0.0; n_features];
        for i in 0..n_samples {
            for ((s, &v), &m) in std.iter_mut().zip(x.row_slice(i)).zip(&mean) {
                *s += (v - m) * (v - m);
            }
        }
        for s in &mut std {
            *s = (*s / n_samples as f64).sqrt();
        }

        self.mean = Some(mean);
        self.std = Some(std);

        Ok(())
    }

    /// Standardizes the data using fitted mean and std.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (mean, std) = self.fitted_params()?;

        let (n_samples, n_features) = x.shape();
        if n_features != mean.len() {
            return Err(WeatherError::dimension_mismatch(
                "n_features",
                mean.len(),
                n_features,
            ));
        }

        let mut result = Vec::with_capacity(n_samples * n_features);
        for i in 0..n_samples {
            for (j, &val) in x.row_slice(i).iter().enumerate() {
                let centered = val - mean[j];
                result.push(if std[j] > MIN_STD {
                    centered / std[j]
                } else {
                    centered
                });
            }
        }

        Matrix::from_vec(n_samples, n_features, result)
    }
}

#[cfg(test)]
mod tests;
