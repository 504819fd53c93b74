//! Evaluation metrics for regression models.
//!
//! Includes the coefficient of determination (R²) and the error metrics
//! (MSE, MAE, RMSE) used to compare fitted pipelines on held-out rows.

use crate::primitives::Vector;
use serde::Serialize;

/// Computes the coefficient of determination (R²).
///
/// R² = 1 - (`SS_res` / `SS_tot`)
///
/// where `SS_res` is the residual sum of squares and `SS_tot` is the total
/// sum of squares. A constant target gives 1.0 for a perfect prediction and
/// 0.0 otherwise.
///
/// # Examples
///
/// ```
/// use weathercast::metrics::r_squared;
/// use weathercast::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
/// let r2 = r_squared(&y_pred, &y_true);
/// assert!(r2 > 0.9);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths.
#[must_use]
pub fn r_squared(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");

    let y_mean = y_true.mean();

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    let ss_tot: f64 = y_true.iter().map(|t| (t - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }

    1.0 - (ss_res / ss_tot)
}

/// Computes the Mean Squared Error (MSE).
///
/// MSE = (1/n) * `Σ(y_true` - `y_pred)²`
///
/// # Examples
///
/// ```
/// use weathercast::metrics::mse;
/// use weathercast::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
/// assert!((mse(&y_pred, &y_true) - 0.375).abs() < 1e-12);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn mse(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let sum_sq_error: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    sum_sq_error / y_true.len() as f64
}

/// Computes the Mean Absolute Error (MAE).
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn mae(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let sum_abs_error: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).abs())
        .sum();

    sum_abs_error / y_true.len() as f64
}

/// Computes the Root Mean Squared Error (RMSE).
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn rmse(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    mse(y_pred, y_true).sqrt()
}

/// Held-out error and fit quality for one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionMetrics {
    /// Mean squared error.
    pub mse: f64,
    /// Coefficient of determination.
    pub r2: f64,
    /// Mean absolute error.
    pub mae: f64,
}

impl RegressionMetrics {
    /// Computes all metrics for one prediction vector.
    ///
    /// # Panics
    ///
    /// Panics if vectors have different lengths or are empty.
    #[must_use]
    pub fn compute(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> Self {
        Self {
            mse: mse(y_pred, y_true),
            r2: r_squared(y_pred, y_true),
            mae: mae(y_pred, y_true),
        }
    }

    /// Root mean squared error.
    #[must_use]
    pub fn rmse(&self) -> f64 {
        self.mse.sqrt()
    }
}

#[cfg(test)]
#[path = "tests_regression_contract.rs"]
mod tests_regression_contract;
