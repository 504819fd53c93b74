//! Linear models for regression.
//!
//! Includes Ordinary Least Squares (OLS) linear regression, ridge regression
//! and ridge regression with a cross-validated penalty.

mod ridge_cv;

pub use ridge_cv::{logspace, RidgeCV};

use crate::error::{Result, WeatherError};
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Relative pivot tolerance below which a column of the normal equations is
/// treated as linearly dependent on the earlier ones.
const RANK_TOL: f64 = 1e-9;

/// Ordinary Least Squares (OLS) linear regression.
///
/// Fits a linear model by minimizing the residual sum of squares between
/// observed targets and predicted targets. The model equation is:
///
/// ```text
/// y = X β + ε
/// ```
///
/// where `β` is the coefficient vector and `ε` is random error.
///
/// # Solver
///
/// Uses normal equations `X^T X β = X^T y` with a rank-revealing Cholesky
/// factorization. Columns that are exact linear combinations of earlier
/// columns (for example a complete one-hot group next to the intercept)
/// get a zero coefficient and are reported by [`dropped_columns`].
///
/// [`dropped_columns`]: LinearRegression::dropped_columns
///
/// # Examples
///
/// ```
/// use weathercast::prelude::*;
///
/// // Simple linear regression: y = 2x + 1
/// let x = Matrix::from_vec(4, 1, vec![
///     1.0,
///     2.0,
///     3.0,
///     4.0,
/// ]).unwrap();
/// let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);
///
/// let mut model = LinearRegression::new();
/// model.fit(&x, &y).unwrap();
///
/// let r2 = model.score(&x, &y).unwrap();
/// assert!(r2 > 0.99);
/// ```
///
/// # Performance
///
/// - Time complexity: O(np² + p³) where n = samples, p = features
/// - Space complexity: O(np)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegression {
    /// Coefficients for features (excluding intercept).
    coefficients: Option<Vector<f64>>,
    /// Intercept (bias) term.
    intercept: f64,
    /// Whether to fit an intercept.
    fit_intercept: bool,
    /// Feature columns found to be linearly dependent during fit.
    dropped_columns: Vec<usize>,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearRegression {
    /// Creates a new `LinearRegression` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: 0.0,
            fit_intercept: true,
            dropped_columns: Vec::new(),
        }
    }

    /// Sets whether to fit an intercept term.
    #[must_use]
    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Returns the coefficients (excluding intercept), if fitted.
    #[must_use]
    pub fn coefficients(&self) -> Option<&Vector<f64>> {
        self.coefficients.as_ref()
    }

    /// Returns the intercept term.
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Feature indices that were linearly dependent on earlier features and
    /// received a zero coefficient.
    #[must_use]
    pub fn dropped_columns(&self) -> &[usize] {
        &self.dropped_columns
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }
}

impl Estimator for LinearRegression {
    /// Fits the linear regression model using normal equations.
    ///
    /// # Errors
    ///
    /// Returns an error if input dimensions don't match or there are no
    /// samples.
    fn fit(&mut self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<()> {
        check_fit_input(x, y)?;

        let x_design = design_matrix(x, self.fit_intercept)?;
        let xtx = x_design.gram();
        let xty = x_design.tmatvec(y)?;

        let (beta, dropped) = xtx.cholesky_solve_semidefinite(&xty, RANK_TOL)?;

        let offset = usize::from(self.fit_intercept);
        self.dropped_columns = dropped
            .into_iter()
            .filter(|&j| j >= offset)
            .map(|j| j - offset)
            .collect();
        if !self.dropped_columns.is_empty() {
            warn!(
                columns = ?self.dropped_columns,
                "linearly dependent features given zero coefficients"
            );
        }

        let (intercept, coefficients) = split_beta(beta, self.fit_intercept);
        self.intercept = intercept;
        self.coefficients = Some(coefficients);
        Ok(())
    }

    /// Predicts target values for input data.
    fn predict(&self, x: &Matrix<f64>) -> Result<Vector<f64>> {
        predict_linear(
            self.coefficients.as_ref(),
            self.intercept,
            x,
            "LinearRegression",
        )
    }
}

/// Ridge regression with L2 regularization.
///
/// Fits a linear model with an L2 penalty on coefficient magnitudes:
///
/// ```text
/// minimize ||y - Xβ - b||² + α||β||²
/// ```
///
/// The intercept `b` is not penalized.
///
/// # Examples
///
/// ```
/// use weathercast::prelude::*;
///
/// let x = Matrix::from_vec(5, 2, vec![
///     1.0, 2.0,
///     2.0, 3.0,
///     3.0, 5.0,
///     4.0, 5.0,
///     5.0, 7.0,
/// ]).expect("valid matrix dimensions");
/// let y = Vector::from_slice(&[5.0, 8.0, 12.0, 13.0, 17.0]);
///
/// let mut model = Ridge::new(0.1);
/// model.fit(&x, &y).expect("fit should succeed");
/// assert!(model.score(&x, &y).expect("fitted") > 0.95);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ridge {
    /// Regularization strength.
    alpha: f64,
    /// Coefficients for features (excluding intercept).
    coefficients: Option<Vector<f64>>,
    /// Intercept (bias) term.
    intercept: f64,
    /// Whether to fit an intercept.
    fit_intercept: bool,
}

impl Ridge {
    /// Creates a new `Ridge` regression with the given regularization strength.
    ///
    /// # Arguments
    ///
    /// * `alpha` - Regularization strength. Larger values = more regularization.
    ///   Must be non-negative.
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            coefficients: None,
            intercept: 0.0,
            fit_intercept: true,
        }
    }

    /// Sets whether to fit an intercept term.
    #[must_use]
    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Returns the regularization strength (alpha).
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the coefficients (excluding intercept), if fitted.
    #[must_use]
    pub fn coefficients(&self) -> Option<&Vector<f64>> {
        self.coefficients.as_ref()
    }

    /// Returns the intercept term.
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }
}

impl Estimator for Ridge {
    /// Fits the Ridge regression model using regularized normal equations.
    ///
    /// Solves: (X^T X + αI) β = X^T y, leaving the intercept unpenalized.
    ///
    /// # Errors
    ///
    /// Returns an error if alpha is negative, input dimensions don't match or
    /// the regularized system is singular.
    fn fit(&mut self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<()> {
        if !(self.alpha >= 0.0 && self.alpha.is_finite()) {
            return Err(WeatherError::invalid_hyperparameter(
                "alpha",
                self.alpha,
                "finite and >= 0",
            ));
        }
        check_fit_input(x, y)?;

        let x_design = design_matrix(x, self.fit_intercept)?;
        let mut xtx = x_design.gram();
        add_penalty(&mut xtx, self.alpha, self.fit_intercept);
        let xty = x_design.tmatvec(y)?;

        let beta = xtx.cholesky_solve(&xty)?;

        let (intercept, coefficients) = split_beta(beta, self.fit_intercept);
        self.intercept = intercept;
        self.coefficients = Some(coefficients);
        Ok(())
    }

    /// Predicts target values for input data.
    fn predict(&self, x: &Matrix<f64>) -> Result<Vector<f64>> {
        predict_linear(self.coefficients.as_ref(), self.intercept, x, "Ridge")
    }
}

fn check_fit_input(x: &Matrix<f64>, y: &Vector<f64>) -> Result<()> {
    let n_samples = x.n_rows();
    if n_samples != y.len() {
        return Err(WeatherError::dimension_mismatch(
            "y length",
            n_samples,
            y.len(),
        ));
    }
    if n_samples == 0 {
        return Err(WeatherError::empty_input("cannot fit with zero samples"));
    }
    Ok(())
}

/// Prepends a column of ones when fitting an intercept.
fn design_matrix(x: &Matrix<f64>, fit_intercept: bool) -> Result<Matrix<f64>> {
    if !fit_intercept {
        return Ok(x.clone());
    }

    let (n_rows, n_cols) = x.shape();
    let mut data = Vec::with_capacity(n_rows * (n_cols + 1));
    for i in 0..n_rows {
        data.push(1.0);
        data.extend_from_slice(x.row_slice(i));
    }
    Matrix::from_vec(n_rows, n_cols + 1, data)
}

/// Adds `alpha` to the diagonal, skipping the intercept entry.
fn add_penalty(xtx: &mut Matrix<f64>, alpha: f64, fit_intercept: bool) {
    let start = usize::from(fit_intercept);
    for i in start..xtx.n_rows() {
        let current = xtx.get(i, i);
        xtx.set(i, i, current + alpha);
    }
}

/// Separates the intercept (first entry of a design-matrix solution) from
/// the feature coefficients.
fn split_beta(beta: Vector<f64>, fit_intercept: bool) -> (f64, Vector<f64>) {
    if fit_intercept {
        (beta[0], beta.slice(1, beta.len()))
    } else {
        (0.0, beta)
    }
}

fn predict_linear(
    coefficients: Option<&Vector<f64>>,
    intercept: f64,
    x: &Matrix<f64>,
    model: &'static str,
) -> Result<Vector<f64>> {
    let coefficients = coefficients.ok_or(WeatherError::NotFitted(model))?;
    if x.n_cols() != coefficients.len() {
        return Err(WeatherError::dimension_mismatch(
            "n_features",
            coefficients.len(),
            x.n_cols(),
        ));
    }
    Ok(x.matvec(coefficients)?.add_scalar(intercept))
}
