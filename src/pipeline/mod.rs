//! Preprocessing plus estimator chains over a [`DataFrame`].
//!
//! A [`Pipeline`] is consumed by `fit`, which returns an immutable
//! [`FittedPipeline`]. Everything the fitted pipeline learned (scaling
//! statistics, vocabularies, polynomial terms, coefficients) is frozen.
//!
//! # Example
//!
//! ```
//! use weathercast::data::{Column, DataFrame};
//! use weathercast::pipeline::Pipeline;
//! use weathercast::primitives::Vector;
//!
//! let df = DataFrame::new(vec![
//!     ("x".to_string(), Column::Numeric(Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]))),
//!     ("kind".to_string(), Column::Categorical(vec!["a".into(), "b".into(), "a".into(), "b".into()])),
//! ]).expect("valid frame");
//! let y = Vector::from_slice(&[2.0, 5.0, 6.0, 9.0]);
//!
//! let fitted = Pipeline::baseline(&["x"], &["kind"]).fit(&df, &y).expect("fit should succeed");
//! assert!(fitted.score(&df, &y).expect("fitted") > 0.99);
//! ```

use crate::data::DataFrame;
use crate::error::{Result, WeatherError};
use crate::linear_model::{LinearRegression, RidgeCV};
use crate::metrics::{r_squared, RegressionMetrics};
use crate::preprocessing::ColumnTransformer;
use crate::primitives::Vector;
use crate::traits::Estimator;
use tracing::info;

/// An unfitted preprocessing step followed by an estimator.
#[derive(Debug, Clone)]
pub struct Pipeline<E> {
    preprocessor: ColumnTransformer,
    estimator: E,
}

impl<E: Estimator> Pipeline<E> {
    /// Chains `preprocessor` and `estimator`.
    #[must_use]
    pub fn new(preprocessor: ColumnTransformer, estimator: E) -> Self {
        Self {
            preprocessor,
            estimator,
        }
    }

    /// Fits the preprocessor on `x`, then the estimator on the transformed
    /// matrix and `y`.
    ///
    /// # Errors
    ///
    /// Returns an error if either step fails to fit.
    pub fn fit(self, x: &DataFrame, y: &Vector<f64>) -> Result<FittedPipeline<E>> {
        let Self {
            mut preprocessor,
            mut estimator,
        } = self;

        let features = preprocessor.fit_transform(x)?;
        estimator.fit(&features, y)?;
        info!(
            rows = features.n_rows(),
            features = features.n_cols(),
            "fitted pipeline"
        );

        Ok(FittedPipeline {
            preprocessor,
            model: estimator,
        })
    }
}

impl Pipeline<LinearRegression> {
    /// Scaled numeric and one-hot categorical columns into ordinary least
    /// squares.
    #[must_use]
    pub fn baseline(numeric: &[&str], categorical: &[&str]) -> Self {
        Self::new(
            ColumnTransformer::plain(numeric, categorical),
            LinearRegression::new(),
        )
    }
}

impl Pipeline<RidgeCV> {
    /// Scaled, polynomially expanded numeric columns and one-hot categorical
    /// columns into a cross-validated ridge.
    #[must_use]
    pub fn polynomial_ridge(
        numeric: &[&str],
        categorical: &[&str],
        degree: usize,
        alphas: Vec<f64>,
        cv_folds: usize,
    ) -> Self {
        Self::new(
            ColumnTransformer::polynomial(numeric, categorical, degree),
            RidgeCV::new(alphas).with_cv(cv_folds),
        )
    }
}

/// A trained pipeline. Only exposes `&self` operations.
#[derive(Debug, Clone)]
pub struct FittedPipeline<E> {
    preprocessor: ColumnTransformer,
    model: E,
}

impl<E: Estimator> FittedPipeline<E> {
    /// Predicts targets for the rows of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` lacks a required column.
    pub fn predict(&self, x: &DataFrame) -> Result<Vector<f64>> {
        let features = self.preprocessor.transform(x)?;
        self.model.predict(&features)
    }

    /// R² of the predictions for `x` against `y`.
    ///
    /// # Errors
    ///
    /// Propagates prediction errors.
    pub fn score(&self, x: &DataFrame, y: &Vector<f64>) -> Result<f64> {
        let y_pred = self.predict_checked(x, y)?;
        Ok(r_squared(&y_pred, y))
    }

    /// Predicts `x` and computes the regression metrics against `y`.
    ///
    /// # Errors
    ///
    /// Propagates prediction errors.
    pub fn evaluate(
        &self,
        x: &DataFrame,
        y: &Vector<f64>,
    ) -> Result<(Vector<f64>, RegressionMetrics)> {
        let y_pred = self.predict_checked(x, y)?;
        let metrics = RegressionMetrics::compute(&y_pred, y);
        Ok((y_pred, metrics))
    }

    fn predict_checked(&self, x: &DataFrame, y: &Vector<f64>) -> Result<Vector<f64>> {
        if x.n_rows() != y.len() {
            return Err(WeatherError::dimension_mismatch("y length", x.n_rows(), y.len()));
        }
        if y.is_empty() {
            return Err(WeatherError::empty_input("cannot score zero rows"));
        }
        self.predict(x)
    }

    /// The fitted preprocessor.
    #[must_use]
    pub fn preprocessor(&self) -> &ColumnTransformer {
        &self.preprocessor
    }

    /// The fitted estimator.
    #[must_use]
    pub fn model(&self) -> &E {
        &self.model
    }
}
