//! Core traits for estimators and transformers.
//!
//! These traits define the API contracts shared by the regression models
//! and the numeric preprocessing steps.

use crate::error::{Result, WeatherError};
use crate::metrics::r_squared;
use crate::primitives::{Matrix, Vector};

/// Primary trait for supervised regression estimators.
///
/// Estimators implement fit/predict/score.
///
/// # Examples
///
/// ```
/// use weathercast::prelude::*;
///
/// // Create training data: y = 2x + 1
/// let x_train = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let y_train = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);
///
/// // Test data
/// let x_test = Matrix::from_vec(2, 1, vec![5.0, 6.0]).unwrap();
/// let y_test = Vector::from_slice(&[11.0, 13.0]);
///
/// let mut model = LinearRegression::new();
/// model.fit(&x_train, &y_train).unwrap();
/// let score = model.score(&x_test, &y_test).unwrap();
/// assert!(score > 0.99);
/// ```
pub trait Estimator {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (dimension mismatch, singular matrix, etc.).
    fn fit(&mut self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<()>;

    /// Predicts target values for input data.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the feature count differs
    /// from the one seen during fit.
    fn predict(&self, x: &Matrix<f64>) -> Result<Vector<f64>>;

    /// Computes the R² score on `(x, y)`.
    ///
    /// # Errors
    ///
    /// Propagates prediction errors, and returns
    /// [`WeatherError::DimensionMismatch`] if `y` does not have one target
    /// per row of `x`.
    fn score(&self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        if y_pred.len() != y.len() {
            return Err(WeatherError::dimension_mismatch("y length", y_pred.len(), y.len()));
        }
        Ok(r_squared(&y_pred, y))
    }
}

/// Trait for numeric data transformers (scalers, feature expansions).
///
/// ```text
/// let mut scaler = StandardScaler::new();
/// let x_scaled = scaler.fit_transform(&x)?;
/// let x_test_scaled = scaler.transform(&x_test)?;
/// ```
pub trait Transformer {
    /// Fits the transformer to data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()>;

    /// Transforms data using fitted parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if transformer is not fitted.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>>;

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit_transform(&mut self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock transformer to test trait default methods
    struct MockTransformer {
        fitted: bool,
        scale: f64,
    }

    impl MockTransformer {
        fn new() -> Self {
            Self {
                fitted: false,
                scale: 1.0,
            }
        }
    }

    impl Transformer for MockTransformer {
        fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
            if x.n_rows() == 0 {
                return Err(WeatherError::empty_input("MockTransformer::fit"));
            }
            let sum: f64 = x.as_slice().iter().sum();
            let total = x.n_rows() * x.n_cols();
            self.scale = sum / total as f64;
            if self.scale == 0.0 {
                self.scale = 1.0;
            }
            self.fitted = true;
            Ok(())
        }

        fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
            if !self.fitted {
                return Err(WeatherError::NotFitted("MockTransformer"));
            }
            let (rows, cols) = x.shape();
            Matrix::from_vec(rows, cols, x.as_slice().iter().map(|v| v / self.scale).collect())
        }
    }

    // Mock estimator that always predicts the training mean
    #[derive(Default)]
    struct MeanEstimator {
        mean: Option<f64>,
    }

    impl Estimator for MeanEstimator {
        fn fit(&mut self, _x: &Matrix<f64>, y: &Vector<f64>) -> Result<()> {
            self.mean = Some(y.mean());
            Ok(())
        }

        fn predict(&self, x: &Matrix<f64>) -> Result<Vector<f64>> {
            let mean = self.mean.ok_or(WeatherError::NotFitted("MeanEstimator"))?;
            Ok(Vector::from_vec(vec![mean; x.n_rows()]))
        }
    }

    #[test]
    fn test_transformer_fit_transform_default() {
        let mut transformer = MockTransformer::new();
        let x = Matrix::from_vec(2, 2, vec![2.0, 4.0, 6.0, 8.0]).expect("matrix");

        let transformed = transformer.fit_transform(&x).expect("should succeed");
        assert_eq!(transformed.shape(), (2, 2));
        assert!(transformer.fitted);
        assert!((transformed.get(0, 0) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_transformer_transform_without_fit() {
        let transformer = MockTransformer::new();
        let x = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).expect("matrix");
        assert!(transformer.transform(&x).is_err());
    }

    #[test]
    fn test_transformer_fit_empty_matrix() {
        let mut transformer = MockTransformer::new();
        let x = Matrix::from_vec(0, 2, vec![]).expect("matrix");
        assert!(transformer.fit(&x).is_err());
    }

    #[test]
    fn test_estimator_default_score_is_r2() {
        let mut model = MeanEstimator::default();
        let x = Matrix::from_vec(3, 1, vec![0.0; 3]).expect("matrix");
        let y = Vector::from_slice(&[1.0, 2.0, 3.0]);

        assert!(model.predict(&x).is_err());
        model.fit(&x, &y).expect("fit");
        // Predicting the mean explains none of the variance.
        let score = model.score(&x, &y).expect("score");
        assert!(score.abs() < 1e-12);
    }

    #[test]
    fn test_estimator_score_rejects_length_mismatch() {
        let mut model = MeanEstimator::default();
        let x = Matrix::from_vec(3, 1, vec![0.0; 3]).expect("matrix");
        model
            .fit(&x, &Vector::from_slice(&[1.0, 2.0, 3.0]))
            .expect("fit");

        let short = Vector::from_slice(&[1.0, 2.0]);
        let err = model.score(&x, &short).unwrap_err();
        match err {
            WeatherError::DimensionMismatch { expected, actual } => {
                assert_eq!(expected, "y length=3");
                assert_eq!(actual, "2");
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }
}
