//! Run configuration.

use crate::error::{Result, WeatherError};
use crate::features::FeatureConfig;
use crate::linear_model::logspace;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for one analysis run.
///
/// The defaults reproduce the reference run: `weatherHistory.csv`, an 80/20
/// split with seed 42, an 8-value summary vocabulary, degree-2 polynomial
/// features and a 5-fold search over `logspace(-3, 3, 13)`.
///
/// # Example
///
/// ```
/// use weathercast::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default().with_seed(7).with_test_size(0.25);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.alphas.len(), 13);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Input CSV
    pub data_path: PathBuf,
    /// Output PNG for the ridge scatter plot
    pub plot_path: PathBuf,
    /// Fraction of rows held out for evaluation
    pub test_size: f64,
    /// Split seed
    pub seed: u64,
    /// Summary vocabulary size before the `OTHER` bucket
    pub top_n: usize,
    /// Polynomial degree of the ridge features
    pub degree: usize,
    /// Folds of the ridge penalty search
    pub cv_folds: usize,
    /// Ridge penalty candidates
    pub alphas: Vec<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("weatherHistory.csv"),
            plot_path: PathBuf::from("ridge_actual_vs_predicted.png"),
            test_size: 0.2,
            seed: 42,
            top_n: 8,
            degree: 2,
            cv_folds: 5,
            alphas: logspace(-3.0, 3.0, 13),
        }
    }
}

impl AnalysisConfig {
    /// Sets the input CSV path.
    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Sets the output plot path.
    #[must_use]
    pub fn with_plot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.plot_path = path.into();
        self
    }

    /// Sets the held-out fraction.
    #[must_use]
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    /// Sets the split seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the summary vocabulary size.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Sets the polynomial degree.
    #[must_use]
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Sets the number of cross-validation folds.
    #[must_use]
    pub fn with_cv_folds(mut self, cv_folds: usize) -> Self {
        self.cv_folds = cv_folds;
        self
    }

    /// Sets the ridge penalty candidates.
    #[must_use]
    pub fn with_alphas(mut self, alphas: Vec<f64>) -> Self {
        self.alphas = alphas;
        self
    }

    /// Feature engineering settings derived from this config.
    #[must_use]
    pub fn feature_config(&self) -> FeatureConfig {
        FeatureConfig { top_n: self.top_n }
    }

    /// Checks every setting.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::InvalidHyperparameter`] for the first invalid
    /// setting.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(WeatherError::invalid_hyperparameter(
                "test_size",
                self.test_size,
                "between 0 and 1 (exclusive)",
            ));
        }
        if self.top_n == 0 {
            return Err(WeatherError::invalid_hyperparameter("top_n", self.top_n, ">= 1"));
        }
        if self.degree == 0 {
            return Err(WeatherError::invalid_hyperparameter("degree", self.degree, ">= 1"));
        }
        if self.cv_folds < 2 {
            return Err(WeatherError::invalid_hyperparameter(
                "cv_folds",
                self.cv_folds,
                ">= 2",
            ));
        }
        if self.alphas.is_empty() {
            return Err(WeatherError::invalid_hyperparameter(
                "alphas",
                "[]",
                "at least one candidate",
            ));
        }
        if let Some(&bad) = self.alphas.iter().find(|a| !(a.is_finite() && **a > 0.0)) {
            return Err(WeatherError::invalid_hyperparameter(
                "alphas",
                bad,
                "finite and > 0",
            ));
        }
        Ok(())
    }
}
