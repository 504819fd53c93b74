//! End-to-end run: load, engineer features, split, train both models and
//! evaluate them on the held-out rows.

use crate::config::AnalysisConfig;
use crate::dataset::{load_weather_csv, CleanedDataset, CleaningStats};
use crate::features::{engineer_features, CATEGORICAL_FEATURES, NUMERIC_FEATURES};
use crate::error::{Result, WeatherError};
use crate::metrics::RegressionMetrics;
use crate::model_selection::train_test_split;
use crate::pipeline::Pipeline;
use crate::primitives::Vector;
use crate::report::{baseline_line, ridge_line};
use tracing::{debug, info};

/// Outcome of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Cleaning counts of the input
    pub cleaning: CleaningStats,
    /// Training rows
    pub n_train: usize,
    /// Held-out rows
    pub n_test: usize,
    /// Baseline OLS on the held-out rows
    pub baseline: RegressionMetrics,
    /// Polynomial ridge on the held-out rows
    pub ridge: RegressionMetrics,
    /// Penalty selected by cross-validation
    pub ridge_alpha: f64,
    /// Mean fold R² of every candidate penalty
    pub ridge_cv_scores: Vec<f64>,
    /// Held-out targets
    pub y_test: Vector<f64>,
    /// Ridge predictions for the held-out rows
    pub ridge_predictions: Vector<f64>,
}

impl AnalysisReport {
    /// The two console lines, baseline first.
    #[must_use]
    pub fn summary_lines(&self) -> [String; 2] {
        [
            baseline_line(&self.baseline),
            ridge_line(&self.ridge, self.ridge_alpha),
        ]
    }
}

/// Loads `config.data_path` and runs [`run_on_dataset`].
///
/// # Errors
///
/// Returns an error for an invalid config, an unreadable or malformed file,
/// or any failure of the modelling steps.
pub fn run(config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.validate()?;
    let dataset = load_weather_csv(&config.data_path)?;
    run_on_dataset(&dataset, config)
}

/// Runs feature engineering, the split, both pipelines and the held-out
/// evaluation on an already cleaned dataset.
///
/// # Errors
///
/// Returns an error for an invalid config, too few rows to split and
/// cross-validate, or a failed fit.
pub fn run_on_dataset(dataset: &CleanedDataset, config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.validate()?;
    if dataset.is_empty() {
        return Err(WeatherError::empty_input("no rows survived cleaning"));
    }

    let (x, y) = engineer_features(dataset, &config.feature_config())?;
    for stats in x.describe() {
        debug!(
            column = %stats.name,
            mean = stats.mean,
            std = stats.std,
            min = stats.min,
            max = stats.max,
            "feature summary"
        );
    }

    let split = train_test_split(&x, &y, config.test_size, config.seed)?;
    info!(
        train = split.y_train.len(),
        test = split.y_test.len(),
        seed = config.seed,
        "split dataset"
    );

    let baseline = Pipeline::baseline(&NUMERIC_FEATURES, &CATEGORICAL_FEATURES)
        .fit(&split.x_train, &split.y_train)?;
    let (_, baseline_metrics) = baseline.evaluate(&split.x_test, &split.y_test)?;
    info!(mse = baseline_metrics.mse, r2 = baseline_metrics.r2, "baseline evaluated");

    let ridge = Pipeline::polynomial_ridge(
        &NUMERIC_FEATURES,
        &CATEGORICAL_FEATURES,
        config.degree,
        config.alphas.clone(),
        config.cv_folds,
    )
    .fit(&split.x_train, &split.y_train)?;
    let (ridge_predictions, ridge_metrics) = ridge.evaluate(&split.x_test, &split.y_test)?;

    let model = ridge.model();
    let ridge_alpha = model
        .alpha()
        .ok_or(WeatherError::NotFitted("RidgeCV"))?;
    let ridge_cv_scores = model.cv_scores().map(<[f64]>::to_vec).unwrap_or_default();
    info!(
        mse = ridge_metrics.mse,
        r2 = ridge_metrics.r2,
        alpha = ridge_alpha,
        cv_r2 = model.best_score().unwrap_or(f64::NAN),
        "polynomial ridge evaluated"
    );

    Ok(AnalysisReport {
        cleaning: dataset.stats(),
        n_train: split.y_train.len(),
        n_test: split.y_test.len(),
        baseline: baseline_metrics,
        ridge: ridge_metrics,
        ridge_alpha,
        ridge_cv_scores,
        y_test: split.y_test,
        ridge_predictions,
    })
}
