//! Ridge regression with the penalty chosen by K-fold cross-validation.

use super::{add_penalty, check_fit_input, design_matrix, Ridge};
use crate::error::{Result, WeatherError};
use crate::metrics::r_squared;
use crate::model_selection::KFold;
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// `num` values evenly spaced on a log10 scale from `10^start` to
/// `10^stop` inclusive.
///
/// # Example
///
/// ```
/// use weathercast::linear_model::logspace;
///
/// let grid = logspace(-3.0, 3.0, 13);
/// assert_eq!(grid.len(), 13);
/// assert!((grid[0] - 1e-3).abs() < 1e-15);
/// assert!((grid[6] - 1.0).abs() < 1e-12);
/// assert!((grid[12] - 1e3).abs() < 1e-9);
/// ```
#[must_use]
pub fn logspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![10f64.powf(start)],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| 10f64.powf(start + step * i as f64))
                .collect()
        }
    }
}

/// Ridge regression that selects `alpha` from a candidate grid.
///
/// Each candidate is scored by the mean R² over unshuffled K-fold splits
/// of the training data. The highest mean wins; ties go to the earliest
/// candidate. The final model is refit on all rows with the winner.
///
/// Per-fold Gram matrices are computed once, so every candidate costs one
/// `p x p` solve per fold.
///
/// # Example
///
/// ```
/// use weathercast::prelude::*;
/// use weathercast::linear_model::{logspace, RidgeCV};
///
/// let x = Matrix::from_vec(20, 1, (0..20).map(|i| i as f64).collect()).expect("20x1");
/// let y: Vector<f64> = (0..20).map(|i| 0.5 * i as f64 + 3.0).collect();
///
/// let mut model = RidgeCV::new(logspace(-3.0, 3.0, 13));
/// model.fit(&x, &y).expect("fit should succeed");
///
/// let alpha = model.alpha().expect("fitted");
/// assert!(logspace(-3.0, 3.0, 13).contains(&alpha));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RidgeCV {
    alphas: Vec<f64>,
    cv: usize,
    fit_intercept: bool,
    /// Mean fold R² of each candidate, in grid order.
    cv_scores: Option<Vec<f64>>,
    /// Refit model using the winning alpha.
    model: Option<Ridge>,
}

impl RidgeCV {
    /// Creates a cross-validated ridge over `alphas` with 5 folds.
    #[must_use]
    pub fn new(alphas: Vec<f64>) -> Self {
        Self {
            alphas,
            cv: 5,
            fit_intercept: true,
            cv_scores: None,
            model: None,
        }
    }

    /// Sets the number of cross-validation folds.
    #[must_use]
    pub fn with_cv(mut self, n_folds: usize) -> Self {
        self.cv = n_folds;
        self
    }

    /// Sets whether to fit an intercept term.
    #[must_use]
    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Candidate penalties.
    #[must_use]
    pub fn alphas(&self) -> &[f64] {
        &self.alphas
    }

    /// The selected penalty, if fitted.
    #[must_use]
    pub fn alpha(&self) -> Option<f64> {
        self.model.as_ref().map(Ridge::alpha)
    }

    /// Mean cross-validated R² of every candidate, if fitted.
    #[must_use]
    pub fn cv_scores(&self) -> Option<&[f64]> {
        self.cv_scores.as_deref()
    }

    /// Mean cross-validated R² of the selected penalty, if fitted.
    #[must_use]
    pub fn best_score(&self) -> Option<f64> {
        let scores = self.cv_scores.as_ref()?;
        let alpha = self.alpha()?;
        self.alphas
            .iter()
            .position(|&a| a == alpha)
            .map(|i| scores[i])
    }

    /// Coefficients of the refit model, if fitted.
    #[must_use]
    pub fn coefficients(&self) -> Option<&Vector<f64>> {
        self.model.as_ref().and_then(Ridge::coefficients)
    }

    /// Intercept of the refit model, if fitted.
    #[must_use]
    pub fn intercept(&self) -> Option<f64> {
        self.model.as_ref().map(Ridge::intercept)
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    fn validate_alphas(&self) -> Result<()> {
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

    /// Mean held-out R² of every candidate.
    fn score_candidates(&self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<Vec<f64>> {
        let design = design_matrix(x, self.fit_intercept)?;
        let total_gram = design.gram();
        let total_xty = design.tmatvec(y)?;

        let folds = KFold::new(self.cv).split(x.n_rows())?;
        let mut sums = vec![0.0; self.alphas.len()];

        for (fold_idx, (_, test_idx)) in folds.iter().enumerate() {
            let x_fold = design.select_rows(test_idx);
            let y_fold = y.select(test_idx);

            let train_gram = total_gram.sub(&x_fold.gram())?;
            let fold_xty = x_fold.tmatvec(&y_fold)?;
            let train_xty: Vector<f64> = total_xty
                .iter()
                .zip(fold_xty.iter())
                .map(|(total, fold)| total - fold)
                .collect();

            for (sum, &alpha) in sums.iter_mut().zip(&self.alphas) {
                let mut system = train_gram.clone();
                add_penalty(&mut system, alpha, self.fit_intercept);
                let beta = system.cholesky_solve(&train_xty)?;
                let y_pred = x_fold.matvec(&beta)?;
                let score = r_squared(&y_pred, &y_fold);
                debug!(fold = fold_idx, alpha, score, "ridge fold score");
                *sum += score;
            }
        }

        let n_folds = folds.len() as f64;
        Ok(sums.into_iter().map(|s| s / n_folds).collect())
    }
}

/// Index of the highest score; the earliest wins ties and NaN never wins.
fn best_index(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

impl Estimator for RidgeCV {
    /// Scores every candidate by K-fold cross-validation and refits the
    /// winner on all rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty or has non-positive values, the
    /// fold count is invalid for the sample count, or a system is singular.
    fn fit(&mut self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<()> {
        self.validate_alphas()?;
        check_fit_input(x, y)?;

        let scores = self.score_candidates(x, y)?;
        for (alpha, score) in self.alphas.iter().zip(&scores) {
            debug!(alpha, mean_r2 = score, "ridge candidate");
        }

        let best = best_index(&scores)
            .ok_or_else(|| WeatherError::Other("every ridge candidate scored NaN".into()))?;
        let alpha = self.alphas[best];
        info!(alpha, mean_r2 = scores[best], folds = self.cv, "selected ridge penalty");

        let mut model = Ridge::new(alpha).with_intercept(self.fit_intercept);
        model.fit(x, y)?;

        self.cv_scores = Some(scores);
        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, x: &Matrix<f64>) -> Result<Vector<f64>> {
        self.model
            .as_ref()
            .ok_or(WeatherError::NotFitted("RidgeCV"))?
            .predict(x)
    }
}

#[cfg(test)]
#[path = "tests_ridge_cv.rs"]
mod tests;
