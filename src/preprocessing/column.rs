//! Column-wise preprocessing of a mixed numeric/categorical `DataFrame`.

use super::{OneHotEncoder, PolynomialFeatures, StandardScaler};
use crate::data::DataFrame;
use crate::error::{Result, WeatherError};
use crate::primitives::Matrix;
use crate::traits::Transformer;

/// Applies a numeric pipeline and a categorical encoder to named columns of
/// a [`DataFrame`] and concatenates the results.
///
/// The numeric block is standardized and, for the polynomial variant,
/// expanded afterwards. The categorical block is one-hot encoded. Output
/// columns are numeric block first, then categorical block.
///
/// # Example
///
/// ```
/// use weathercast::data::{Column, DataFrame};
/// use weathercast::preprocessing::ColumnTransformer;
/// use weathercast::primitives::Vector;
///
/// let df = DataFrame::new(vec![
///     ("x".to_string(), Column::Numeric(Vector::from_slice(&[1.0, 2.0, 3.0]))),
///     ("kind".to_string(), Column::Categorical(vec!["a".into(), "b".into(), "a".into()])),
/// ]).expect("valid frame");
///
/// let mut pre = ColumnTransformer::plain(&["x"], &["kind"]);
/// let out = pre.fit_transform(&df).expect("fit_transform should succeed");
/// assert_eq!(out.shape(), (3, 3));
/// ```
#[derive(Debug, Clone)]
pub struct ColumnTransformer {
    numeric_columns: Vec<String>,
    categorical_columns: Vec<String>,
    scaler: StandardScaler,
    poly: Option<PolynomialFeatures>,
    encoder: OneHotEncoder,
    fitted: bool,
}

impl ColumnTransformer {
    /// Scaled numeric columns followed by one-hot categorical columns.
    #[must_use]
    pub fn plain(numeric: &[&str], categorical: &[&str]) -> Self {
        Self {
            numeric_columns: numeric.iter().map(|s| (*s).to_string()).collect(),
            categorical_columns: categorical.iter().map(|s| (*s).to_string()).collect(),
            scaler: StandardScaler::new(),
            poly: None,
            encoder: OneHotEncoder::new(),
            fitted: false,
        }
    }

    /// Scaled then polynomially expanded numeric columns followed by one-hot
    /// categorical columns.
    #[must_use]
    pub fn polynomial(numeric: &[&str], categorical: &[&str], degree: usize) -> Self {
        Self {
            poly: Some(PolynomialFeatures::new(degree)),
            ..Self::plain(numeric, categorical)
        }
    }

    /// Names of the numeric input columns.
    #[must_use]
    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    /// Names of the categorical input columns.
    #[must_use]
    pub fn categorical_columns(&self) -> &[String] {
        &self.categorical_columns
    }

    /// The numeric scaler.
    #[must_use]
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// The categorical encoder.
    #[must_use]
    pub fn encoder(&self) -> &OneHotEncoder {
        &self.encoder
    }

    /// Returns true once `fit` has succeeded.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Width of the numeric block, if fitted.
    #[must_use]
    pub fn n_numeric_outputs(&self) -> Option<usize> {
        if !self.fitted {
            return None;
        }
        match &self.poly {
            Some(poly) => poly.n_output_features(),
            None => Some(self.numeric_columns.len()),
        }
    }

    /// Total output width, if fitted.
    #[must_use]
    pub fn n_output_features(&self) -> Option<usize> {
        let categorical = if self.categorical_columns.is_empty() {
            0
        } else {
            self.encoder.n_output_features()?
        };
        Some(self.n_numeric_outputs()? + categorical)
    }

    fn numeric_names(&self) -> Vec<&str> {
        self.numeric_columns.iter().map(String::as_str).collect()
    }

    fn categorical_slices<'a>(&self, df: &'a DataFrame) -> Result<Vec<&'a [String]>> {
        self.categorical_columns
            .iter()
            .map(|name| df.categorical(name))
            .collect()
    }

    fn numeric_block(&self, df: &DataFrame) -> Result<Matrix<f64>> {
        let raw = df.numeric_matrix(&self.numeric_names())?;
        let scaled = self.scaler.transform(&raw)?;
        match &self.poly {
            Some(poly) => poly.transform(&scaled),
            None => Ok(scaled),
        }
    }

    /// Learns scaling statistics, polynomial terms and vocabularies from `df`.
    ///
    /// # Errors
    ///
    /// Returns an error if a column is missing or has the wrong type, or `df`
    /// has no rows.
    pub fn fit(&mut self, df: &DataFrame) -> Result<()> {
        if self.numeric_columns.is_empty() && self.categorical_columns.is_empty() {
            return Err(WeatherError::empty_input("ColumnTransformer has no columns"));
        }

        if !self.numeric_columns.is_empty() {
            let raw = df.numeric_matrix(&self.numeric_names())?;
            let scaled = self.scaler.fit_transform(&raw)?;
            if let Some(poly) = self.poly.as_mut() {
                poly.fit(&scaled)?;
            }
        }

        if !self.categorical_columns.is_empty() {
            let cats = self.categorical_slices(df)?;
            self.encoder.fit(&cats)?;
        }

        self.fitted = true;
        Ok(())
    }

    /// Applies the frozen transforms to `df`.
    ///
    /// # Errors
    ///
    /// Returns an error if not fitted or a column is missing.
    pub fn transform(&self, df: &DataFrame) -> Result<Matrix<f64>> {
        if !self.fitted {
            return Err(WeatherError::NotFitted("ColumnTransformer"));
        }

        let numeric = if self.numeric_columns.is_empty() {
            None
        } else {
            Some(self.numeric_block(df)?)
        };

        let categorical = if self.categorical_columns.is_empty() {
            None
        } else {
            let cats = self.categorical_slices(df)?;
            Some(self.encoder.transform(&cats)?)
        };

        match (numeric, categorical) {
            (Some(n), Some(c)) => n.hstack(&c),
            (Some(n), None) => Ok(n),
            (None, Some(c)) => Ok(c),
            (None, None) => Err(WeatherError::empty_input("ColumnTransformer has no columns")),
        }
    }

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<Matrix<f64>> {
        self.fit(df)?;
        self.transform(df)
    }

    /// Names of every output column, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if not fitted.
    pub fn feature_names(&self) -> Result<Vec<String>> {
        if !self.fitted {
            return Err(WeatherError::NotFitted("ColumnTransformer"));
        }

        let numeric_names = self.numeric_names();
        let mut names = match &self.poly {
            Some(poly) if !numeric_names.is_empty() => poly.feature_names(&numeric_names)?,
            _ => self.numeric_columns.clone(),
        };

        if !self.categorical_columns.is_empty() {
            let cat_names: Vec<&str> = self.categorical_columns.iter().map(String::as_str).collect();
            names.extend(self.encoder.feature_names(&cat_names)?);
        }

        Ok(names)
    }
}
