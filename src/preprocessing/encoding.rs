//! One-hot encoding of categorical columns.

use crate::error::{Result, WeatherError};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// Encodes categorical columns as binary indicator vectors.
///
/// Each input column contributes one output column per distinct training
/// value, sorted lexicographically. Values never seen during `fit` encode to
/// all zeros in their block instead of raising an error.
///
/// # Example
///
/// ```
/// use weathercast::preprocessing::OneHotEncoder;
///
/// let train = vec!["rain".to_string(), "snow".to_string(), "rain".to_string()];
/// let mut encoder = OneHotEncoder::new();
/// encoder.fit(&[train.as_slice()]).expect("fit should succeed");
///
/// let test = vec!["snow".to_string(), "hail".to_string()];
/// let encoded = encoder.transform(&[test.as_slice()]).expect("transform should succeed");
/// assert_eq!(encoded.as_slice(), &[0.0, 1.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// Sorted vocabulary of each input column.
    categories: Option<Vec<Vec<String>>>,
}

impl OneHotEncoder {
    /// Creates an unfitted encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the learned vocabulary of each column, if fitted.
    #[must_use]
    pub fn categories(&self) -> Option<&[Vec<String>]> {
        self.categories.as_deref()
    }

    /// Returns true if the encoder has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.categories.is_some()
    }

    /// Total number of indicator columns, if fitted.
    #[must_use]
    pub fn n_output_features(&self) -> Option<usize> {
        self.categories
            .as_ref()
            .map(|c| c.iter().map(Vec::len).sum())
    }

    /// Learns the sorted distinct values of every column.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows or the columns differ in length.
    pub fn fit(&mut self, columns: &[&[String]]) -> Result<()> {
        let n_rows = check_columns(columns)?;
        if n_rows == 0 {
            return Err(WeatherError::empty_input("OneHotEncoder::fit"));
        }

        let categories = columns
            .iter()
            .map(|col| {
                let mut values: Vec<String> = col.to_vec();
                values.sort_unstable();
                values.dedup();
                values
            })
            .collect();

        self.categories = Some(categories);
        Ok(())
    }

    /// Encodes the columns with the frozen vocabulary.
    ///
    /// # Errors
    ///
    /// Returns an error if not fitted, the column count differs from fit, or
    /// the columns differ in length.
    pub fn transform(&self, columns: &[&[String]]) -> Result<Matrix<f64>> {
        let categories = self
            .categories
            .as_ref()
            .ok_or(WeatherError::NotFitted("OneHotEncoder"))?;
        if columns.len() != categories.len() {
            return Err(WeatherError::dimension_mismatch(
                "categorical columns",
                categories.len(),
                columns.len(),
            ));
        }
        let n_rows = check_columns(columns)?;

        let width: usize = categories.iter().map(Vec::len).sum();
        let mut data = vec![0.0; n_rows * width];

        let mut offset = 0;
        for (col, vocab) in columns.iter().zip(categories) {
            for (i, value) in col.iter().enumerate() {
                if let Ok(pos) = vocab.binary_search(value) {
                    data[i * width + offset + pos] = 1.0;
                }
            }
            offset += vocab.len();
        }

        Matrix::from_vec(n_rows, width, data)
    }

    /// Names the output columns `column=value`.
    ///
    /// # Errors
    ///
    /// Returns an error if not fitted or `input_names` has the wrong length.
    pub fn feature_names(&self, input_names: &[&str]) -> Result<Vec<String>> {
        let categories = self
            .categories
            .as_ref()
            .ok_or(WeatherError::NotFitted("OneHotEncoder"))?;
        if input_names.len() != categories.len() {
            return Err(WeatherError::dimension_mismatch(
                "input names",
                categories.len(),
                input_names.len(),
            ));
        }

        Ok(input_names
            .iter()
            .zip(categories)
            .flat_map(|(name, vocab)| vocab.iter().map(move |v| format!("{name}={v}")))
            .collect())
    }
}

/// Returns the shared row count of `columns`.
fn check_columns(columns: &[&[String]]) -> Result<usize> {
    let n_rows = columns.first().map_or(0, |c| c.len());
    if let Some(bad) = columns.iter().find(|c| c.len() != n_rows) {
        return Err(WeatherError::dimension_mismatch(
            "column length",
            n_rows,
            bad.len(),
        ));
    }
    Ok(n_rows)
}
