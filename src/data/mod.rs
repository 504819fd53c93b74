//! `DataFrame` module for named column containers.
//!
//! Provides a minimal `DataFrame` holding numeric and categorical columns
//! side by side, which is what the feature table of the weather analysis
//! looks like before encoding.

use crate::error::{Result, WeatherError};
use crate::primitives::{Matrix, Vector};

/// One named column of a [`DataFrame`].
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Real-valued column.
    Numeric(Vector<f64>),
    /// Text labels.
    Categorical(Vec<String>),
}

impl Column {
    /// Number of rows in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Categorical(v) => v.len(),
        }
    }

    /// Returns true if the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gathers the rows at `indices`, in order.
    #[must_use]
    pub fn take(&self, indices: &[usize]) -> Self {
        match self {
            Column::Numeric(v) => Column::Numeric(v.select(indices)),
            Column::Categorical(v) => {
                Column::Categorical(indices.iter().map(|&i| v[i].clone()).collect())
            }
        }
    }
}

/// A minimal `DataFrame` with named columns.
///
/// # Examples
///
/// ```
/// use weathercast::data::{Column, DataFrame};
/// use weathercast::primitives::Vector;
///
/// let columns = vec![
///     ("x".to_string(), Column::Numeric(Vector::from_slice(&[1.0, 2.0, 3.0]))),
///     ("kind".to_string(), Column::Categorical(vec!["a".into(), "b".into(), "a".into()])),
/// ];
/// let df = DataFrame::new(columns).expect("DataFrame creation should succeed with valid columns");
/// assert_eq!(df.shape(), (3, 2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    columns: Vec<(String, Column)>,
    n_rows: usize,
}

impl DataFrame {
    /// Creates a new `DataFrame` from named columns.
    ///
    /// # Errors
    ///
    /// Returns an error if columns have different lengths, a name is empty or
    /// duplicated, or no column is given.
    pub fn new(columns: Vec<(String, Column)>) -> Result<Self> {
        if columns.is_empty() {
            return Err("DataFrame must have at least one column".into());
        }

        let n_rows = columns[0].1.len();

        for (name, col) in &columns {
            if col.len() != n_rows {
                return Err(WeatherError::dimension_mismatch(
                    &format!("rows in column '{name}'"),
                    n_rows,
                    col.len(),
                ));
            }
            if name.is_empty() {
                return Err("Column names cannot be empty".into());
            }
        }

        let mut names: Vec<&str> = columns.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        if let Some(dup) = names.windows(2).find(|w| w[0] == w[1]) {
            return Err(format!("Duplicate column name '{}'", dup[0]).into());
        }

        Ok(Self { columns, n_rows })
    }

    /// Returns the shape as (`n_rows`, `n_cols`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column names.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns a reference to a column by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the column doesn't exist.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| format!("Column '{name}' not found").into())
    }

    /// Returns a numeric column by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the column doesn't exist or is categorical.
    pub fn numeric(&self, name: &str) -> Result<&Vector<f64>> {
        match self.column(name)? {
            Column::Numeric(v) => Ok(v),
            Column::Categorical(_) => Err(format!("Column '{name}' is not numeric").into()),
        }
    }

    /// Returns a categorical column by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the column doesn't exist or is numeric.
    pub fn categorical(&self, name: &str) -> Result<&[String]> {
        match self.column(name)? {
            Column::Categorical(v) => Ok(v),
            Column::Numeric(_) => Err(format!("Column '{name}' is not categorical").into()),
        }
    }

    /// Gathers the rows at `indices` into a new `DataFrame`.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    #[must_use]
    pub fn take(&self, indices: &[usize]) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .map(|(n, c)| (n.clone(), c.take(indices)))
                .collect(),
            n_rows: indices.len(),
        }
    }

    /// Stacks the named numeric columns into a row-major matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if any column is missing or categorical.
    pub fn numeric_matrix(&self, names: &[&str]) -> Result<Matrix<f64>> {
        let cols = names
            .iter()
            .map(|&n| self.numeric(n))
            .collect::<Result<Vec<_>>>()?;

        let mut data = Vec::with_capacity(self.n_rows * cols.len());
        for row_idx in 0..self.n_rows {
            for col in &cols {
                data.push(col[row_idx]);
            }
        }

        Matrix::from_vec(self.n_rows, cols.len(), data)
    }

    /// Returns descriptive statistics for all numeric columns.
    #[must_use]
    pub fn describe(&self) -> Vec<ColumnStats> {
        self.columns
            .iter()
            .filter_map(|(name, col)| match col {
                Column::Numeric(v) => Some((name, v)),
                Column::Categorical(_) => None,
            })
            .map(|(name, col)| {
                let mut sorted: Vec<f64> = col.as_slice().to_vec();
                sorted.sort_by(f64::total_cmp);

                let median = if sorted.is_empty() {
                    0.0
                } else if sorted.len() % 2 == 0 {
                    (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
                } else {
                    sorted[sorted.len() / 2]
                };

                ColumnStats {
                    name: name.clone(),
                    count: col.len(),
                    mean: col.mean(),
                    std: col.variance().sqrt(),
                    min: sorted.first().copied().unwrap_or(0.0),
                    median,
                    max: sorted.last().copied().unwrap_or(0.0),
                }
            })
            .collect()
    }
}

/// Descriptive statistics for a numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    /// Column name.
    pub name: String,
    /// Number of elements.
    pub count: usize,
    /// Mean value.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    /// Minimum value.
    pub min: f64,
    /// Median value.
    pub median: f64,
    /// Maximum value.
    pub max: f64,
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
