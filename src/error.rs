//! Error types for weathercast operations.
//!
//! Provides rich error context for library consumers.

use thiserror::Error;

/// Main error type for weathercast operations.
///
/// Covers schema problems in the input file, dimension mismatches between
/// matrices and targets, numerical failures in the solvers and invalid
/// hyperparameters.
///
/// # Examples
///
/// ```
/// use weathercast::error::WeatherError;
///
/// let err = WeatherError::DimensionMismatch {
///     expected: "100x10".to_string(),
///     actual: "100x5".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Required columns are absent from the input header.
    #[error("Schema error: missing required column(s) {}", .columns.join(", "))]
    MissingColumns {
        /// Names of every absent column
        columns: Vec<String>,
    },

    /// Matrix/vector dimensions don't match for the operation.
    #[error("Matrix dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Matrix is not positive definite, so the normal equations can't be solved.
    #[error("Singular matrix detected at pivot {pivot}, cannot solve")]
    SingularMatrix {
        /// Index of the failing pivot
        pivot: usize,
    },

    /// Invalid hyperparameter value provided.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A transformer or estimator was used before being fitted.
    #[error("{0} not fitted. Call fit() first.")]
    NotFitted(&'static str),

    /// Operation received no rows.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// CSV reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Figure rendering error.
    #[error("Plot error: {0}")]
    Plot(String),

    /// Generic error with string message.
    #[error("{0}")]
    Other(String),
}

impl From<&str> for WeatherError {
    fn from(msg: &str) -> Self {
        WeatherError::Other(msg.to_string())
    }
}

impl From<String> for WeatherError {
    fn from(msg: String) -> Self {
        WeatherError::Other(msg)
    }
}

impl WeatherError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an invalid hyperparameter error
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::EmptyInput(context.to_string())
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, WeatherError>;
