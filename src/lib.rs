//! Weathercast: temperature regression over historical weather records.
//!
//! Loads an hourly weather history CSV, derives calendar and summary
//! features, and compares an ordinary least squares baseline with a
//! degree-2 polynomial ridge regression whose penalty is chosen by 5-fold
//! cross-validation. Both are evaluated on a seeded 20% hold-out.
//!
//! # Quick Start
//!
//! ```
//! use weathercast::prelude::*;
//!
//! // Create training data (y = 2*x + 1)
//! let x = Matrix::from_vec(4, 1, vec![
//!     1.0,
//!     2.0,
//!     3.0,
//!     4.0,
//! ]).unwrap();
//! let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);
//!
//! // Train linear regression
//! let mut model = LinearRegression::new();
//! model.fit(&x, &y).unwrap();
//!
//! let r2 = model.score(&x, &y).unwrap();
//! assert!(r2 > 0.99);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`data`]: DataFrame of named numeric and categorical columns
//! - [`dataset`]: CSV loading and row cleaning
//! - [`features`]: Calendar features and summary bucketing
//! - [`model_selection`]: Train/test splitting and K-Fold cross-validation
//! - [`preprocessing`]: Scaling, polynomial expansion, one-hot encoding
//! - [`linear_model`]: OLS, ridge and cross-validated ridge
//! - [`pipeline`]: Preprocessor plus estimator chains
//! - [`metrics`]: Evaluation metrics
//! - [`report`]: Console lines and the scatter figure
//! - [`analysis`]: The end-to-end run
//! - [`config`]: Run settings

pub mod analysis;
pub mod config;
pub mod data;
pub mod dataset;
pub mod error;
pub mod features;
pub mod linear_model;
pub mod metrics;
pub mod model_selection;
pub mod pipeline;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod report;
pub mod traits;

pub use error::{Result, WeatherError};
pub use primitives::{Matrix, Vector};
pub use traits::{Estimator, Transformer};
