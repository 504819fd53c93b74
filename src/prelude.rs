//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use weathercast::prelude::*;
//! ```

pub use crate::data::{Column, DataFrame};
pub use crate::linear_model::{LinearRegression, Ridge, RidgeCV};
pub use crate::metrics::{mae, mse, r_squared, rmse, RegressionMetrics};
pub use crate::pipeline::{FittedPipeline, Pipeline};
pub use crate::primitives::{Matrix, Vector};
pub use crate::traits::{Estimator, Transformer};
