//! Polynomial feature expansion.

use crate::error::{Result, WeatherError};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// Generates polynomial and interaction terms up to a given degree.
///
/// No bias column is produced. Terms are ordered by degree, and within a
/// degree by the lexicographic order of their (non-decreasing) input index
/// tuples. For degree 2 and inputs `[a, b]` the output is
/// `[a, b, a², ab, b²]`; in general `n` inputs expand to `n(n+3)/2` columns.
///
/// # Example
///
/// ```
/// use weathercast::prelude::*;
/// use weathercast::preprocessing::PolynomialFeatures;
///
/// let x = Matrix::from_vec(1, 2, vec![2.0, 3.0]).expect("1x2");
/// let mut poly = PolynomialFeatures::new(2);
/// let out = poly.fit_transform(&x).expect("fit_transform should succeed");
/// assert_eq!(out.as_slice(), &[2.0, 3.0, 4.0, 6.0, 9.0]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolynomialFeatures {
    degree: usize,
    /// Input column indices multiplied together for each output term.
    terms: Option<Vec<Vec<usize>>>,
    n_input_features: usize,
}

impl PolynomialFeatures {
    /// Creates an expansion of the given degree.
    #[must_use]
    pub fn new(degree: usize) -> Self {
        Self {
            degree,
            terms: None,
            n_input_features: 0,
        }
    }

    /// Returns the configured degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the learned term list, if fitted.
    #[must_use]
    pub fn terms(&self) -> Option<&[Vec<usize>]> {
        self.terms.as_deref()
    }

    /// Number of output columns, if fitted.
    #[must_use]
    pub fn n_output_features(&self) -> Option<usize> {
        self.terms.as_ref().map(Vec::len)
    }

    /// Names the output columns by joining input names, `a^2` for squares
    /// and `a b` for cross terms.
    ///
    /// # Errors
    ///
    /// Returns an error if not fitted or `input_names` has the wrong length.
    pub fn feature_names(&self, input_names: &[&str]) -> Result<Vec<String>> {
        let terms = self
            .terms
            .as_ref()
            .ok_or(WeatherError::NotFitted("PolynomialFeatures"))?;
        if input_names.len() != self.n_input_features {
            return Err(WeatherError::dimension_mismatch(
                "input names",
                self.n_input_features,
                input_names.len(),
            ));
        }

        Ok(terms
            .iter()
            .map(|term| {
                let mut parts: Vec<String> = Vec::new();
                let mut k = 0;
                while k < term.len() {
                    let idx = term[k];
                    let power = term[k..].iter().take_while(|&&t| t == idx).count();
                    parts.push(if power == 1 {
                        input_names[idx].to_string()
                    } else {
                        format!("{}^{power}", input_names[idx])
                    });
                    k += power;
                }
                parts.join(" ")
            })
            .collect())
    }
}

/// All non-decreasing index tuples of length `len` over `0..n`, in
/// lexicographic order.
fn combinations_with_replacement(n: usize, len: usize) -> Vec<Vec<usize>> {
    fn extend(
        n: usize,
        len: usize,
        start: usize,
        current: &mut Vec<usize>,
        out: &mut Vec<Vec<usize>>,
    ) {
        if current.len() == len {
            out.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            extend(n, len, i, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    extend(n, len, 0, &mut Vec::with_capacity(len), &mut out);
    out
}

impl Transformer for PolynomialFeatures {
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        if self.degree == 0 {
            return Err(WeatherError::invalid_hyperparameter(
                "degree",
                self.degree,
                ">= 1",
            ));
        }
        let n = x.n_cols();
        if n == 0 {
            return Err(WeatherError::empty_input("PolynomialFeatures::fit (no columns)"));
        }

        let terms = (1..=self.degree)
            .flat_map(|d| combinations_with_replacement(n, d))
            .collect();

        self.terms = Some(terms);
        self.n_input_features = n;
        Ok(())
    }

    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let terms = self
            .terms
            .as_ref()
            .ok_or(WeatherError::NotFitted("PolynomialFeatures"))?;

        let (n_samples, n_features) = x.shape();
        if n_features != self.n_input_features {
            return Err(WeatherError::dimension_mismatch(
                "n_features",
                self.n_input_features,
                n_features,
            ));
        }

        let mut data = Vec::with_capacity(n_samples * terms.len());
        for i in 0..n_samples {
            let row = x.row_slice(i);
            data.extend(terms.iter().map(|term| term.iter().map(|&j| row[j]).product::<f64>()));
        }

        Matrix::from_vec(n_samples, terms.len(), data)
    }
}
