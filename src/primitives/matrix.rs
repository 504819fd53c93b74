//! Matrix type for 2D numeric data.

use super::Vector;
use crate::error::{Result, WeatherError};
use serde::{Deserialize, Serialize};

/// A 2D matrix of values (row-major storage).
///
/// # Examples
///
/// ```
/// use weathercast::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("data length matches rows * cols");
/// assert_eq!(m.shape(), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a vector of data.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(WeatherError::dimension_mismatch(
                "rows * cols",
                rows * cols,
                data.len(),
            ));
        }
        Ok(Self { data, rows, cols })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns a row as a slice.
    #[must_use]
    pub fn row_slice(&self, row_idx: usize) -> &[T] {
        let start = row_idx * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Gathers the rows at `indices`, in order.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    #[must_use]
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &idx in indices {
            data.extend_from_slice(self.row_slice(idx));
        }
        Self {
            data,
            rows: indices.len(),
            cols: self.cols,
        }
    }

    /// Concatenates `other` to the right of `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if row counts differ.
    pub fn hstack(&self, other: &Self) -> Result<Self> {
        if self.rows != other.rows {
            return Err(WeatherError::dimension_mismatch(
                "rows",
                self.rows,
                other.rows,
            ));
        }
        let cols = self.cols + other.cols;
        let mut data = Vec::with_capacity(self.rows * cols);
        for i in 0..self.rows {
            data.extend_from_slice(self.row_slice(i));
            data.extend_from_slice(other.row_slice(i));
        }
        Ok(Self {
            data,
            rows: self.rows,
            cols,
        })
    }
}

impl Matrix<f64> {
    /// Matrix-vector multiplication.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions don't match.
    pub fn matvec(&self, vec: &Vector<f64>) -> Result<Vector<f64>> {
        if self.cols != vec.len() {
            return Err(WeatherError::dimension_mismatch(
                "vector length",
                self.cols,
                vec.len(),
            ));
        }

        Ok((0..self.rows)
            .map(|i| {
                self.row_slice(i)
                    .iter()
                    .zip(vec.as_slice())
                    .map(|(a, b)| a * b)
                    .sum()
            })
            .collect())
    }

    /// Computes `X^T v` without materializing the transpose.
    ///
    /// # Errors
    ///
    /// Returns an error if `v` doesn't have one entry per row.
    pub fn tmatvec(&self, vec: &Vector<f64>) -> Result<Vector<f64>> {
        if self.rows != vec.len() {
            return Err(WeatherError::dimension_mismatch(
                "vector length",
                self.rows,
                vec.len(),
            ));
        }

        let mut out = vec![0.0; self.cols];
        for (i, &v) in vec.iter().enumerate() {
            for (o, &x) in out.iter_mut().zip(self.row_slice(i)) {
                *o += x * v;
            }
        }
        Ok(Vector::from_vec(out))
    }

    /// Computes the Gram matrix `X^T X`.
    ///
    /// Accumulates the upper triangle row by row and mirrors it, skipping
    /// zero entries (one-hot blocks are mostly zeros).
    #[must_use]
    pub fn gram(&self) -> Self {
        let p = self.cols;
        let mut g = vec![0.0; p * p];
        for r in 0..self.rows {
            let row = self.row_slice(r);
            for i in 0..p {
                let xi = row[i];
                if xi == 0.0 {
                    continue;
                }
                for j in i..p {
                    g[i * p + j] += xi * row[j];
                }
            }
        }
        for i in 0..p {
            for j in 0..i {
                g[i * p + j] = g[j * p + i];
            }
        }
        Self {
            data: g,
            rows: p,
            cols: p,
        }
    }

    /// Subtracts another matrix element-wise.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions don't match.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(WeatherError::DimensionMismatch {
                expected: format!("{}x{}", self.rows, self.cols),
                actual: format!("{}x{}", other.rows, other.cols),
            });
        }

        let data: Vec<f64> = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| a - b)
            .collect();

        Ok(Self {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }

    fn check_square_system(&self, b: &Vector<f64>) -> Result<()> {
        if self.rows != self.cols {
            return Err(WeatherError::DimensionMismatch {
                expected: "square matrix".to_string(),
                actual: format!("{}x{}", self.rows, self.cols),
            });
        }
        if self.rows != b.len() {
            return Err(WeatherError::dimension_mismatch(
                "vector length",
                self.rows,
                b.len(),
            ));
        }
        Ok(())
    }

    /// Solves the linear system Ax = b using Cholesky decomposition.
    ///
    /// The matrix must be symmetric positive definite.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square or not positive definite.
    pub fn cholesky_solve(&self, b: &Vector<f64>) -> Result<Vector<f64>> {
        self.check_square_system(b)?;
        let n = self.rows;

        // Cholesky decomposition: A = L * L^T
        let mut l = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                let mut sum = 0.0;

                if i == j {
                    for k in 0..j {
                        sum += l[j * n + k] * l[j * n + k];
                    }
                    let diag = self.get(j, j) - sum;
                    if diag <= 0.0 {
                        return Err(WeatherError::SingularMatrix { pivot: j });
                    }
                    l[j * n + j] = diag.sqrt();
                } else {
                    for k in 0..j {
                        sum += l[i * n + k] * l[j * n + k];
                    }
                    l[i * n + j] = (self.get(i, j) - sum) / l[j * n + j];
                }
            }
        }

        let keep = vec![true; n];
        Ok(triangular_solve(&l, &keep, b))
    }

    /// Solves the symmetric positive semi-definite system Ax = b.
    ///
    /// Runs a column-wise Cholesky factorization; a pivot whose remaining
    /// diagonal falls below `rel_tol * A[j][j]` marks column `j` as a linear
    /// combination of the earlier columns. Such columns are excluded from the
    /// factorization and receive a zero coefficient. For normal equations this
    /// yields a least-squares solution with the same fitted values as the
    /// minimum-norm one.
    ///
    /// Returns the solution and the indices of the dropped columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square or `b` has the wrong length.
    pub fn cholesky_solve_semidefinite(
        &self,
        b: &Vector<f64>,
        rel_tol: f64,
    ) -> Result<(Vector<f64>, Vec<usize>)> {
        self.check_square_system(b)?;
        let n = self.rows;

        let mut l = vec![0.0; n * n];
        let mut keep = vec![true; n];

        for j in 0..n {
            let a_jj = self.get(j, j);
            let sum: f64 = (0..j).map(|k| l[j * n + k] * l[j * n + k]).sum();
            let diag = a_jj - sum;
            if a_jj <= 0.0 || diag <= rel_tol * a_jj {
                keep[j] = false;
                continue;
            }
            let l_jj = diag.sqrt();
            l[j * n + j] = l_jj;
            for i in (j + 1)..n {
                let sum: f64 = (0..j).map(|k| l[i * n + k] * l[j * n + k]).sum();
                l[i * n + j] = (self.get(i, j) - sum) / l_jj;
            }
        }

        let dropped = (0..n).filter(|&j| !keep[j]).collect();
        Ok((triangular_solve(&l, &keep, b), dropped))
    }
}

/// Forward then backward substitution with a lower-triangular factor,
/// skipping columns that are not kept.
fn triangular_solve(l: &[f64], keep: &[bool], b: &Vector<f64>) -> Vector<f64> {
    let n = keep.len();

    // Forward substitution: L * y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        if !keep[i] {
            continue;
        }
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[i * n + j] * y[j];
        }
        y[i] = (b[i] - sum) / l[i * n + i];
    }

    // Backward substitution: L^T * x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        if !keep[i] {
            continue;
        }
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[j * n + i] * x[j];
        }
        x[i] = (y[i] - sum) / l[i * n + i];
    }

    Vector::from_vec(x)
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
