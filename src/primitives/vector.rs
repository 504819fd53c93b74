//! Vector type for 1D numeric data.

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A 1D vector of values.
///
/// # Examples
///
/// ```
/// use weathercast::primitives::Vector;
///
/// let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
/// assert_eq!(v.len(), 3);
/// assert!((v.mean() - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Copy> Vector<T> {
    /// Creates a vector by copying a slice.
    #[must_use]
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Creates a vector that takes ownership of `data`.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the vector has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Returns the sub-vector `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self::from_slice(&self.data[start..end])
    }

    /// Gathers the elements at `indices`, in order.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    #[must_use]
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            data: indices.iter().map(|&i| self.data[i]).collect(),
        }
    }
}

impl Vector<f64> {
    /// Sum of all elements.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Arithmetic mean (0.0 for an empty vector).
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.sum() / self.data.len() as f64
    }

    /// Population variance (0.0 for an empty vector).
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        self.data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / self.data.len() as f64
    }

    /// Adds a scalar to every element.
    #[must_use]
    pub fn add_scalar(&self, scalar: f64) -> Self {
        Self {
            data: self.data.iter().map(|x| x + scalar).collect(),
        }
    }

    /// Smallest element, or `None` if empty or any element is NaN.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .try_fold(f64::INFINITY, |acc, x| (!x.is_nan()).then(|| acc.min(x)))
            .filter(|_| !self.data.is_empty())
    }

    /// Largest element, or `None` if empty or any element is NaN.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .try_fold(f64::NEG_INFINITY, |acc, x| (!x.is_nan()).then(|| acc.max(x)))
            .filter(|_| !self.data.is_empty())
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &T {
        &self.data[idx]
    }
}

impl<T: Copy> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let v = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        assert!((v.mean() - 2.5).abs() < 1e-12);
        // population variance: (2.25 + 0.25 + 0.25 + 2.25) / 4
        assert!((v.variance() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_stats() {
        let v: Vector<f64> = Vector::from_vec(vec![]);
        assert!(v.is_empty());
        assert_eq!(v.mean(), 0.0);
        assert_eq!(v.variance(), 0.0);
        assert_eq!(v.min(), None);
        assert_eq!(v.max(), None);
    }

    #[test]
    fn test_select_preserves_order() {
        let v = Vector::from_slice(&[10.0, 20.0, 30.0, 40.0]);
        let picked = v.select(&[3, 0, 2]);
        assert_eq!(picked.as_slice(), &[40.0, 10.0, 30.0]);
    }

    #[test]
    fn test_min_max() {
        let v = Vector::from_slice(&[2.0, -7.5, 9.0]);
        assert_eq!(v.min(), Some(-7.5));
        assert_eq!(v.max(), Some(9.0));

        let with_nan = Vector::from_slice(&[1.0, f64::NAN]);
        assert_eq!(with_nan.min(), None);
    }

    #[test]
    fn test_slice_and_add_scalar() {
        let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let s = v.slice(1, 3).add_scalar(1.0);
        assert_eq!(s.as_slice(), &[3.0, 4.0]);
    }

    #[test]
    fn test_collect() {
        let v: Vector<f64> = (0..3).map(f64::from).collect();
        assert_eq!(v.as_slice(), &[0.0, 1.0, 2.0]);
    }
}
