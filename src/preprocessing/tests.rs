//! Tests for preprocessing module.

use super::*;
use crate::data::{Column, DataFrame};
use crate::primitives::Vector;

fn column(m: &Matrix<f64>, j: usize) -> Vector<f64> {
    (0..m.n_rows()).map(|i| m.get(i, j)).collect()
}

fn zeros(rows: usize, cols: usize) -> Matrix<f64> {
    Matrix::from_vec(rows, cols, vec![0.0; rows * cols]).expect("valid matrix dimensions")
}

#[test]
fn test_new() {
    let scaler = StandardScaler::new();
    assert!(!scaler.is_fitted());
    assert!(scaler.mean().is_none());
}

#[test]
fn test_fit_basic() {
    let data = Matrix::from_vec(3, 2, vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0])
        .expect("valid matrix dimensions");

    let mut scaler = StandardScaler::new();
    scaler
        .fit(&data)
        .expect("fit should succeed with valid data");

    assert!(scaler.is_fitted());

    let mean = scaler.mean().expect("fitted");
    assert!((mean[0] - 2.0).abs() < 1e-12);
    assert!((mean[1] - 20.0).abs() < 1e-12);

    // Population std: sqrt(2/3)
    let std = scaler.std().expect("fitted");
    let expected_std = (2.0_f64 / 3.0).sqrt();
    assert!((std[0] - expected_std).abs() < 1e-12);
    assert!((std[1] - expected_std * 10.0).abs() < 1e-10);
}

#[test]
fn test_transform_zero_mean_unit_variance() {
    let data = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 10.0]).expect("valid matrix dimensions");

    let mut scaler = StandardScaler::new();
    let transformed = scaler
        .fit_transform(&data)
        .expect("fit_transform should succeed");

    let col = column(&transformed, 0);
    assert!(col.mean().abs() < 1e-12, "Mean should be ~0");
    assert!((col.variance() - 1.0).abs() < 1e-12, "Variance should be ~1");
}

#[test]
fn test_constant_column_is_centered_not_scaled() {
    let data = Matrix::from_vec(3, 2, vec![5.0, 1.0, 5.0, 2.0, 5.0, 3.0])
        .expect("valid matrix dimensions");

    let mut scaler = StandardScaler::new();
    let transformed = scaler
        .fit_transform(&data)
        .expect("fit_transform should succeed");

    for i in 0..3 {
        assert_eq!(transformed.get(i, 0), 0.0);
        assert!(transformed.get(i, 0).is_finite());
    }
}

#[test]
fn test_transform_uses_frozen_statistics() {
    let train = Matrix::from_vec(2, 1, vec![0.0, 2.0]).expect("valid matrix dimensions");
    let test = Matrix::from_vec(1, 1, vec![4.0]).expect("valid matrix dimensions");

    let mut scaler = StandardScaler::new();
    scaler.fit(&train).expect("fit should succeed");

    // mean 1, std 1
    let out = scaler.transform(&test).expect("transform should succeed");
    assert!((out.get(0, 0) - 3.0).abs() < 1e-12);
}

#[test]
fn test_scaler_errors() {
    let scaler = StandardScaler::new();
    let data = Matrix::from_vec(1, 1, vec![1.0]).expect("valid matrix dimensions");
    assert!(scaler.transform(&data).is_err());

    let mut scaler = StandardScaler::new();
    let empty = Matrix::from_vec(0, 2, vec![]).expect("valid matrix dimensions");
    assert!(scaler.fit(&empty).is_err());

    let mut scaler = StandardScaler::new();
    scaler.fit(&data).expect("fit should succeed");
    let wide = Matrix::from_vec(1, 2, vec![1.0, 2.0]).expect("valid matrix dimensions");
    assert!(scaler.transform(&wide).is_err());
}

#[test]
fn test_polynomial_degree_two_order() {
    let x = Matrix::from_vec(1, 3, vec![2.0, 3.0, 5.0]).expect("valid matrix dimensions");
    let mut poly = PolynomialFeatures::new(2);
    let out = poly.fit_transform(&x).expect("fit_transform should succeed");

    // a, b, c, a², ab, ac, b², bc, c²
    assert_eq!(
        out.as_slice(),
        &[2.0, 3.0, 5.0, 4.0, 6.0, 10.0, 9.0, 15.0, 25.0]
    );
}

#[test]
fn test_polynomial_output_count() {
    for n in 1..=11 {
        let x = zeros(2, n);
        let mut poly = PolynomialFeatures::new(2);
        poly.fit(&x).expect("fit should succeed");
        assert_eq!(poly.n_output_features(), Some(n * (n + 3) / 2));
    }
    // 11 numeric features expand to 77 columns
    let mut poly = PolynomialFeatures::new(2);
    poly.fit(&zeros(1, 11)).expect("fit should succeed");
    assert_eq!(poly.n_output_features(), Some(77));
}

#[test]
fn test_polynomial_degree_three() {
    let x = Matrix::from_vec(1, 2, vec![2.0, 3.0]).expect("valid matrix dimensions");
    let mut poly = PolynomialFeatures::new(3);
    let out = poly.fit_transform(&x).expect("fit_transform should succeed");
    // a, b, a², ab, b², a³, a²b, ab², b³
    assert_eq!(
        out.as_slice(),
        &[2.0, 3.0, 4.0, 6.0, 9.0, 8.0, 12.0, 18.0, 27.0]
    );
}

#[test]
fn test_polynomial_feature_names() {
    let x = zeros(1, 2);
    let mut poly = PolynomialFeatures::new(2);
    poly.fit(&x).expect("fit should succeed");
    let names = poly.feature_names(&["a", "b"]).expect("fitted");
    assert_eq!(names, vec!["a", "b", "a^2", "a b", "b^2"]);
}

#[test]
fn test_polynomial_errors() {
    let x = zeros(1, 2);
    let mut poly = PolynomialFeatures::new(0);
    assert!(poly.fit(&x).is_err());

    let poly = PolynomialFeatures::new(2);
    assert!(poly.transform(&x).is_err());

    let mut poly = PolynomialFeatures::new(2);
    poly.fit(&x).expect("fit should succeed");
    assert!(poly.transform(&zeros(1, 3)).is_err());
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_one_hot_sorted_vocabulary() {
    let col = strings(&["snow", "rain", "snow", "clear"]);
    let mut encoder = OneHotEncoder::new();
    encoder.fit(&[col.as_slice()]).expect("fit should succeed");

    let categories = encoder.categories().expect("fitted");
    assert_eq!(categories[0], strings(&["clear", "rain", "snow"]));

    let out = encoder.transform(&[col.as_slice()]).expect("transform should succeed");
    assert_eq!(out.shape(), (4, 3));
    assert_eq!(out.row_slice(0), &[0.0, 0.0, 1.0]);
    assert_eq!(out.row_slice(3), &[1.0, 0.0, 0.0]);
}

#[test]
fn test_one_hot_unknown_encodes_to_zeros() {
    let train_a = strings(&["x", "y"]);
    let train_b = strings(&["p", "p"]);
    let mut encoder = OneHotEncoder::new();
    encoder
        .fit(&[train_a.as_slice(), train_b.as_slice()])
        .expect("fit should succeed");
    assert_eq!(encoder.n_output_features(), Some(3));

    let test_a = strings(&["z"]);
    let test_b = strings(&["p"]);
    let out = encoder
        .transform(&[test_a.as_slice(), test_b.as_slice()])
        .expect("unknown categories must not fail");
    assert_eq!(out.as_slice(), &[0.0, 0.0, 1.0]);
}

#[test]
fn test_one_hot_feature_names_and_errors() {
    let col = strings(&["b", "a"]);
    let mut encoder = OneHotEncoder::new();
    assert!(encoder.transform(&[col.as_slice()]).is_err());

    encoder.fit(&[col.as_slice()]).expect("fit should succeed");
    assert_eq!(
        encoder.feature_names(&["kind"]).expect("fitted"),
        vec!["kind=a", "kind=b"]
    );
    assert!(encoder.feature_names(&["kind", "extra"]).is_err());

    let empty: Vec<String> = Vec::new();
    let mut encoder = OneHotEncoder::new();
    assert!(encoder.fit(&[empty.as_slice()]).is_err());
}

fn mixed_frame(x: &[f64], kind: &[&str]) -> DataFrame {
    DataFrame::new(vec![
        ("x".to_string(), Column::Numeric(Vector::from_slice(x))),
        (
            "z".to_string(),
            Column::Numeric(Vector::from_slice(
                &x.iter().map(|v| v * 2.0 + 1.0).collect::<Vec<_>>(),
            )),
        ),
        ("kind".to_string(), Column::Categorical(strings(kind))),
    ])
    .expect("valid frame")
}

#[test]
fn test_column_transformer_plain_layout() {
    let df = mixed_frame(&[1.0, 2.0, 3.0], &["a", "b", "a"]);
    let mut pre = ColumnTransformer::plain(&["x", "z"], &["kind"]);
    let out = pre.fit_transform(&df).expect("fit_transform should succeed");

    assert_eq!(out.shape(), (3, 4));
    assert_eq!(pre.n_output_features(), Some(4));
    assert_eq!(
        pre.feature_names().expect("fitted"),
        vec!["x", "z", "kind=a", "kind=b"]
    );
    // one-hot block is the last two columns
    assert_eq!(&out.row_slice(1)[2..], &[0.0, 1.0]);
    assert!(column(&out, 0).mean().abs() < 1e-12);
}

#[test]
fn test_column_transformer_polynomial_layout() {
    let df = mixed_frame(&[1.0, 2.0, 3.0, 4.0], &["a", "b", "c", "a"]);
    let mut pre = ColumnTransformer::polynomial(&["x", "z"], &["kind"], 2);
    let out = pre.fit_transform(&df).expect("fit_transform should succeed");

    // 2 numeric -> 5 polynomial terms, plus 3 indicators
    assert_eq!(out.shape(), (4, 8));
    assert_eq!(pre.n_numeric_outputs(), Some(5));
    let names = pre.feature_names().expect("fitted");
    assert_eq!(names[..5], ["x", "z", "x^2", "x z", "z^2"]);
    assert_eq!(names[5..], ["kind=a", "kind=b", "kind=c"]);

    // squares are built from scaled values
    let row = out.row_slice(0);
    assert!((row[2] - row[0] * row[0]).abs() < 1e-12);
}

#[test]
fn test_column_transformer_frozen_after_fit() {
    let train = mixed_frame(&[0.0, 2.0], &["a", "b"]);
    let test = mixed_frame(&[4.0], &["unseen"]);

    let mut pre = ColumnTransformer::plain(&["x"], &["kind"]);
    pre.fit(&train).expect("fit should succeed");
    let out = pre.transform(&test).expect("transform should succeed");

    assert_eq!(out.shape(), (1, 3));
    // x: mean 1, std 1 learned on train
    assert!((out.get(0, 0) - 3.0).abs() < 1e-12);
    assert_eq!(&out.row_slice(0)[1..], &[0.0, 0.0]);
}

#[test]
fn test_column_transformer_errors() {
    let df = mixed_frame(&[1.0, 2.0], &["a", "b"]);
    let pre = ColumnTransformer::plain(&["x"], &["kind"]);
    assert!(pre.transform(&df).is_err());
    assert!(pre.feature_names().is_err());
    assert!(pre.n_output_features().is_none());

    let mut missing = ColumnTransformer::plain(&["nope"], &["kind"]);
    assert!(missing.fit(&df).is_err());

    let mut wrong_type = ColumnTransformer::plain(&["kind"], &[]);
    assert!(wrong_type.fit(&df).is_err());

    let mut empty = ColumnTransformer::plain(&[], &[]);
    assert!(empty.fit(&df).is_err());
}
