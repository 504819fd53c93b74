use super::*;
use crate::primitives::Vector;

#[test]
fn test_r2_perfect() {
    let y = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let r2 = r_squared(&y, &y);
    assert!((r2 - 1.0).abs() < 1e-12, "R²={r2} for perfect predictions");
}

#[test]
fn test_r2_upper_bound() {
    let y_true = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let y_pred = Vector::from_slice(&[1.1, 2.2, 2.8, 4.1, 4.9]);
    assert!(r_squared(&y_pred, &y_true) <= 1.0);
}

#[test]
fn test_r2_negative_for_bad_predictions() {
    let y_true = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let y_pred = Vector::from_slice(&[10.0, 20.0, 30.0, 40.0, 50.0]);
    assert!(r_squared(&y_pred, &y_true) < 0.0);
}

#[test]
fn test_r2_mean_prediction_is_zero() {
    let y_true = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let y_pred = Vector::from_slice(&[2.0, 2.0, 2.0]);
    assert!(r_squared(&y_pred, &y_true).abs() < 1e-12);
}

#[test]
fn test_r2_constant_target() {
    let y_true = Vector::from_slice(&[4.0, 4.0, 4.0]);
    assert_eq!(r_squared(&y_true, &y_true), 1.0);
    let off = Vector::from_slice(&[4.0, 5.0, 4.0]);
    assert_eq!(r_squared(&off, &y_true), 0.0);
}

#[test]
fn test_r2_known_value() {
    // textbook example: 0.948...
    let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
    let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
    let r2 = r_squared(&y_pred, &y_true);
    assert!((r2 - 0.948_608_137_044_967_9).abs() < 1e-12);
}

#[test]
fn test_mse_mae_rmse() {
    let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
    let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
    assert!((mse(&y_pred, &y_true) - 0.375).abs() < 1e-12);
    assert!((mae(&y_pred, &y_true) - 0.5).abs() < 1e-12);
    assert!((rmse(&y_pred, &y_true) - 0.375_f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_mse_zero_for_perfect() {
    let y = Vector::from_slice(&[1.5, -2.0]);
    assert_eq!(mse(&y, &y), 0.0);
}

#[test]
#[should_panic(expected = "Vectors must have same length")]
fn test_mse_length_mismatch_panics() {
    let a = Vector::from_slice(&[1.0, 2.0]);
    let b = Vector::from_slice(&[1.0]);
    let _ = mse(&a, &b);
}

#[test]
fn test_regression_metrics_compute() {
    let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
    let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
    let m = RegressionMetrics::compute(&y_pred, &y_true);
    assert!((m.mse - 0.375).abs() < 1e-12);
    assert!((m.rmse() - 0.375_f64.sqrt()).abs() < 1e-12);
    assert!(m.r2 > 0.94);
}
