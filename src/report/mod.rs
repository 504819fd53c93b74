//! Console summary lines and the actual-vs-predicted scatter figure.

use crate::error::{Result, WeatherError};
use crate::metrics::RegressionMetrics;
use crate::primitives::Vector;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

/// Figure title.
pub const PLOT_TITLE: &str = "Polynomial (degree=2) + Ridge: Actual vs Predicted Temperature";
/// Horizontal axis label.
pub const X_LABEL: &str = "Actual Temperature (C)";
/// Vertical axis label.
pub const Y_LABEL: &str = "Predicted Temperature (C)";
/// Figure size in pixels.
pub const PLOT_SIZE: (u32, u32) = (800, 800);

/// `Baseline Linear MSE: …, R2: …` with four decimals.
///
/// ```
/// use weathercast::metrics::RegressionMetrics;
/// use weathercast::report::baseline_line;
///
/// let m = RegressionMetrics { mse: 12.345678, r2: 0.87654, mae: 2.0 };
/// assert_eq!(baseline_line(&m), "Baseline Linear MSE: 12.3457, R2: 0.8765");
/// ```
#[must_use]
pub fn baseline_line(metrics: &RegressionMetrics) -> String {
    format!(
        "Baseline Linear MSE: {:.4}, R2: {:.4}",
        metrics.mse, metrics.r2
    )
}

/// `Poly Ridge MSE: …, R2: …, chosen alpha: …`; the alpha has six decimals.
#[must_use]
pub fn ridge_line(metrics: &RegressionMetrics, alpha: f64) -> String {
    format!(
        "Poly Ridge MSE: {:.4}, R2: {:.4}, chosen alpha: {:.6}",
        metrics.mse, metrics.r2, alpha
    )
}

/// Smallest and largest value over both series combined.
///
/// A degenerate range is widened by 0.5 on each side so the axes stay
/// drawable.
///
/// # Errors
///
/// Returns an error if either series is empty or contains NaN.
pub fn axis_range(actual: &Vector<f64>, predicted: &Vector<f64>) -> Result<(f64, f64)> {
    let bounds = |v: &Vector<f64>| v.min().zip(v.max());
    let ((a_min, a_max), (p_min, p_max)) = bounds(actual)
        .zip(bounds(predicted))
        .ok_or_else(|| WeatherError::Plot("empty or NaN series".into()))?;

    let lo = a_min.min(p_min);
    let hi = a_max.max(p_max);
    if hi > lo {
        Ok((lo, hi))
    } else {
        Ok((lo - 0.5, hi + 0.5))
    }
}

fn plot_error(err: impl std::fmt::Display) -> WeatherError {
    WeatherError::Plot(err.to_string())
}

/// Renders actual (x) against predicted (y) as a PNG scatter with a dashed
/// `y = x` reference line over the shared axis range.
///
/// # Errors
///
/// Returns an error if the series differ in length, are empty, or the
/// figure cannot be drawn or written.
pub fn plot_actual_vs_predicted(
    path: &Path,
    actual: &Vector<f64>,
    predicted: &Vector<f64>,
) -> Result<()> {
    if actual.len() != predicted.len() {
        return Err(WeatherError::dimension_mismatch(
            "predicted length",
            actual.len(),
            predicted.len(),
        ));
    }
    let (lo, hi) = axis_range(actual, predicted)?;

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(PLOT_TITLE, ("sans-serif", 22).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(lo..hi, lo..hi)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(
            actual
                .iter()
                .zip(predicted.iter())
                .map(|(&a, &p)| Circle::new((a, p), 2, BLUE.mix(0.4).filled())),
        )
        .map_err(plot_error)?;

    chart
        .draw_series(DashedLineSeries::new(
            vec![(lo, lo), (hi, hi)],
            8,
            6,
            RED.stroke_width(2),
        ))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    info!(path = %path.display(), points = actual.len(), "wrote scatter plot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(mse: f64, r2: f64) -> RegressionMetrics {
        RegressionMetrics { mse, r2, mae: 0.0 }
    }

    #[test]
    fn test_baseline_line_format() {
        assert_eq!(
            baseline_line(&metrics(33.1, 0.6)),
            "Baseline Linear MSE: 33.1000, R2: 0.6000"
        );
    }

    #[test]
    fn test_ridge_line_format() {
        assert_eq!(
            ridge_line(&metrics(9.87654, 0.912345), 0.001),
            "Poly Ridge MSE: 9.8765, R2: 0.9123, chosen alpha: 0.001000"
        );
        assert_eq!(
            ridge_line(&metrics(1.0, 1.0), 1000.0),
            "Poly Ridge MSE: 1.0000, R2: 1.0000, chosen alpha: 1000.000000"
        );
    }

    #[test]
    fn test_axis_range_spans_both_series() {
        let actual = Vector::from_slice(&[-5.0, 10.0, 2.0]);
        let predicted = Vector::from_slice(&[-3.0, 12.5, 1.0]);
        assert_eq!(axis_range(&actual, &predicted).expect("valid"), (-5.0, 12.5));
    }

    #[test]
    fn test_axis_range_degenerate_and_invalid() {
        let flat = Vector::from_slice(&[3.0, 3.0]);
        assert_eq!(axis_range(&flat, &flat).expect("valid"), (2.5, 3.5));

        let empty = Vector::from_vec(vec![]);
        assert!(axis_range(&empty, &flat).is_err());

        let nan = Vector::from_slice(&[f64::NAN]);
        assert!(axis_range(&nan, &flat).is_err());
    }

    #[test]
    fn test_plot_rejects_mismatched_series() {
        let dir = tempfile::tempdir().expect("temp dir");
        let actual = Vector::from_slice(&[1.0, 2.0]);
        let predicted = Vector::from_slice(&[1.0]);
        let err = plot_actual_vs_predicted(&dir.path().join("plot.png"), &actual, &predicted);
        assert!(err.is_err());
        assert!(!dir.path().join("plot.png").exists());
    }
}
