//! weathercast: fit and compare the temperature models on `weatherHistory.csv`.

use anyhow::{Context, Result};
use std::io;
use tracing_subscriber::EnvFilter;
use weathercast::analysis;
use weathercast::config::AnalysisConfig;
use weathercast::report::plot_actual_vs_predicted;

fn main() -> Result<()> {
    // Log to stderr so stdout only carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = AnalysisConfig::default();
    let report = analysis::run(&config)
        .with_context(|| format!("analysis of {} failed", config.data_path.display()))?;

    for line in report.summary_lines() {
        println!("{line}");
    }

    plot_actual_vs_predicted(&config.plot_path, &report.y_test, &report.ridge_predictions)
        .with_context(|| format!("failed to write {}", config.plot_path.display()))?;

    Ok(())
}
