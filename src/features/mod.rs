//! Feature engineering: calendar fields and summary bucketing.
//!
//! [`engineer_features`] turns a [`CleanedDataset`] into the model input
//! frame (11 numeric and 2 categorical columns) and the temperature target.

use crate::data::{Column, DataFrame};
use crate::dataset::{CleanedDataset, PRECIP_COLUMN, TEMPERATURE_COLUMN};
use crate::error::{Result, WeatherError};
use crate::primitives::Vector;
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Bucket for summaries outside the top-N vocabulary.
pub const OTHER_CATEGORY: &str = "OTHER";

/// Bucketed summary column.
pub const SUMMARY_TOP_COLUMN: &str = "Summary_top";

/// Target column.
pub const TARGET: &str = TEMPERATURE_COLUMN;

/// Numeric model inputs, in frame order.
pub const NUMERIC_FEATURES: [&str; 11] = [
    "Humidity",
    "Wind Speed (km/h)",
    "Wind Bearing (degrees)",
    "Visibility (km)",
    "Pressure (millibars)",
    "hour",
    "month",
    "dayofyear",
    "weekday",
    "year",
    "is_weekend",
];

/// Categorical model inputs, in frame order.
pub const CATEGORICAL_FEATURES: [&str; 2] = [SUMMARY_TOP_COLUMN, PRECIP_COLUMN];

/// Calendar fields of a UTC instant.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use weathercast::features::CalendarFeatures;
///
/// // 2006-04-01 was a Saturday
/// let ts = Utc.with_ymd_and_hms(2006, 4, 1, 13, 0, 0).unwrap();
/// let cal = CalendarFeatures::from_datetime(&ts);
/// assert_eq!(cal.weekday, 5);
/// assert!(cal.is_weekend);
/// assert_eq!(cal.day_of_year, 91);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFeatures {
    /// Hour of day, 0-23
    pub hour: u32,
    /// Month, 1-12
    pub month: u32,
    /// Day of year, 1-366
    pub day_of_year: u32,
    /// Day of week, Monday = 0 through Sunday = 6
    pub weekday: u32,
    /// Calendar year
    pub year: i32,
    /// Saturday or Sunday
    pub is_weekend: bool,
}

impl CalendarFeatures {
    /// Extracts the calendar fields of `ts`.
    #[must_use]
    pub fn from_datetime(ts: &DateTime<Utc>) -> Self {
        let weekday = ts.weekday().num_days_from_monday();
        Self {
            hour: ts.hour(),
            month: ts.month(),
            day_of_year: ts.ordinal(),
            weekday,
            year: ts.year(),
            is_weekend: weekday >= 5,
        }
    }

    /// Fields as model inputs: hour, month, dayofyear, weekday, year,
    /// is_weekend.
    #[must_use]
    pub fn to_values(&self) -> [f64; 6] {
        [
            f64::from(self.hour),
            f64::from(self.month),
            f64::from(self.day_of_year),
            f64::from(self.weekday),
            f64::from(self.year),
            if self.is_weekend { 1.0 } else { 0.0 },
        ]
    }
}

/// Closed vocabulary of the most frequent values of a text column.
///
/// ```
/// use weathercast::features::TopCategories;
///
/// let values = ["Clear", "Foggy", "Clear", "Windy", "Foggy", "Clear"];
/// let top = TopCategories::fit(values, 2);
/// assert_eq!(top.vocabulary(), &["Clear".to_string(), "Foggy".to_string()]);
/// assert_eq!(top.map("Windy"), "OTHER");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCategories {
    vocabulary: Vec<String>,
}

impl TopCategories {
    /// Keeps the `n` most frequent values, by descending count with ties
    /// broken by first occurrence.
    pub fn fit<'a, I>(values: I, n: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        // value -> (count, first position)
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (pos, value) in values.into_iter().enumerate() {
            counts.entry(value).or_insert((0, pos)).0 += 1;
        }

        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(value, (count, first))| (value, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        Self {
            vocabulary: ranked
                .into_iter()
                .take(n)
                .map(|(value, _, _)| value.to_string())
                .collect(),
        }
    }

    /// Kept values, most frequent first.
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Returns true if `value` is in the vocabulary.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.vocabulary.iter().any(|v| v == value)
    }

    /// Returns `value` if it is in the vocabulary, else [`OTHER_CATEGORY`].
    #[must_use]
    pub fn map<'a>(&self, value: &'a str) -> &'a str {
        if self.contains(value) {
            value
        } else {
            OTHER_CATEGORY
        }
    }
}

/// Feature engineering settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Size of the summary vocabulary before the `OTHER` bucket
    pub top_n: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self { top_n: 8 }
    }
}

/// Builds the model input frame and target vector.
///
/// The summary vocabulary is computed over every record passed in, before
/// any train/test split.
///
/// # Errors
///
/// Returns an error if the dataset is empty.
pub fn engineer_features(
    dataset: &CleanedDataset,
    config: &FeatureConfig,
) -> Result<(DataFrame, Vector<f64>)> {
    let records = dataset.records();
    if records.is_empty() {
        return Err(WeatherError::empty_input("engineer_features: no cleaned records"));
    }

    let top = TopCategories::fit(records.iter().map(|r| r.summary.as_str()), config.top_n);
    debug!(vocabulary = ?top.vocabulary(), "summary vocabulary");

    let n = records.len();
    let mut numeric: Vec<Vec<f64>> = vec![Vec::with_capacity(n); NUMERIC_FEATURES.len()];
    let mut summary_top = Vec::with_capacity(n);
    let mut precip = Vec::with_capacity(n);
    let mut target = Vec::with_capacity(n);

    for record in records {
        let calendar = CalendarFeatures::from_datetime(&record.timestamp).to_values();
        let measurements = [
            record.humidity,
            record.wind_speed_kmh,
            record.wind_bearing_deg,
            record.visibility_km,
            record.pressure_mb,
        ];
        for (column, value) in numeric
            .iter_mut()
            .zip(measurements.into_iter().chain(calendar))
        {
            column.push(value);
        }

        summary_top.push(top.map(&record.summary).to_string());
        precip.push(record.precip_type.clone());
        target.push(record.temperature_c);
    }

    let mut columns: Vec<(String, Column)> = NUMERIC_FEATURES
        .iter()
        .zip(numeric)
        .map(|(name, values)| ((*name).to_string(), Column::Numeric(Vector::from_vec(values))))
        .collect();
    columns.push((SUMMARY_TOP_COLUMN.to_string(), Column::Categorical(summary_top)));
    columns.push((PRECIP_COLUMN.to_string(), Column::Categorical(precip)));

    Ok((DataFrame::new(columns)?, Vector::from_vec(target)))
}
