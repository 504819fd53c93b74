//! Loading and cleaning of hourly weather history CSV files.
//!
//! Only the ten columns in [`REQUIRED_COLUMNS`] are read. A row survives
//! cleaning when every required cell is present, every numeric cell parses
//! to a finite number and the timestamp parses. Everything else is dropped
//! and counted in [`CleaningStats`].
//!
//! # Example
//!
//! ```
//! use weathercast::dataset::read_weather_csv;
//!
//! let csv = "\
//! Formatted Date,Summary,Precip Type,Temperature (C),Apparent Temperature (C),Humidity,Wind Speed (km/h),Wind Bearing (degrees),Visibility (km),Loud Cover,Pressure (millibars)
//! 2006-04-01 00:00:00.000 +0200,Partly Cloudy,rain,9.47,7.38,0.89,14.11,251,15.82,0,1015.13
//! 2006-04-01 01:00:00.000 +0200,Partly Cloudy,,9.35,7.22,0.86,14.26,259,15.82,0,1015.63
//! ";
//!
//! let data = read_weather_csv(csv.as_bytes()).expect("valid CSV");
//! assert_eq!(data.len(), 1);
//! assert_eq!(data.stats().dropped_missing, 1);
//! ```

use crate::error::{Result, WeatherError};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Timestamp column.
pub const DATE_COLUMN: &str = "Formatted Date";
/// Target column.
pub const TEMPERATURE_COLUMN: &str = "Temperature (C)";
/// Free-text weather summary column.
pub const SUMMARY_COLUMN: &str = "Summary";
/// Precipitation type column.
pub const PRECIP_COLUMN: &str = "Precip Type";

/// Columns that must be present in the header, in selection order.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    DATE_COLUMN,
    TEMPERATURE_COLUMN,
    "Apparent Temperature (C)",
    "Humidity",
    "Wind Speed (km/h)",
    "Wind Bearing (degrees)",
    "Visibility (km)",
    "Pressure (millibars)",
    SUMMARY_COLUMN,
    PRECIP_COLUMN,
];

/// Cell values treated as missing, besides the empty string.
pub const NA_TOKENS: [&str; 18] = [
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
    "#NA", "#N/A N/A", "-1.#IND", "-1.#QNAN", "1.#IND", "1.#QNAN",
];

/// Positions in [`REQUIRED_COLUMNS`] of the numeric measurements, in
/// [`WeatherRecord`] field order.
const NUMERIC_FIELDS: [usize; 7] = [1, 2, 3, 4, 5, 6, 7];

/// One cleaned hourly observation.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    /// Observation instant, normalized to UTC
    pub timestamp: DateTime<Utc>,
    /// Air temperature in degrees Celsius
    pub temperature_c: f64,
    /// Apparent (feels-like) temperature in degrees Celsius
    pub apparent_temperature_c: f64,
    /// Relative humidity, 0 to 1
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed_kmh: f64,
    /// Wind bearing in degrees
    pub wind_bearing_deg: f64,
    /// Visibility in km
    pub visibility_km: f64,
    /// Sea-level pressure in millibars
    pub pressure_mb: f64,
    /// Weather summary text
    pub summary: String,
    /// Precipitation type (e.g. `rain`, `snow`)
    pub precip_type: String,
}

/// Row counts gathered while cleaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    /// Data rows read (header excluded)
    pub rows_read: usize,
    /// Rows with an empty or NA required cell
    pub dropped_missing: usize,
    /// Rows with a numeric cell that is not a finite number
    pub dropped_numeric: usize,
    /// Rows whose timestamp could not be parsed
    pub dropped_timestamp: usize,
    /// Rows kept
    pub rows_kept: usize,
}

impl CleaningStats {
    /// Total rows dropped for any reason.
    #[must_use]
    pub fn rows_dropped(&self) -> usize {
        self.dropped_missing + self.dropped_numeric + self.dropped_timestamp
    }
}

/// Cleaned records plus the counts describing how they were obtained.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    records: Vec<WeatherRecord>,
    stats: CleaningStats,
}

impl CleanedDataset {
    /// Wraps records that are already clean, e.g. generated in memory.
    #[must_use]
    pub fn from_records(records: Vec<WeatherRecord>) -> Self {
        let stats = CleaningStats {
            rows_read: records.len(),
            rows_kept: records.len(),
            ..CleaningStats::default()
        };
        Self { records, stats }
    }

    /// The cleaned records, in file order.
    #[must_use]
    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    /// Cleaning counts.
    #[must_use]
    pub fn stats(&self) -> CleaningStats {
        self.stats
    }

    /// Number of cleaned records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no record survived cleaning.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Returns true for an empty (after trimming) or NA-token cell.
#[must_use]
pub fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || NA_TOKENS.contains(&cell)
}

/// Parses a timestamp into a UTC instant.
///
/// Accepts `2006-04-01 00:00:00.000 +0200`, RFC 3339, and naive
/// `2006-04-01 00:00:00` (taken as UTC).
///
/// ```
/// use weathercast::dataset::parse_timestamp;
///
/// let ts = parse_timestamp("2006-04-01 00:00:00.000 +0200").expect("valid");
/// assert_eq!(ts.to_rfc3339(), "2006-03-31T22:00:00+00:00");
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f %z")
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
}

fn parse_finite(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Maps every required column to its position in the header.
fn locate_columns(headers: &StringRecord) -> Result<[usize; 10]> {
    let positions: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name, idx))
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !positions.contains_key(*name))
        .map(|name| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(WeatherError::MissingColumns { columns: missing });
    }

    let mut idx = [0; 10];
    for (slot, name) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = positions[name];
    }
    Ok(idx)
}

enum RowOutcome {
    Kept(WeatherRecord),
    Missing,
    BadNumeric,
    BadTimestamp,
}

fn clean_row(record: &StringRecord, idx: &[usize; 10]) -> RowOutcome {
    let cells: Vec<&str> = idx.iter().map(|&i| record.get(i).unwrap_or("")).collect();

    if cells.iter().any(|cell| is_missing(cell)) {
        return RowOutcome::Missing;
    }

    let mut numbers = [0.0; 7];
    for (slot, &pos) in numbers.iter_mut().zip(&NUMERIC_FIELDS) {
        match parse_finite(cells[pos]) {
            Some(v) => *slot = v,
            None => return RowOutcome::BadNumeric,
        }
    }

    let Some(timestamp) = parse_timestamp(cells[0]) else {
        return RowOutcome::BadTimestamp;
    };

    let [temperature_c, apparent_temperature_c, humidity, wind_speed_kmh, wind_bearing_deg, visibility_km, pressure_mb] =
        numbers;

    RowOutcome::Kept(WeatherRecord {
        timestamp,
        temperature_c,
        apparent_temperature_c,
        humidity,
        wind_speed_kmh,
        wind_bearing_deg,
        visibility_km,
        pressure_mb,
        summary: cells[8].to_string(),
        precip_type: cells[9].to_string(),
    })
}

/// Reads and cleans weather records from any CSV source with a header row.
///
/// # Errors
///
/// Returns [`WeatherError::MissingColumns`] naming every absent required
/// column, or a CSV error for malformed input.
pub fn read_weather_csv<R: io::Read>(reader: R) -> Result<CleanedDataset> {
    // Short rows are read, not rejected: their absent cells count as missing
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let idx = locate_columns(reader.headers()?)?;

    let mut stats = CleaningStats::default();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        stats.rows_read += 1;
        match clean_row(&row, &idx) {
            RowOutcome::Kept(record) => records.push(record),
            RowOutcome::Missing => stats.dropped_missing += 1,
            RowOutcome::BadNumeric => stats.dropped_numeric += 1,
            RowOutcome::BadTimestamp => stats.dropped_timestamp += 1,
        }
    }
    stats.rows_kept = records.len();

    debug!(?stats, "cleaned weather rows");
    Ok(CleanedDataset { records, stats })
}

/// Opens `path` and reads it with [`read_weather_csv`].
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened, plus every error of
/// [`read_weather_csv`].
pub fn load_weather_csv<P: AsRef<Path>>(path: P) -> Result<CleanedDataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = read_weather_csv(file)?;

    let stats = dataset.stats();
    info!(
        path = %path.display(),
        rows_read = stats.rows_read,
        rows_kept = stats.rows_kept,
        rows_dropped = stats.rows_dropped(),
        dropped_missing = stats.dropped_missing,
        dropped_numeric = stats.dropped_numeric,
        dropped_timestamp = stats.dropped_timestamp,
        "loaded weather history"
    );
    Ok(dataset)
}

#[cfg(test)]
#[path = "dataset_tests.rs"]
mod tests;
