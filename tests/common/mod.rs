//! Synthetic weather history shared by the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use weathercast::dataset::{CleanedDataset, WeatherRecord};

/// Summaries with skewed frequencies: the first ones dominate, the tail is
/// rare enough to land in `OTHER`.
pub const SUMMARIES: [&str; 12] = [
    "Partly Cloudy",
    "Mostly Cloudy",
    "Overcast",
    "Clear",
    "Foggy",
    "Breezy and Overcast",
    "Breezy and Mostly Cloudy",
    "Breezy and Partly Cloudy",
    "Light Rain",
    "Drizzle",
    "Windy",
    "Dangerously Windy and Partly Cloudy",
];

/// Hourly records starting 2006-01-01 UTC with
/// `temperature = 3 * humidity + noise`.
pub fn synthetic_records(n: usize, seed: u64) -> Vec<WeatherRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let start = Utc.with_ymd_and_hms(2006, 1, 1, 0, 0, 0).unwrap();

    (0..n)
        .map(|i| {
            let humidity: f64 = rng.gen_range(0.0..1.0);
            let noise: f64 = rng.gen_range(-0.2..0.2);
            // squaring skews the draw toward the first summaries
            let pick: f64 = rng.gen_range(0.0..1.0);
            let summary = SUMMARIES[((pick * pick) * SUMMARIES.len() as f64) as usize];
            let temperature = 3.0 * humidity + noise;

            WeatherRecord {
                timestamp: start + Duration::hours(i as i64),
                temperature_c: temperature,
                apparent_temperature_c: temperature - 1.0,
                humidity,
                wind_speed_kmh: rng.gen_range(0.0..40.0),
                wind_bearing_deg: rng.gen_range(0.0..360.0f64).floor(),
                visibility_km: rng.gen_range(1.0..16.0),
                pressure_mb: rng.gen_range(990.0..1030.0),
                summary: summary.to_string(),
                precip_type: if rng.gen_bool(0.8) { "rain" } else { "snow" }.to_string(),
            }
        })
        .collect()
}

pub fn synthetic_dataset(n: usize, seed: u64) -> CleanedDataset {
    CleanedDataset::from_records(synthetic_records(n, seed))
}

/// Formats a UTC instant the way the weather history file does, in +0200.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    ts.with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S%.3f %z")
        .to_string()
}

/// Renders records as CSV with the full weather history header, including
/// columns the loader ignores.
pub fn to_csv(records: &[WeatherRecord]) -> String {
    let mut out = String::from(
        "Formatted Date,Summary,Precip Type,Temperature (C),Apparent Temperature (C),Humidity,\
         Wind Speed (km/h),Wind Bearing (degrees),Visibility (km),Loud Cover,Pressure (millibars),\
         Daily Summary\n",
    );
    for r in records {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},0,{},\"Mostly cloudy, later clear.\"\n",
            format_timestamp(&r.timestamp),
            r.summary,
            r.precip_type,
            r.temperature_c,
            r.apparent_temperature_c,
            r.humidity,
            r.wind_speed_kmh,
            r.wind_bearing_deg,
            r.visibility_km,
            r.pressure_mb,
        ));
    }
    out
}
