//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::io::Write;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tempfile::NamedTempFile;

use solar_savings::config::AnalysisConfig;
use solar_savings::report::AnalysisReport;
use solar_savings::sim::types::HourlyRecord;
use solar_savings::synthetic::SyntheticYear;

/// Start of every hand-built series: 2021-01-01 00:00.
pub fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid start")
}

/// Consecutive hourly records from `(solar, electricity)` pairs.
pub fn make_records(rows: &[(f64, f64)]) -> Vec<HourlyRecord> {
    rows.iter()
        .enumerate()
        .map(|(i, &(solar, elec))| HourlyRecord::new(start() + Duration::hours(i as i64), solar, elec))
        .collect()
}

/// The worked 3-hour example: {(5, 2), (0, 3), (1, 1)}.
pub fn three_hour_records() -> Vec<HourlyRecord> {
    make_records(&[(5.0, 2.0), (0.0, 3.0), (1.0, 1.0)])
}

/// Default synthetic year (seed 42, 8760 hours).
pub fn synthetic_year() -> Vec<HourlyRecord> {
    SyntheticYear::default().generate()
}

/// Full baseline analysis of the default synthetic year.
pub fn baseline_report() -> AnalysisReport {
    solar_savings::pipeline::analyze(synthetic_year(), &AnalysisConfig::baseline())
}

/// Writes `contents` to a temporary file with the given extension.
pub fn write_temp(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

/// Renders records as an input CSV with a date-only column plus hour.
pub fn to_input_csv(records: &[HourlyRecord]) -> String {
    let mut out = String::from("date,hour,solar,electricity\n");
    for r in records {
        out.push_str(&format!(
            "{},{},{},{}\n",
            r.timestamp.format("%Y-%m-%d"),
            r.hour,
            r.solar_kwh,
            r.electricity_kwh
        ));
    }
    out
}
