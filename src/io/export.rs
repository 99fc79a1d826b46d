//! CSV export of the derived hourly series and JSON export of the report.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::report::AnalysisReport;
use crate::sim::types::DerivedHourlyRecord;

/// Column header for the hourly CSV export.
const HEADER: &str = "timestamp,hour,solar,electricity,electricity_needed,\
                      excess_solar,battery_charge,electricity_purchased,savings";

/// Exports derived hourly records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per hour. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `records` - Fully derived hourly records
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[DerivedHourlyRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes derived hourly records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[DerivedHourlyRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in records {
        wtr.write_record(&[
            r.record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            r.record.hour.to_string(),
            format!("{:.4}", r.record.solar_kwh),
            format!("{:.4}", r.record.electricity_kwh),
            format!("{:.4}", r.electricity_needed_kwh),
            format!("{:.4}", r.excess_solar_kwh),
            format!("{:.4}", r.battery_charge_kwh),
            format!("{:.4}", r.electricity_purchased_kwh),
            format!("{:.4}", r.savings),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the report summary (everything except the hourly rows) as
/// pretty-printed JSON to a file.
///
/// # Errors
///
/// Returns an `io::Error` if file creation, serialization, or writing fails.
pub fn export_summary_json(report: &AnalysisReport, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut buf = io::BufWriter::new(file);
    write_summary_json(report, &mut buf)?;
    buf.flush()
}

/// Writes the report summary as pretty-printed JSON to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_summary_json(report: &AnalysisReport, writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, &report.summary()).map_err(io::Error::other)
}
