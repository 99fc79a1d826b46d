//! Sign filtering and outlier replacement for the raw hourly series.

use std::collections::HashSet;
use std::fmt;

use chrono::Duration;
use serde::Serialize;
use tracing::{debug, info};

use super::outliers::{Column, IqrBounds, detect_outliers, median, quantile};
use crate::config::CleaningConfig;
use crate::sim::types::HourlyRecord;

/// Outcome of cleaning one energy column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnCleaning {
    /// Which column was cleaned.
    pub column: Column,
    /// IQR fences on the sign-filtered data (`None` if no rows remained).
    pub bounds: Option<IqrBounds>,
    /// Number of values outside the fences.
    pub outliers_detected: usize,
    /// Quantile of the outlier values; values above it were replaced.
    pub threshold: Option<f64>,
    /// Column median used as the replacement value.
    pub median: Option<f64>,
    /// Number of values replaced by the median.
    pub replaced: usize,
}

/// Data-quality facts gathered while cleaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningReport {
    /// Rows handed to the cleaner.
    pub input_rows: usize,
    /// Rows dropped for a negative (or non-finite) energy value.
    pub negative_rows_dropped: usize,
    /// Rows sharing a timestamp with an earlier row.
    pub duplicate_timestamps: usize,
    /// Consecutive kept rows not exactly one hour apart.
    pub timestamp_gaps: usize,
    /// Per-column outlier handling, in [`Column::ALL`] order.
    pub columns: Vec<ColumnCleaning>,
}

impl CleaningReport {
    /// Rows surviving the sign filter.
    pub fn output_rows(&self) -> usize {
        self.input_rows - self.negative_rows_dropped
    }

    /// Cleaning outcome for one column.
    pub fn column(&self, column: Column) -> Option<&ColumnCleaning> {
        self.columns.iter().find(|c| c.column == column)
    }
}

impl fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Data Cleaning ---")?;
        writeln!(f, "Rows read:             {}", self.input_rows)?;
        writeln!(f, "Negative rows dropped: {}", self.negative_rows_dropped)?;
        writeln!(f, "Duplicate timestamps:  {}", self.duplicate_timestamps)?;
        write!(f, "Timestamp gaps:        {}", self.timestamp_gaps)?;
        for c in &self.columns {
            write!(
                f,
                "\n{:<12} outliers={:<5} replaced={:<5} threshold={} median={}",
                c.column.to_string(),
                c.outliers_detected,
                c.replaced,
                fmt_opt(c.threshold),
                fmt_opt(c.median),
            )?;
        }
        Ok(())
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "n/a".to_string(), |x| format!("{x:.3}"))
}

/// A cleaned hourly series and the facts about how it was produced.
#[derive(Debug, Clone)]
pub struct Cleaned {
    /// Sign-filtered records with outliers replaced, in input order.
    pub records: Vec<HourlyRecord>,
    /// What the cleaner did.
    pub report: CleaningReport,
}

/// Cleans a raw hourly series.
///
/// 1. Drops every record with a negative solar or electricity value.
/// 2. For each energy column, detects IQR outliers on the filtered set, takes
///    the configured quantile of the outlier values as a threshold, and
///    replaces every value strictly above it with the column median.
///
/// The median and the outliers are both computed on the sign-filtered data
/// before any replacement in that column. Row order and hour indices are
/// preserved.
pub fn clean(raw: Vec<HourlyRecord>, config: &CleaningConfig) -> Cleaned {
    let input_rows = raw.len();
    let duplicate_timestamps = count_duplicate_timestamps(&raw);

    let mut records: Vec<HourlyRecord> = raw
        .into_iter()
        .filter(|r| r.solar_kwh >= 0.0 && r.electricity_kwh >= 0.0)
        .collect();
    let negative_rows_dropped = input_rows - records.len();
    if negative_rows_dropped > 0 {
        info!(dropped = negative_rows_dropped, "dropped rows with negative energy values");
    }

    let columns = Column::ALL
        .into_iter()
        .map(|column| replace_outliers(&mut records, column, config))
        .collect();

    let timestamp_gaps = count_gaps(&records);

    Cleaned {
        records,
        report: CleaningReport {
            input_rows,
            negative_rows_dropped,
            duplicate_timestamps,
            timestamp_gaps,
            columns,
        },
    }
}

fn replace_outliers(
    records: &mut [HourlyRecord],
    column: Column,
    config: &CleaningConfig,
) -> ColumnCleaning {
    let values = column.values(records);
    let bounds = IqrBounds::from_values(&values, config.iqr_multiplier);
    let col_median = median(&values);

    let outlier_values: Vec<f64> = detect_outliers(records, column, config.iqr_multiplier)
        .into_iter()
        .map(|r| column.get(r))
        .collect();
    let threshold = quantile(&outlier_values, config.replacement_quantile);

    let mut replaced = 0;
    if let (Some(threshold), Some(replacement)) = (threshold, col_median) {
        for r in records.iter_mut().filter(|r| column.get(r) > threshold) {
            column.set(r, replacement);
            replaced += 1;
        }
    }

    debug!(
        %column,
        outliers = outlier_values.len(),
        ?threshold,
        median = ?col_median,
        replaced,
        "outlier pass complete"
    );

    ColumnCleaning {
        column,
        bounds,
        outliers_detected: outlier_values.len(),
        threshold,
        median: col_median,
        replaced,
    }
}

fn count_duplicate_timestamps(records: &[HourlyRecord]) -> usize {
    let mut seen = HashSet::with_capacity(records.len());
    records.iter().filter(|r| !seen.insert(r.timestamp)).count()
}

fn count_gaps(records: &[HourlyRecord]) -> usize {
    records
        .windows(2)
        .filter(|w| w[1].timestamp - w[0].timestamp != Duration::hours(1))
        .count()
}
