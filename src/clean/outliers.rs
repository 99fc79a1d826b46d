//! Interquartile-range outlier detection.

use std::fmt;

use serde::Serialize;

use crate::sim::types::HourlyRecord;

/// A numeric energy column of [`HourlyRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// `solar_kwh`
    Solar,
    /// `electricity_kwh`
    Electricity,
}

impl Column {
    /// Both energy columns, in cleaning order.
    pub const ALL: [Column; 2] = [Column::Solar, Column::Electricity];

    /// Reads this column from a record.
    pub fn get(self, record: &HourlyRecord) -> f64 {
        match self {
            Column::Solar => record.solar_kwh,
            Column::Electricity => record.electricity_kwh,
        }
    }

    /// Overwrites this column on a record.
    pub fn set(self, record: &mut HourlyRecord, value: f64) {
        match self {
            Column::Solar => record.solar_kwh = value,
            Column::Electricity => record.electricity_kwh = value,
        }
    }

    /// Collects the column values in record order.
    pub fn values(self, records: &[HourlyRecord]) -> Vec<f64> {
        records.iter().map(|r| self.get(r)).collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Column::Solar => "solar",
            Column::Electricity => "electricity",
        })
    }
}

/// Quantile of already-sorted values using linear interpolation between the
/// two closest ranks (position `q * (n - 1)`).
///
/// Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use solar_savings::clean::outliers::quantile_sorted;
///
/// let v = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile_sorted(&v, 0.25), Some(1.75));
/// assert_eq!(quantile_sorted(&v, 0.5), Some(2.5));
/// assert_eq!(quantile_sorted(&[], 0.5), None);
/// ```
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Quantile of unsorted values. See [`quantile_sorted`].
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, q)
}

/// Median of unsorted values.
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Tukey fences computed from the first and third quartile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IqrBounds {
    /// First quartile.
    pub q1: f64,
    /// Third quartile.
    pub q3: f64,
    /// Lower fence `q1 - k * iqr`.
    pub lower: f64,
    /// Upper fence `q3 + k * iqr`.
    pub upper: f64,
}

impl IqrBounds {
    /// Computes the fences for a set of values with multiplier `k`.
    ///
    /// Returns `None` if `values` is empty.
    pub fn from_values(values: &[f64], k: f64) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let q1 = quantile_sorted(&sorted, 0.25)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            lower: q1 - k * iqr,
            upper: q3 + k * iqr,
        })
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Whether `value` lies outside the fences.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Returns the records whose `column` value lies outside the IQR fences.
///
/// Record order is preserved. An empty record set has no outliers.
pub fn detect_outliers(
    records: &[HourlyRecord],
    column: Column,
    iqr_multiplier: f64,
) -> Vec<&HourlyRecord> {
    let Some(bounds) = IqrBounds::from_values(&column.values(records), iqr_multiplier) else {
        return Vec::new();
    };
    records
        .iter()
        .filter(|r| bounds.is_outlier(column.get(r)))
        .collect()
}
