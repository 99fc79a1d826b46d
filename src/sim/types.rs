//! Core record types flowing through the analysis pipeline.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// One hour of metered solar generation and household consumption.
///
/// Records are kept in chronological order, one per hour. After cleaning,
/// both energy values are non-negative.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use solar_savings::sim::types::HourlyRecord;
///
/// let ts = NaiveDate::from_ymd_opt(2020, 1, 1)
///     .and_then(|d| d.and_hms_opt(13, 0, 0))
///     .unwrap();
/// let r = HourlyRecord::new(ts, 4.0, 1.5);
/// assert_eq!(r.hour, 13);
/// assert_eq!(r.excess_solar_kwh(), 2.5);
/// assert_eq!(r.electricity_needed_kwh(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    /// Start of the hour.
    pub timestamp: NaiveDateTime,
    /// Hour of day (0-23).
    pub hour: u32,
    /// Solar generation during the hour (kWh).
    pub solar_kwh: f64,
    /// Household consumption during the hour (kWh).
    pub electricity_kwh: f64,
}

impl HourlyRecord {
    /// Creates a record, taking the hour of day from the timestamp.
    pub fn new(timestamp: NaiveDateTime, solar_kwh: f64, electricity_kwh: f64) -> Self {
        Self {
            timestamp,
            hour: timestamp.hour(),
            solar_kwh,
            electricity_kwh,
        }
    }

    /// Calendar month (1-12) of the record.
    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }

    /// Generation exceeding same-hour consumption, clamped at zero.
    pub fn excess_solar_kwh(&self) -> f64 {
        (self.solar_kwh - self.electricity_kwh).max(0.0)
    }

    /// Consumption exceeding same-hour generation, clamped at zero.
    pub fn electricity_needed_kwh(&self) -> f64 {
        (self.electricity_kwh - self.solar_kwh).max(0.0)
    }
}

/// A cleaned hourly record extended with simulation and savings outputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedHourlyRecord {
    /// The cleaned input record.
    #[serde(flatten)]
    pub record: HourlyRecord,
    /// `max(solar - electricity, 0)` (kWh).
    pub excess_solar_kwh: f64,
    /// `max(electricity - solar, 0)` (kWh).
    pub electricity_needed_kwh: f64,
    /// Battery state of charge at this hour (kWh).
    pub battery_charge_kwh: f64,
    /// Grid electricity bought with the battery installed (kWh).
    pub electricity_purchased_kwh: f64,
    /// Money saved at this hour.
    pub savings: f64,
}

impl DerivedHourlyRecord {
    /// Derives the excess/needed pair for a record. Battery and savings
    /// fields start at zero and are filled by later stages.
    pub fn from_record(record: HourlyRecord) -> Self {
        Self {
            excess_solar_kwh: record.excess_solar_kwh(),
            electricity_needed_kwh: record.electricity_needed_kwh(),
            record,
            battery_charge_kwh: 0.0,
            electricity_purchased_kwh: 0.0,
            savings: 0.0,
        }
    }
}

impl fmt::Display for DerivedHourlyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (h{:>2}) | solar={:>6.3}  elec={:>6.3} | excess={:>6.3}  needed={:>6.3} \
             | battery={:>6.3} kWh  bought={:>6.3} | saved={:.3}",
            self.record.timestamp.format("%Y-%m-%d %H:%M"),
            self.record.hour,
            self.record.solar_kwh,
            self.record.electricity_kwh,
            self.excess_solar_kwh,
            self.electricity_needed_kwh,
            self.battery_charge_kwh,
            self.electricity_purchased_kwh,
            self.savings,
        )
    }
}
