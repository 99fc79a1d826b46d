//! Hour-of-day and calendar-month rollups of the simulated series.
//!
//! Computed post-hoc from `&[DerivedHourlyRecord]` so reported aggregates
//! always agree with the per-hour data.

use chrono::Month;
use serde::Serialize;

use super::types::DerivedHourlyRecord;

/// Running sums of every per-hour quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EnergySums {
    /// Number of hours summed.
    pub samples: usize,
    /// Solar generation (kWh).
    pub solar_kwh: f64,
    /// Household consumption (kWh).
    pub electricity_kwh: f64,
    /// Consumption not covered by same-hour solar, i.e. the purchase
    /// without a battery (kWh).
    pub electricity_needed_kwh: f64,
    /// Solar not consumed in the same hour (kWh).
    pub excess_solar_kwh: f64,
    /// Sum of the hourly battery charge levels (kWh).
    pub battery_charge_kwh: f64,
    /// Grid purchase with the battery installed (kWh).
    pub electricity_purchased_kwh: f64,
    /// Money saved.
    pub savings: f64,
}

impl EnergySums {
    /// Adds one hour to the sums.
    pub fn add(&mut self, r: &DerivedHourlyRecord) {
        self.samples += 1;
        self.solar_kwh += r.record.solar_kwh;
        self.electricity_kwh += r.record.electricity_kwh;
        self.electricity_needed_kwh += r.electricity_needed_kwh;
        self.excess_solar_kwh += r.excess_solar_kwh;
        self.battery_charge_kwh += r.battery_charge_kwh;
        self.electricity_purchased_kwh += r.electricity_purchased_kwh;
        self.savings += r.savings;
    }

    /// Sums over a whole series.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a DerivedHourlyRecord>) -> Self {
        let mut sums = Self::default();
        for r in records {
            sums.add(r);
        }
        sums
    }

    /// Mean solar generation per summed hour (0 when empty).
    pub fn mean_solar_kwh(&self) -> f64 {
        self.mean(self.solar_kwh)
    }

    /// Mean consumption per summed hour (0 when empty).
    pub fn mean_electricity_kwh(&self) -> f64 {
        self.mean(self.electricity_kwh)
    }

    fn mean(&self, total: f64) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            total / self.samples as f64
        }
    }
}

/// Sums for one hour of the day across the whole year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourOfDayRow {
    /// Hour of day (0-23).
    pub hour: u32,
    /// Mean solar generation at this hour (kWh).
    pub mean_solar_kwh: f64,
    /// Mean consumption at this hour (kWh).
    pub mean_electricity_kwh: f64,
    /// Year-long sums at this hour.
    #[serde(flatten)]
    pub sums: EnergySums,
}

/// Sums for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRow {
    /// Month number (1-12).
    pub month: u32,
    /// English month name.
    pub name: &'static str,
    /// Sums over the month's hours.
    #[serde(flatten)]
    pub sums: EnergySums,
}

/// Groups the series by hour of day.
///
/// Always returns 24 rows (hours 0-23); hours with no data are zero.
pub fn by_hour_of_day(records: &[DerivedHourlyRecord]) -> Vec<HourOfDayRow> {
    let mut sums = [EnergySums::default(); 24];
    for r in records {
        if let Some(slot) = sums.get_mut(r.record.hour as usize) {
            slot.add(r);
        }
    }
    sums.into_iter()
        .zip(0u32..)
        .map(|(sums, hour)| HourOfDayRow {
            hour,
            mean_solar_kwh: sums.mean_solar_kwh(),
            mean_electricity_kwh: sums.mean_electricity_kwh(),
            sums,
        })
        .collect()
}

/// Groups the series by calendar month.
///
/// Always returns 12 rows in January-to-December order; months with no data
/// are zero.
pub fn by_month(records: &[DerivedHourlyRecord]) -> Vec<MonthlyRow> {
    let mut sums = [EnergySums::default(); 12];
    for r in records {
        sums[r.record.month() as usize - 1].add(r);
    }
    sums.into_iter()
        .zip(1u32..)
        .map(|(sums, month)| MonthlyRow {
            month,
            name: month_name(month),
            sums,
        })
        .collect()
}

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("?", |m| m.name())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::sim::types::HourlyRecord;

    fn year_of_ones() -> Vec<DerivedHourlyRecord> {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid start");
        (0..8760)
            .map(|i| {
                let mut d = DerivedHourlyRecord::from_record(HourlyRecord::new(
                    start + Duration::hours(i),
                    2.0,
                    1.0,
                ));
                d.savings = 0.5;
                d
            })
            .collect()
    }

    #[test]
    fn hour_of_day_has_24_rows() {
        let rows = by_hour_of_day(&year_of_ones());
        assert_eq!(rows.len(), 24);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.hour as usize, i);
            assert_eq!(row.sums.samples, 365);
            assert_relative_eq!(row.mean_solar_kwh, 2.0);
            assert_relative_eq!(row.sums.excess_solar_kwh, 365.0);
        }
    }

    #[test]
    fn monthly_rows_follow_calendar_order() {
        let rows = by_month(&year_of_ones());
        let names: Vec<&str> = rows.iter().map(|r| r.name).collect();
        assert_eq!(names[0], "January");
        assert_eq!(names[11], "December");
        assert_eq!(rows[1].sums.samples, 28 * 24);
        assert_eq!(rows[0].sums.samples, 31 * 24);
    }

    #[test]
    fn rollups_agree_with_totals() {
        let records = year_of_ones();
        let total = EnergySums::from_records(&records);
        let hourly: f64 = by_hour_of_day(&records).iter().map(|r| r.sums.savings).sum();
        let monthly: f64 = by_month(&records).iter().map(|r| r.sums.savings).sum();
        assert_relative_eq!(total.savings, 4380.0, max_relative = 1e-9);
        assert_relative_eq!(hourly, total.savings, max_relative = 1e-9);
        assert_relative_eq!(monthly, total.savings, max_relative = 1e-9);
    }

    #[test]
    fn empty_series_gives_zero_rows() {
        let hourly = by_hour_of_day(&[]);
        assert_eq!(hourly.len(), 24);
        assert!(hourly.iter().all(|r| r.sums.samples == 0 && r.mean_solar_kwh == 0.0));
        assert_eq!(by_month(&[]).len(), 12);
    }
}
