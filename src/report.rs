//! The finished analysis and its console rendering.

use std::fmt;

use serde::Serialize;

use crate::clean::CleaningReport;
use crate::config::AnalysisConfig;
use crate::finance::ProjectionResult;
use crate::sim::DerivedHourlyRecord;
use crate::sim::aggregate::{EnergySums, HourOfDayRow, MonthlyRow};

/// Everything one run produces. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Parameters the run used.
    pub config: AnalysisConfig,
    pub cleaning: CleaningReport,
    /// Fully derived hourly series in chronological order.
    pub records: Vec<DerivedHourlyRecord>,
    /// Column sums over the whole series.
    pub totals: EnergySums,
    /// 24 rows, hour 0 first.
    pub hour_of_day: Vec<HourOfDayRow>,
    /// 12 rows, January first.
    pub monthly: Vec<MonthlyRow>,
    /// Sum of hourly savings in currency units.
    pub annual_savings: f64,
    /// One entry per scenario.
    pub projections: Vec<ProjectionResult>,
}

impl AnalysisReport {
    /// Records whose hour index lies in `from..=to`.
    pub fn hourly_range(&self, from: usize, to: usize) -> &[DerivedHourlyRecord] {
        let end = to.saturating_add(1).min(self.records.len());
        let start = from.min(end);
        &self.records[start..end]
    }

    /// Compact view without the hourly series.
    pub fn summary(&self) -> Summary<'_> {
        Summary {
            hours: self.records.len(),
            cleaning: &self.cleaning,
            totals: &self.totals,
            hour_of_day: &self.hour_of_day,
            monthly: &self.monthly,
            annual_savings: self.annual_savings,
            projections: &self.projections,
        }
    }
}

/// Headline figures of a run, for the JSON summary export and the API.
#[derive(Debug, Clone, Serialize)]
pub struct Summary<'a> {
    pub hours: usize,
    pub cleaning: &'a CleaningReport,
    pub totals: &'a EnergySums,
    pub hour_of_day: &'a [HourOfDayRow],
    pub monthly: &'a [MonthlyRow],
    pub annual_savings: f64,
    pub projections: &'a [ProjectionResult],
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.cleaning)?;
        writeln!(f)?;

        let t = &self.totals;
        writeln!(f, "--- Annual Totals ({} hours) ---", t.samples)?;
        writeln!(f, "Solar generation:      {:.2} kWh", t.solar_kwh)?;
        writeln!(f, "Consumption:           {:.2} kWh", t.electricity_kwh)?;
        writeln!(f, "Excess solar:          {:.2} kWh", t.excess_solar_kwh)?;
        writeln!(f, "Needed from grid:      {:.2} kWh", t.electricity_needed_kwh)?;
        writeln!(f, "Purchased w/ battery:  {:.2} kWh", t.electricity_purchased_kwh)?;
        writeln!(f, "Annual savings:        {:.2}", self.annual_savings)?;
        writeln!(f)?;

        writeln!(f, "--- Hour of Day (mean kWh, then yearly sums) ---")?;
        writeln!(
            f,
            "{:>4} {:>9} {:>12} {:>10} {:>10} {:>10} {:>9}",
            "hour", "solar", "electricity", "needed", "excess", "battery", "savings"
        )?;
        for row in &self.hour_of_day {
            let s = &row.sums;
            writeln!(
                f,
                "{:>4} {:>9.3} {:>12.3} {:>10.2} {:>10.2} {:>10.2} {:>9.2}",
                row.hour,
                row.mean_solar_kwh,
                row.mean_electricity_kwh,
                s.electricity_needed_kwh,
                s.excess_solar_kwh,
                s.battery_charge_kwh,
                s.savings
            )?;
        }
        writeln!(f)?;

        writeln!(f, "--- Monthly (kWh) ---")?;
        writeln!(
            f,
            "{:<10} {:>10} {:>12} {:>14} {:>14} {:>9}",
            "month", "solar", "electricity", "buy w/o batt", "buy w/ batt", "savings"
        )?;
        for row in &self.monthly {
            let s = &row.sums;
            writeln!(
                f,
                "{:<10} {:>10.2} {:>12.2} {:>14.2} {:>14.2} {:>9.2}",
                row.name,
                s.solar_kwh,
                s.electricity_kwh,
                s.electricity_needed_kwh,
                s.electricity_purchased_kwh,
                s.savings
            )?;
        }
        writeln!(f)?;

        write!(f, "--- Projections ---")?;
        for p in &self.projections {
            write!(f, "\n{p}")?;
        }
        Ok(())
    }
}
