//! End-to-end analysis: clean, derive, simulate, price, aggregate, project.

use tracing::{info, warn};

use crate::clean::clean;
use crate::config::AnalysisConfig;
use crate::finance::project_all;
use crate::report::AnalysisReport;
use crate::sim::aggregate::{EnergySums, by_hour_of_day, by_month};
use crate::sim::{BatterySimulator, DerivedHourlyRecord, HourlyRecord, SavingsCalculator, annual_savings};

/// Attaches excess solar and electricity needed to each cleaned record.
/// Battery charge, purchases and savings start at zero.
pub fn derive(records: Vec<HourlyRecord>) -> Vec<DerivedHourlyRecord> {
    records.into_iter().map(DerivedHourlyRecord::from_record).collect()
}

/// Runs every stage over a raw hourly series.
///
/// A series shorter than two records after cleaning is not an error: a
/// warning is logged and the battery and savings stages produce zeros.
///
/// # Arguments
///
/// * `raw` - Hourly records as loaded, in chronological order
/// * `config` - Validated analysis parameters
///
/// # Panics
///
/// Panics if `config.battery.max_charge_kwh` is not positive; callers are
/// expected to run [`AnalysisConfig::validate`] first.
pub fn analyze(raw: Vec<HourlyRecord>, config: &AnalysisConfig) -> AnalysisReport {
    let cleaned = clean(raw, &config.cleaning);
    if cleaned.records.len() < 2 {
        warn!(
            rows = cleaned.records.len(),
            "fewer than two hourly records after cleaning; battery and savings will be zero"
        );
    }

    let battery = BatterySimulator::from_config(&config.battery);
    let tariff = SavingsCalculator::from_config(&config.tariff);
    let records = tariff.apply(battery.apply(derive(cleaned.records)));

    let annual_savings = annual_savings(&records);
    info!(
        hours = records.len(),
        annual_savings,
        "simulated battery year"
    );

    let projections = project_all(annual_savings, &config.projection);

    AnalysisReport {
        config: config.clone(),
        cleaning: cleaned.report,
        totals: EnergySums::from_records(&records),
        hour_of_day: by_hour_of_day(&records),
        monthly: by_month(&records),
        annual_savings,
        projections,
        records,
    }
}
