//! Conversion of simulated battery coverage into money saved.

use crate::config::TariffConfig;
use crate::sim::types::DerivedHourlyRecord;

/// Prices the grid electricity the battery avoids.
///
/// Whenever the battery holds any charge at an hour it is treated as covering
/// that hour's whole demand; at zero charge the demand is bought from the
/// grid. Partial discharge is not modeled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsCalculator {
    /// Flat grid price per kWh.
    pub electricity_price: f64,
}

impl SavingsCalculator {
    /// Creates a calculator for a flat tariff.
    pub fn new(electricity_price: f64) -> Self {
        Self { electricity_price }
    }

    /// Creates a calculator from validated configuration.
    pub fn from_config(config: &TariffConfig) -> Self {
        Self::new(config.electricity_price)
    }

    /// Grid electricity bought at an hour given its demand and battery charge.
    pub fn purchased_kwh(needed_kwh: f64, battery_charge_kwh: f64) -> f64 {
        if battery_charge_kwh == 0.0 {
            needed_kwh
        } else {
            0.0
        }
    }

    /// Money saved at an hour: the avoided purchase times the price.
    pub fn savings(&self, needed_kwh: f64, purchased_kwh: f64) -> f64 {
        (needed_kwh - purchased_kwh).max(0.0) * self.electricity_price
    }

    /// Fills the purchase and savings fields of simulated records.
    pub fn apply(&self, mut records: Vec<DerivedHourlyRecord>) -> Vec<DerivedHourlyRecord> {
        for r in &mut records {
            r.electricity_purchased_kwh =
                Self::purchased_kwh(r.electricity_needed_kwh, r.battery_charge_kwh);
            r.savings = self.savings(r.electricity_needed_kwh, r.electricity_purchased_kwh);
        }
        records
    }
}

/// Sum of savings over all records.
pub fn annual_savings(records: &[DerivedHourlyRecord]) -> f64 {
    records.iter().map(|r| r.savings).sum()
}
