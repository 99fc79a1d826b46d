use serde::{Deserialize, Serialize};

use crate::config::BatteryConfig;
use crate::sim::types::DerivedHourlyRecord;

/// How the hour's electricity demand moves the state of charge once the
/// previous hour's solar surplus has been stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeRule {
    /// `max(stored + needed, 0)`: the rule used by the reference household
    /// study. Demand is added, so the charge never drops below the stored
    /// level and may exceed capacity.
    #[default]
    Reference,
    /// `max(stored - needed, 0)`: demand drains the battery. The charge stays
    /// within `[0, max_charge]`.
    Discharge,
}

/// A home battery simulated hour by hour.
///
/// The state of charge starts at zero on the first hour of the series. For
/// every following hour `i`:
///
/// 1. `stored = min(charge[i-1] + excess_solar[i-1], max_charge)`: the
///    previous hour's surplus charges the battery, capped at capacity.
/// 2. `charge[i]` combines `stored` with `electricity_needed[i]` according to
///    the [`ChargeRule`], floored at zero.
///
/// # Examples
///
/// ```
/// use solar_savings::sim::battery::{BatterySimulator, ChargeRule};
///
/// let battery = BatterySimulator::new(12.5, ChargeRule::Reference);
/// assert_eq!(battery.transition(0.0, 3.0, 3.0), 6.0);
/// assert_eq!(battery.transition(12.0, 4.0, 0.0), 12.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatterySimulator {
    /// Usable capacity in kilowatt-hours.
    pub max_charge_kwh: f64,

    /// State-of-charge update rule.
    pub rule: ChargeRule,
}

impl BatterySimulator {
    /// Creates a simulator for a battery of the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `max_charge_kwh` is not strictly positive.
    pub fn new(max_charge_kwh: f64, rule: ChargeRule) -> Self {
        assert!(max_charge_kwh > 0.0, "max_charge_kwh must be > 0");
        Self {
            max_charge_kwh,
            rule,
        }
    }

    /// Creates a simulator from validated configuration.
    pub fn from_config(config: &BatteryConfig) -> Self {
        Self::new(config.max_charge_kwh, config.charge_rule)
    }

    /// Charge level after storing the previous hour's surplus.
    pub fn stored_kwh(&self, previous_charge_kwh: f64, previous_excess_kwh: f64) -> f64 {
        (previous_charge_kwh + previous_excess_kwh).min(self.max_charge_kwh)
    }

    /// One state transition: the charge at hour `i` from the charge and
    /// surplus at hour `i-1` and the demand at hour `i`.
    pub fn transition(
        &self,
        previous_charge_kwh: f64,
        previous_excess_kwh: f64,
        needed_kwh: f64,
    ) -> f64 {
        let stored = self.stored_kwh(previous_charge_kwh, previous_excess_kwh);
        let next = match self.rule {
            ChargeRule::Reference => stored + needed_kwh,
            ChargeRule::Discharge => stored - needed_kwh,
        };
        next.max(0.0)
    }

    /// Runs the whole series and returns the charge at every hour.
    ///
    /// The output has the same length as the input. Series shorter than two
    /// hours have no transitions: an empty input gives an empty output, a
    /// single hour gives `[0.0]`.
    pub fn simulate(&self, records: &[DerivedHourlyRecord]) -> Vec<f64> {
        if records.is_empty() {
            return Vec::new();
        }

        let mut charges = Vec::with_capacity(records.len());
        charges.push(0.0);
        charges.extend(records.windows(2).scan(0.0, |charge, pair| {
            *charge = self.transition(
                *charge,
                pair[0].excess_solar_kwh,
                pair[1].electricity_needed_kwh,
            );
            Some(*charge)
        }));
        charges
    }

    /// Runs the series and writes the charge into each record.
    pub fn apply(&self, mut records: Vec<DerivedHourlyRecord>) -> Vec<DerivedHourlyRecord> {
        let charges = self.simulate(&records);
        for (record, charge) in records.iter_mut().zip(charges) {
            record.battery_charge_kwh = charge;
        }
        records
    }
}
