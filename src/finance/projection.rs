//! Multi-year cash-flow projections under two price-escalation scenarios.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::npv::{discount, irr, round2};
use crate::config::{MAX_HORIZON_YEARS, ProjectionConfig};

/// Electricity price escalation model applied to the first-year savings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scenario {
    /// Savings grow at a constant rate: `S * (1 + r1)^i`.
    Flat,
    /// The growth rate itself rises each year: `S * (1 + r1 + i * r2)^i`.
    Accelerating,
}

impl Scenario {
    /// Both scenarios in reporting order.
    pub const ALL: [Scenario; 2] = [Scenario::Flat, Scenario::Accelerating];

    /// Short identifier used in tables and exports.
    pub fn id(self) -> &'static str {
        match self {
            Scenario::Flat => "A",
            Scenario::Accelerating => "B",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::Flat => write!(f, "{} (flat escalation)", self.id()),
            Scenario::Accelerating => write!(f, "{} (accelerating escalation)", self.id()),
        }
    }
}

/// Handling of the accelerating scenario's year-0 savings value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearZero {
    /// Project years `1..=horizon`, giving `horizon + 1` entries like the
    /// flat scenario.
    #[default]
    Append,
    /// Evaluate years `0..horizon` and discard year 0, giving `horizon`
    /// entries. Reproduces historically published figures.
    Drop,
}

/// Cash-flow series for one scenario: entry 0 is the investment, entry `i`
/// the savings projected for year `i`.
///
/// The horizon is capped at [`MAX_HORIZON_YEARS`].
pub fn cash_flows(scenario: Scenario, annual_savings: f64, config: &ProjectionConfig) -> Vec<f64> {
    let r1 = config.escalation_rate;
    let r2 = config.escalation_step;
    let horizon = i32::try_from(config.horizon_years.min(MAX_HORIZON_YEARS)).unwrap_or(0);

    let last_year = match (scenario, config.scenario_b_year_zero) {
        (Scenario::Accelerating, YearZero::Drop) => horizon - 1,
        _ => horizon,
    };

    std::iter::once(config.initial_investment)
        .chain((1..=last_year).map(|i| match scenario {
            Scenario::Flat => annual_savings * (1.0 + r1).powi(i),
            Scenario::Accelerating => annual_savings * (1.0 + (r1 + f64::from(i) * r2)).powi(i),
        }))
        .collect()
}

/// Outcome of projecting one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    /// Which escalation model produced the series.
    pub scenario: Scenario,
    /// Undiscounted yearly cash flows, investment first.
    pub cash_flows: Vec<f64>,
    /// `cash_flows[i] / (1 + discount_rate)^i`.
    pub discounted: Vec<f64>,
    /// Sum of `discounted`.
    pub npv: f64,
    /// Internal rate of return of `cash_flows`; `None` when unsolvable.
    pub irr: Option<f64>,
}

impl ProjectionResult {
    /// IRR at reporting precision (two decimals).
    pub fn irr_rounded(&self) -> Option<f64> {
        self.irr.map(round2)
    }

    /// First year in which cumulative undiscounted cash flow turns
    /// non-negative, if it does within the horizon.
    pub fn payback_year(&self) -> Option<usize> {
        let mut cumulative = 0.0;
        self.cash_flows.iter().enumerate().find_map(|(year, c)| {
            cumulative += c;
            (year > 0 && cumulative >= 0.0).then_some(year)
        })
    }
}

impl fmt::Display for ProjectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let irr = self
            .irr_rounded()
            .map_or_else(|| "n/a".to_string(), |r| format!("{r:.2}"));
        let payback = self
            .payback_year()
            .map_or_else(|| "beyond horizon".to_string(), |y| format!("year {y}"));
        write!(
            f,
            "Scenario {:<28} NPV={:>10.2}  IRR={:>5}  payback={}",
            self.scenario.to_string(),
            self.npv,
            irr,
            payback
        )
    }
}

/// Projects one scenario: builds the series, discounts it, and solves NPV
/// and IRR.
pub fn project(scenario: Scenario, annual_savings: f64, config: &ProjectionConfig) -> ProjectionResult {
    let cash_flows = cash_flows(scenario, annual_savings, config);
    let discounted = discount(&cash_flows, config.discount_rate);
    let npv = discounted.iter().sum();
    let irr = irr(&cash_flows);
    if irr.is_none() {
        warn!(scenario = scenario.id(), "internal rate of return is unsolvable");
    }

    ProjectionResult {
        scenario,
        cash_flows,
        discounted,
        npv,
        irr,
    }
}

/// Projects both scenarios in [`Scenario::ALL`] order.
pub fn project_all(annual_savings: f64, config: &ProjectionConfig) -> Vec<ProjectionResult> {
    Scenario::ALL
        .into_iter()
        .map(|scenario| project(scenario, annual_savings, config))
        .collect()
}
