//! Projection, NPV and IRR behavior on realistic savings figures.

mod common;

use approx::{assert_abs_diff_eq, assert_relative_eq};

use solar_savings::config::{AnalysisConfig, ProjectionConfig};
use solar_savings::finance::npv::{discount, irr, npv};
use solar_savings::finance::projection::cash_flows;
use solar_savings::finance::{Scenario, YearZero, project_all};
use solar_savings::pipeline::analyze;

#[test]
fn scenario_a_has_investment_plus_twenty_years() {
    let cf = cash_flows(Scenario::Flat, 650.0, &ProjectionConfig::default());
    assert_eq!(cf.len(), 21);
    assert_eq!(cf[0], -7000.0);
    assert!(cf[1..].windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn legacy_preset_drops_scenario_b_year_zero() {
    let config = AnalysisConfig::legacy();
    assert_eq!(config.projection.scenario_b_year_zero, YearZero::Drop);
    let projections = project_all(650.0, &config.projection);
    assert_eq!(projections[0].cash_flows.len(), 21);
    assert_eq!(projections[1].cash_flows.len(), 20);
}

#[test]
fn npv_does_not_depend_on_summation_order() {
    for p in project_all(650.0, &ProjectionConfig::default()) {
        let mut reversed = p.discounted.clone();
        reversed.reverse();
        assert_abs_diff_eq!(p.npv, reversed.iter().sum::<f64>(), epsilon = 1e-9);
    }
}

#[test]
fn irr_is_the_rate_that_zeroes_npv() {
    for p in project_all(650.0, &ProjectionConfig::default()) {
        let rate = p.irr.expect("series changes sign");
        assert_abs_diff_eq!(npv(&p.cash_flows, rate), 0.0, epsilon = 1e-6);
        // NPV at the discount rate and IRR agree on profitability.
        assert_eq!(p.npv > 0.0, rate > 0.06);
    }
}

#[test]
fn discounted_series_matches_definition() {
    let p = &project_all(650.0, &ProjectionConfig::default())[0];
    assert_eq!(p.discounted, discount(&p.cash_flows, 0.06));
    assert_relative_eq!(p.discounted[10], p.cash_flows[10] / 1.06f64.powi(10), max_relative = 1e-12);
}

#[test]
fn zero_savings_is_unsolvable_not_a_panic() {
    for p in project_all(0.0, &ProjectionConfig::default()) {
        assert_eq!(p.irr, None);
        assert_relative_eq!(p.npv, -7000.0);
    }
    assert_eq!(irr(&[-7000.0; 5]), None);
}

#[test]
fn full_year_projection_is_consistent_with_annual_savings() {
    let report = analyze(common::synthetic_year(), &AnalysisConfig::baseline());
    let a = &report.projections[0];
    assert_relative_eq!(a.cash_flows[1], report.annual_savings * 1.04, max_relative = 1e-12);
    let b = &report.projections[1];
    assert_relative_eq!(b.cash_flows[1], report.annual_savings * 1.0425, max_relative = 1e-12);
}
