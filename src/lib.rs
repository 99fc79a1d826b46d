//! Household solar plus battery savings estimator.
//!
//! Loads a year of hourly solar generation and consumption, repairs it,
//! simulates a home battery, prices the avoided grid purchases, and projects
//! the savings over the investment horizon.

#[cfg(feature = "api")]
pub mod api;
/// Sign filtering and IQR outlier repair.
pub mod clean;
pub mod config;
pub mod error;
/// Cash-flow projections, NPV and IRR.
pub mod finance;
pub mod io;
pub mod pipeline;
pub mod report;
/// Battery fold, savings pricing and aggregation.
pub mod sim;
pub mod synthetic;
