//! Financial evaluation of the simulated savings.

/// Discounting, NPV and IRR.
pub mod npv;
pub mod projection;

pub use projection::{ProjectionResult, Scenario, YearZero, project, project_all};
