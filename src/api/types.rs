//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::sim::types::DerivedHourlyRecord;

/// Query parameters for `GET /hourly`; both bounds are inclusive positions
/// in the hourly series.
#[derive(Debug, Default, Deserialize)]
pub struct HourlyQuery {
    pub from: Option<usize>,
    pub to: Option<usize>,
}

/// One hourly record tagged with its position in the series.
#[derive(Debug, Serialize)]
pub struct HourlyEntry<'a> {
    pub index: usize,
    #[serde(flatten)]
    pub record: &'a DerivedHourlyRecord,
}

/// Error body for rejected requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
