//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::AppState;
use super::types::{ErrorResponse, HourlyEntry, HourlyQuery};

/// `GET /summary` → 200 + headline figures without the hourly series.
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Response {
    Json(state.report.summary()).into_response()
}

/// Returns derived hourly records, optionally restricted to a range.
///
/// `GET /hourly` → 200 + every record
/// `GET /hourly?from=N&to=M` → records N..=M
/// `GET /hourly?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_hourly(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HourlyQuery>,
) -> Response {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        )
            .into_response();
    }

    let entries: Vec<HourlyEntry<'_>> = state
        .report
        .hourly_range(from, to)
        .iter()
        .zip(from..)
        .map(|(record, index)| HourlyEntry { index, record })
        .collect();

    Json(entries).into_response()
}

/// `GET /hour-of-day` → 200 + 24 rows, hour 0 first.
pub async fn get_hour_of_day(State(state): State<Arc<AppState>>) -> Response {
    Json(&state.report.hour_of_day).into_response()
}

/// `GET /monthly` → 200 + twelve monthly rows, January first.
pub async fn get_monthly(State(state): State<Arc<AppState>>) -> Response {
    Json(&state.report.monthly).into_response()
}

/// `GET /projections` → 200 + one entry per scenario.
pub async fn get_projections(State(state): State<Arc<AppState>>) -> Response {
    Json(&state.report.projections).into_response()
}
