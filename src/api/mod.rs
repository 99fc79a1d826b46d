//! Read-only REST API over a finished analysis.
//!
//! - `/summary` - cleaning facts, totals, aggregate tables, annual savings, projections
//! - `/hourly` - derived hourly records with optional `from`/`to` range
//! - `/hour-of-day` - the 24 hour-of-day rows (means and yearly sums)
//! - `/monthly` - the twelve monthly aggregate rows
//! - `/projections` - both scenario projections

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::report::AnalysisReport;

/// Immutable application state shared across all request handlers.
///
/// Built once after the analysis completes and wrapped in `Arc`.
pub struct AppState {
    pub report: AnalysisReport,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/hourly", get(handlers::get_hourly))
        .route("/hour-of-day", get(handlers::get_hour_of_day))
        .route("/monthly", get(handlers::get_monthly))
        .route("/projections", get(handlers::get_projections))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
