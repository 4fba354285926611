//! Health check handler.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::state::AppState;

/// Response for the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Number of datasets currently held.
    pub datasets: usize,
    pub uptime_s: f64,
}

/// GET /api/health - Server status.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        datasets: state.scope.registry().len(),
        uptime_s: state.started_at.elapsed().as_secs_f64(),
    })
}
