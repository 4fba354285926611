//! Column analysis handlers.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use tablescope::{ColumnStats, Histogram};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Query parameters for the histogram endpoint.
#[derive(Debug, Deserialize)]
pub struct HistogramQuery {
    /// Number of bins (server default when absent).
    pub bins: Option<usize>,
}

/// GET /api/dataset/:id/column/:col/stats - Descriptive statistics.
pub async fn get_column_stats(
    State(state): State<AppState>,
    Path((dataset_id, column)): Path<(String, String)>,
) -> Result<Json<ColumnStats>, ApiError> {
    Ok(Json(state.scope.column_stats(&dataset_id, &column)?))
}

/// GET /api/dataset/:id/column/:col/hist?bins=N - Histogram of a numeric column.
pub async fn get_column_histogram(
    State(state): State<AppState>,
    Path((dataset_id, column)): Path<(String, String)>,
    query: Result<Query<HistogramQuery>, QueryRejection>,
) -> Result<Json<Histogram>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Json(
        state
            .scope
            .column_histogram(&dataset_id, &column, query.bins)?,
    ))
}
