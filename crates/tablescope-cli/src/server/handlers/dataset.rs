//! Dataset-level handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use tablescope::{DatasetSummary, Row};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// GET /api/dataset/:id - Dataset metadata and schema.
pub async fn get_dataset(
    State(state): State<AppState>,
    Path(dataset_id): Path<String>,
) -> Result<Json<DatasetSummary>, ApiError> {
    Ok(Json(state.scope.summary(&dataset_id)?))
}

/// GET /api/dataset/:id/table - Every row of the dataset.
pub async fn get_table(
    State(state): State<AppState>,
    Path(dataset_id): Path<String>,
) -> Result<Json<Vec<Row>>, ApiError> {
    Ok(Json(state.scope.list_rows(&dataset_id)?))
}
