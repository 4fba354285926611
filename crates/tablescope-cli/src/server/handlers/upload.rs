//! CSV upload handler.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tablescope::IngestReceipt;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Multipart field carrying the CSV bytes.
const FILE_FIELD: &str = "file";

/// POST /api/upload - Ingest a CSV file and register it as a new dataset.
pub async fn upload_csv(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<IngestReceipt>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        upload = Some((bytes, file_name));
        break;
    }

    let (bytes, file_name) = upload.ok_or_else(|| {
        ApiError::BadRequest(format!("missing multipart field '{}'", FILE_FIELD))
    })?;

    tracing::debug!(
        size = bytes.len(),
        file = file_name.as_deref().unwrap_or("-"),
        "upload received"
    );

    // Parsing and inference are CPU-bound
    let scope = state.scope.clone();
    let receipt = tokio::task::spawn_blocking(move || scope.ingest_named(&bytes, file_name))
        .await
        .map_err(|e| ApiError::Internal(format!("ingest task failed: {}", e)))??;

    Ok(Json(receipt))
}
