//! Content improvement endpoint.

use crate::error::ApiError;
use crate::pipeline::fill_improved_record;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use hotnote_core::{GenerationRecord, RecordStatus};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveRequest {
    pub record_id: String,
}

/// `POST /api/improve-content` — start an improvement pass over a
/// completed record.
///
/// The improved record is created and returned immediately (in
/// `Improving` state); the regeneration itself runs in the
/// background.
pub async fn improve_content(
    State(state): State<AppState>,
    Json(req): Json<ImproveRequest>,
) -> Result<Json<GenerationRecord>, ApiError> {
    let parent = state
        .history
        .get_record(&req.record_id)
        .ok_or_else(|| ApiError::not_found(format!("record {} not found", req.record_id)))?;
    if parent.status != RecordStatus::Completed {
        return Err(ApiError::bad_request(
            "only completed records can be improved",
        ));
    }

    let improved = state
        .history
        .create_improved_version(&parent.id)
        .ok_or_else(|| ApiError::not_found(format!("record {} not found", req.record_id)))?;
    info!(parent_id = %parent.id, improved_id = %improved.id, "Starting improvement pass");

    let response = improved.clone();
    tokio::spawn(async move {
        fill_improved_record(&state, &parent, &improved.id, None).await;
    });

    Ok(Json(response))
}
