//! Task and record status endpoints.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    pub task_id: Option<String>,
}

/// `GET /api/generation-status` — one task by `taskId`, or all tasks
/// when the parameter is absent.
pub async fn generation_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Value>, ApiError> {
    match query.task_id {
        Some(task_id) => state
            .history
            .get_task(&task_id)
            .map(|task| Json(json!({ "task": task })))
            .ok_or_else(|| ApiError::not_found(format!("task {task_id} not found"))),
        None => Ok(Json(json!({ "tasks": state.history.get_all_tasks() }))),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuery {
    pub record_id: Option<String>,
}

/// `DELETE /api/generation-status?recordId=` — delete one record,
/// cascading out of any task that references it.
pub async fn delete_record(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    let record_id = query
        .record_id
        .ok_or_else(|| ApiError::bad_request("recordId query parameter is required"))?;
    if state.history.delete_record(&record_id) {
        info!(record_id = %record_id, "Deleted generation record");
        Ok(Json(json!({ "success": true })))
    } else {
        Err(ApiError::not_found(format!("record {record_id} not found")))
    }
}
