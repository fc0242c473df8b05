//! Batch generation endpoint and its background worker.

use crate::error::ApiError;
use crate::pipeline::{fetch_reference_lenient, fill_improved_record, generate_to_content};
use crate::prompts::generation_prompt;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use hotnote_core::{BatchRequest, RecordStatus};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Pause between a completed item and its improvement pass, giving the
/// provider a moment between back-to-back requests.
const IMPROVEMENT_DELAY: Duration = Duration::from_secs(1);

/// `POST /api/batch-generate` — accept a batch and process it in the
/// background.
///
/// Responds immediately with the task id; items are generated strictly
/// sequentially by a spawned worker. A failed item marks its record
/// failed and the batch moves on.
pub async fn batch_generate(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.items.is_empty() {
        return Err(ApiError::bad_request("items must not be empty"));
    }
    let task = state.history.create_batch_task(&req.items);
    let task_id = task.id.clone();
    let total_items = req.items.len();
    info!(task_id = %task_id, total_items, "Accepted batch task");

    let worker_task_id = task_id.clone();
    tokio::spawn(async move {
        run_batch(state, worker_task_id, req).await;
    });

    Ok(Json(json!({
        "success": true,
        "taskId": task_id,
        "totalItems": total_items,
    })))
}

#[instrument(skip(state, req), fields(items = req.items.len()))]
async fn run_batch(state: AppState, task_id: String, req: BatchRequest) {
    let model_override = req.ai_model.as_deref();
    for (index, item) in req.items.iter().enumerate() {
        let record = state.history.create_record(&item.keyword, &item.user_info);
        state.history.add_record_to_task(&task_id, &record.id);

        let reference =
            fetch_reference_lenient(&state, &item.keyword, req.enable_scraping).await;
        let prompt = generation_prompt(
            reference.as_deref(),
            &item.user_info,
            &item.keyword,
            *state.config.max_content_length(),
        );

        let completed = match generate_to_content(&state, &prompt, model_override).await {
            Ok(content) => {
                state
                    .history
                    .update_record(&record.id, &content, RecordStatus::Completed);
                true
            }
            Err(e) => {
                warn!(record_id = %record.id, error = %e, "Batch item failed");
                state.history.mark_record_failed(&record.id, &e.to_string());
                false
            }
        };

        if completed && req.enable_improvement {
            sleep(IMPROVEMENT_DELAY).await;
            if let Some(parent) = state.history.get_record(&record.id) {
                if let Some(improved) = state.history.create_improved_version(&parent.id) {
                    state.history.add_record_to_task(&task_id, &improved.id);
                    fill_improved_record(&state, &parent, &improved.id, model_override).await;
                }
            }
        }

        state.history.update_task_progress(&task_id, index + 1);
    }
    info!(task_id = %task_id, "Batch task finished");
}
