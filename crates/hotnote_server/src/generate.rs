//! Interactive streaming generation endpoint.

use crate::pipeline::ChunkGate;
use crate::prompts::generation_prompt;
use crate::state::AppState;
use axum::extract::State;
use axum::response::sse::{Event, Sse};
use axum::Json;
use futures_util::{Stream, StreamExt};
use hotnote_error::{ChannelClosedError, HotnoteResult};
use hotnote_parser::sanitize_text;
use hotnote_security::FilterMode;
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub keyword: String,
    pub user_info: String,
}

fn content_event(text: &str) -> Event {
    Event::default().data(json!({ "content": text }).to_string())
}

fn error_event(message: &str) -> Event {
    Event::default().data(json!({ "error": message }).to_string())
}

/// `POST /api/generate` — stream generated copy over SSE.
///
/// Emits `data: {"content": ...}` fragments (preamble before the first
/// section marker withheld), then `data: [DONE]`. Failures end the
/// stream with `data: {"error": ...}` and no terminator.
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::unbounded_channel::<Event>();

    tokio::spawn(async move {
        debug!(keyword = %req.keyword, "Starting streamed generation");
        let reference = match state.fetcher.fetch(&req.keyword).await {
            Ok(reference) => reference,
            Err(e) => {
                let _ = tx.send(error_event(&e.to_string()));
                return;
            }
        };
        let prompt = generation_prompt(
            reference.as_deref(),
            &req.user_info,
            &req.keyword,
            *state.config.max_content_length(),
        );

        let gate = Mutex::new(ChunkGate::new());
        let sink = |chunk: &str| -> HotnoteResult<()> {
            if tx.is_closed() {
                return Err(ChannelClosedError::new("client disconnected").into());
            }
            if chunk.is_empty() {
                // Keep-alive ping; nothing to forward.
                return Ok(());
            }
            let admitted = gate.lock().expect("chunk gate poisoned").admit(chunk);
            if let Some(text) = admitted {
                let filtered = state
                    .filter
                    .filter(&sanitize_text(&text), FilterMode::Replace);
                if !filtered.is_empty() {
                    tx.send(content_event(&filtered))
                        .map_err(|_| ChannelClosedError::new("client disconnected"))?;
                }
            }
            Ok(())
        };

        let result = state
            .ai
            .generate_stream_with_retry(&prompt, &sink, None)
            .await;
        drop(sink);

        match result {
            Ok(()) => {
                let gate = gate.into_inner().expect("chunk gate poisoned");
                if let Some(pending) = gate.into_pending() {
                    let filtered = state
                        .filter
                        .filter(&sanitize_text(&pending), FilterMode::Replace);
                    let _ = tx.send(content_event(&filtered));
                }
                let _ = tx.send(Event::default().data("[DONE]"));
            }
            Err(e) => {
                let _ = tx.send(error_event(&e.to_string()));
            }
        }
    });

    Sse::new(UnboundedReceiverStream::new(rx).map(Ok::<_, Infallible>))
}
