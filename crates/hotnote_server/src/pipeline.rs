//! Shared generation pipeline pieces.

use crate::state::AppState;
use hotnote_core::GeneratedContent;
use hotnote_error::HotnoteResult;
use hotnote_parser::{parse_generated_content, sanitize_text};
use hotnote_security::FilterMode;
use std::sync::Mutex;
use tracing::warn;

/// Marker opening the first content section; everything streamed before
/// it is model preamble and is withheld.
const START_MARKER: &str = "## 1.";

/// Suppresses streamed preamble until the first section marker is seen.
///
/// Chunks are buffered until the marker appears (possibly straddling a
/// chunk boundary); from that point on chunks pass through untouched.
#[derive(Debug, Default)]
pub struct ChunkGate {
    buffer: String,
    started: bool,
}

impl ChunkGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk; returns the text that may be emitted now.
    pub fn admit(&mut self, chunk: &str) -> Option<String> {
        if self.started {
            return Some(chunk.to_string());
        }
        self.buffer.push_str(chunk);
        let pos = self.buffer.find(START_MARKER)?;
        self.started = true;
        let admitted = self.buffer.split_off(pos);
        self.buffer.clear();
        Some(admitted)
    }

    /// Whatever was withheld, for streams that never produced the
    /// marker: better to deliver unstructured text than nothing.
    pub fn into_pending(self) -> Option<String> {
        if self.started || self.buffer.trim().is_empty() {
            None
        } else {
            Some(self.buffer)
        }
    }
}

/// Run one full generation to completion, returning parsed sections.
///
/// The stream is accumulated, sanitized, run through the sensitive-word
/// filter and parsed. Used by the batch and improvement paths; the
/// interactive endpoint streams instead.
pub async fn generate_to_content(
    state: &AppState,
    prompt: &str,
    model_override: Option<&str>,
) -> HotnoteResult<GeneratedContent> {
    let accumulated = Mutex::new(String::new());
    let sink = |chunk: &str| {
        accumulated.lock().expect("accumulator lock poisoned").push_str(chunk);
        Ok(())
    };
    state
        .ai
        .generate_stream_with_retry(prompt, &sink, model_override)
        .await?;

    let raw = accumulated.into_inner().expect("accumulator lock poisoned");
    let clean = sanitize_text(&raw);
    let filtered = state.filter.filter(&clean, FilterMode::Replace);
    Ok(parse_generated_content(&filtered))
}

/// Generate improved copy for an already-created improvement record.
///
/// On success the record completes with the regenerated sections; any
/// failure marks it failed with the error message. The parent record
/// supplies the prior copy embedded into the improvement prompt.
pub async fn fill_improved_record(
    state: &AppState,
    parent: &hotnote_core::GenerationRecord,
    improved_id: &str,
    model_override: Option<&str>,
) {
    let prompt = crate::prompts::improvement_prompt(parent);
    match generate_to_content(state, &prompt, model_override).await {
        Ok(content) => {
            state
                .history
                .update_record(improved_id, &content, hotnote_core::RecordStatus::Completed);
        }
        Err(e) => {
            warn!(record_id = improved_id, error = %e, "Improvement generation failed");
            state.history.mark_record_failed(improved_id, &e.to_string());
        }
    }
}

/// Fetch reference data for a background item, tolerating failure.
///
/// A per-request `enable_scraping: false` skips the fetch outright;
/// fetch errors degrade to generation without reference data rather
/// than failing the item.
pub async fn fetch_reference_lenient(
    state: &AppState,
    keyword: &str,
    enable_scraping: Option<bool>,
) -> Option<String> {
    if enable_scraping == Some(false) {
        return None;
    }
    match state.fetcher.fetch(keyword).await {
        Ok(reference) => reference,
        Err(e) => {
            warn!(keyword, error = %e, "Reference fetch failed, generating without it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_is_withheld_until_the_marker() {
        let mut gate = ChunkGate::new();
        assert_eq!(gate.admit("好的，这就为你创作"), None);
        assert_eq!(gate.admit("：\n\n"), None);
        assert_eq!(
            gate.admit("## 1. 标题\n正文").as_deref(),
            Some("## 1. 标题\n正文")
        );
        assert_eq!(gate.admit("后续内容").as_deref(), Some("后续内容"));
    }

    #[test]
    fn marker_straddling_chunks_is_found() {
        let mut gate = ChunkGate::new();
        assert_eq!(gate.admit("前言## "), None);
        assert_eq!(gate.admit("1. 标题").as_deref(), Some("## 1. 标题"));
    }

    #[test]
    fn pending_text_surfaces_when_no_marker_ever_arrives() {
        let mut gate = ChunkGate::new();
        assert_eq!(gate.admit("完全没有标记的输出"), None);
        assert_eq!(
            gate.into_pending().as_deref(),
            Some("完全没有标记的输出")
        );
    }

    #[test]
    fn no_pending_after_a_started_stream() {
        let mut gate = ChunkGate::new();
        gate.admit("## 1. 标题");
        assert_eq!(gate.into_pending(), None);
    }
}
