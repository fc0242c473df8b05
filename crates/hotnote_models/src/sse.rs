//! Incremental SSE `data:` line decoding.

use crate::wire::StreamPayload;
use tracing::trace;

/// A decoded server-sent event from a chat-completions stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// A non-empty content delta.
    Delta(String),
    /// The `[DONE]` terminator.
    Done,
}

/// Line buffer for reassembling SSE events from arbitrary network
/// chunk boundaries.
///
/// Bytes are buffered until a newline arrives, so a multi-byte UTF-8
/// character split across chunks is never decoded partially. Malformed
/// payloads and empty deltas (provider heartbeats, role-only chunks)
/// are skipped, not errors.
///
/// # Examples
///
/// ```
/// use hotnote_models::{SseEvent, SseLineBuffer};
///
/// let mut buffer = SseLineBuffer::default();
/// assert!(buffer.push(b"data: {\"choices\":[{\"delta\":").is_empty());
/// let events = buffer.push(b"{\"content\":\"hi\"}}]}\n\ndata: [DONE]\n\n");
/// assert_eq!(
///     events,
///     vec![SseEvent::Delta("hi".to_string()), SseEvent::Done]
/// );
/// ```
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    pending: Vec<u8>,
}

impl SseLineBuffer {
    /// Feed a network chunk, returning every event completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.pending.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(newline) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            if let Some(event) = decode_line(line.trim_end_matches('\r')) {
                events.push(event);
            }
        }
        events
    }
}

fn decode_line(line: &str) -> Option<SseEvent> {
    let payload = line.strip_prefix("data:")?.trim_start();
    if payload == "[DONE]" {
        return Some(SseEvent::Done);
    }
    match serde_json::from_str::<StreamPayload>(payload) {
        Ok(parsed) => parsed
            .delta()
            .filter(|delta| !delta.is_empty())
            .map(|delta| SseEvent::Delta(delta.to_string())),
        Err(e) => {
            trace!(error = %e, "Skipping malformed SSE payload");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(text: &str) -> SseEvent {
        SseEvent::Delta(text.to_string())
    }

    #[test]
    fn decodes_complete_events() {
        let mut buffer = SseLineBuffer::default();
        let events = buffer.push(
            b"data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n\n\
              data: {\"choices\":[{\"delta\":{\"content\":\"b\"}}]}\n\n\
              data: [DONE]\n\n",
        );
        assert_eq!(events, vec![delta("a"), delta("b"), SseEvent::Done]);
    }

    #[test]
    fn multibyte_character_split_across_chunks() {
        let full = "data: {\"choices\":[{\"delta\":{\"content\":\"爆款\"}}]}\n".as_bytes();
        // Split in the middle of 爆 (a three-byte sequence).
        let cut = full.iter().position(|&b| b > 0x7f).unwrap() + 1;

        let mut buffer = SseLineBuffer::default();
        assert!(buffer.push(&full[..cut]).is_empty());
        assert_eq!(buffer.push(&full[cut..]), vec![delta("爆款")]);
    }

    #[test]
    fn skips_heartbeats_and_garbage() {
        let mut buffer = SseLineBuffer::default();
        let events = buffer.push(
            b": keep-alive comment\n\
              data: not json at all\n\
              data: {\"choices\":[{\"delta\":{\"content\":\"\"}}]}\n\
              data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n",
        );
        assert_eq!(events, vec![delta("ok")]);
    }

    #[test]
    fn unterminated_line_stays_buffered() {
        let mut buffer = SseLineBuffer::default();
        assert!(buffer
            .push(b"data: {\"choices\":[{\"delta\":{\"content\":\"x\"}}]}")
            .is_empty());
        assert_eq!(buffer.push(b"\n"), vec![delta("x")]);
    }
}
