//! Streaming AI model client with retry and model failover.
//!
//! Talks to any OpenAI-compatible chat-completions endpoint. Every call
//! walks an ordered model list; each model gets a bounded number of
//! attempts with capped exponential backoff, and the first success
//! wins. A disconnected consumer short-circuits everything.

mod client;
mod sse;
mod transport;
mod validate;
mod wire;

pub use client::{AiClient, AttemptOutcome, ChunkSink};
pub use sse::{SseEvent, SseLineBuffer};
pub use transport::{ByteStream, ChatTransport, HttpTransport};
pub use validate::validate_analysis;
pub use wire::{ChatCompletion, ChatMessage, ChatRequest, ResponseFormat};
