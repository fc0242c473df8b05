//! Chat-completions client with per-model retry and ordered failover.

use crate::sse::{SseEvent, SseLineBuffer};
use crate::transport::{parse_json_lenient, ChatTransport, HttpTransport};
use crate::validate::validate_analysis;
use crate::wire::ChatRequest;
use futures_util::StreamExt;
use hotnote_core::{HotnoteConfig, RetryConfig};
use hotnote_error::{GenerationError, HotnoteResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Consumer callback for streamed content fragments.
///
/// An empty fragment is a liveness ping, not content. Returning an
/// error (normally [`ChannelClosedError`](hotnote_error::ChannelClosedError))
/// tells the client the consumer is gone and aborts all retries.
pub type ChunkSink<'a> = dyn Fn(&str) -> HotnoteResult<()> + Send + Sync + 'a;

/// How far along the stream waits for the next delta before pinging the
/// consumer with an empty fragment.
const KEEP_ALIVE: Duration = Duration::from_millis(500);

/// Result of one attempt against one model.
///
/// `Invalid` and `Transport` are both retryable and the retry loop
/// treats them identically; they are kept apart only so logs say which
/// side failed.
#[derive(Debug)]
pub enum AttemptOutcome<T> {
    /// Attempt produced a usable result.
    Success(T),
    /// The model responded but the payload failed validation.
    Invalid(Vec<String>),
    /// The request never produced a complete response.
    Transport(String),
}

/// AI client walking an ordered model list with bounded retries.
///
/// Each candidate model gets `max_retries + 1` attempts with capped
/// exponential backoff between them; the first success anywhere wins.
/// Exhausting every model yields a [`GenerationError`] naming all of
/// them. A non-recoverable error (consumer disconnect, broken
/// configuration) aborts immediately without trying further models.
#[derive(Clone)]
pub struct AiClient {
    transport: Arc<dyn ChatTransport>,
    default_models: Vec<String>,
    temperature: f32,
    retry: RetryConfig,
}

impl AiClient {
    /// Build a production client from service configuration.
    pub fn from_config(config: &HotnoteConfig) -> Self {
        Self {
            transport: Arc::new(HttpTransport::new(
                config.api_base_url(),
                config.api_key().clone(),
            )),
            default_models: config.model_list().clone(),
            temperature: *config.temperature(),
            retry: *config.retry(),
        }
    }

    /// Build a client over an arbitrary transport.
    pub fn with_transport(
        transport: Arc<dyn ChatTransport>,
        default_models: Vec<String>,
        temperature: f32,
        retry: RetryConfig,
    ) -> Self {
        Self {
            transport,
            default_models,
            temperature,
            retry,
        }
    }

    /// Non-streaming analysis call returning validated JSON.
    ///
    /// Requests `response_format: json_object` except from models whose
    /// name contains `gemini` (they reject the field). The response
    /// must be valid JSON (a markdown code fence around it is
    /// tolerated) and must satisfy `required_fields`; anything else
    /// counts as a failed attempt and is retried.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn analyze_with_retry(
        &self,
        prompt: &str,
        required_fields: &[&str],
        model_override: Option<&str>,
    ) -> HotnoteResult<serde_json::Value> {
        let models = self.candidate_models(model_override);
        self.with_failover(&models, |model| async move {
            let mut request = ChatRequest::user(model, prompt, self.temperature);
            if !model.contains("gemini") {
                request = request.json_object();
            }

            let completion = match self.transport.complete(&request).await {
                Ok(completion) => completion,
                Err(e) if e.is_recoverable() => return Ok(AttemptOutcome::Transport(e.to_string())),
                Err(e) => return Err(e),
            };

            let Some(content) = completion.content().filter(|c| !c.trim().is_empty()) else {
                return Ok(AttemptOutcome::Invalid(vec![
                    "empty completion content".to_string(),
                ]));
            };
            let document = match parse_json_lenient(content) {
                Ok(document) => document,
                Err(e) => return Ok(AttemptOutcome::Invalid(vec![e.to_string()])),
            };

            let problems = validate_analysis(&document, required_fields);
            if problems.is_empty() {
                Ok(AttemptOutcome::Success(document))
            } else {
                Ok(AttemptOutcome::Invalid(problems))
            }
        })
        .await
    }

    /// Streaming generation call delivering deltas through `on_chunk`.
    ///
    /// SSE `data:` lines are reassembled across network chunk
    /// boundaries; malformed payloads and provider heartbeats are
    /// skipped. If more than 500 ms pass without a content delta the
    /// sink receives an empty fragment so a disconnected consumer is
    /// noticed promptly. A stream that ends without delivering any
    /// content counts as a failed attempt.
    #[instrument(skip(self, prompt, on_chunk), fields(prompt_len = prompt.len()))]
    pub async fn generate_stream_with_retry(
        &self,
        prompt: &str,
        on_chunk: &ChunkSink<'_>,
        model_override: Option<&str>,
    ) -> HotnoteResult<()> {
        let models = self.candidate_models(model_override);
        self.with_failover(&models, |model| async move {
            let request = ChatRequest::user(model, prompt, self.temperature).streaming();
            let mut stream = match self.transport.open_stream(&request).await {
                Ok(stream) => stream,
                Err(e) if e.is_recoverable() => return Ok(AttemptOutcome::Transport(e.to_string())),
                Err(e) => return Err(e),
            };

            let mut buffer = SseLineBuffer::default();
            let mut delivered = 0usize;
            'receive: loop {
                match tokio::time::timeout(KEEP_ALIVE, stream.next()).await {
                    // Liveness ping; only fails if the consumer hung up.
                    Err(_elapsed) => on_chunk("")?,
                    Ok(None) => break,
                    Ok(Some(Err(e))) if e.is_recoverable() => {
                        return Ok(AttemptOutcome::Transport(e.to_string()));
                    }
                    Ok(Some(Err(e))) => return Err(e),
                    Ok(Some(Ok(bytes))) => {
                        for event in buffer.push(&bytes) {
                            match event {
                                SseEvent::Delta(text) => {
                                    on_chunk(&text)?;
                                    delivered += 1;
                                }
                                SseEvent::Done => break 'receive,
                            }
                        }
                    }
                }
            }

            if delivered == 0 {
                Ok(AttemptOutcome::Invalid(vec![
                    "stream produced no content".to_string(),
                ]))
            } else {
                debug!(model = %model, deltas = delivered, "Streaming generation complete");
                Ok(AttemptOutcome::Success(()))
            }
        })
        .await
    }

    /// Ordered candidate list: the caller's override, or the default
    /// failover list from configuration.
    fn candidate_models(&self, model_override: Option<&str>) -> Vec<String> {
        match model_override {
            Some(model) if !model.trim().is_empty() => vec![model.trim().to_string()],
            _ => self.default_models.clone(),
        }
    }

    /// Drive `attempt` over the model list with retry and backoff.
    ///
    /// `Err` from an attempt is terminal and propagates untouched;
    /// retryable failures come back as [`AttemptOutcome`] variants.
    async fn with_failover<'m, T, F, Fut>(
        &self,
        models: &'m [String],
        mut attempt: F,
    ) -> HotnoteResult<T>
    where
        F: FnMut(&'m str) -> Fut,
        Fut: std::future::Future<Output = HotnoteResult<AttemptOutcome<T>>>,
    {
        let mut last_failure = "no candidate models configured".to_string();

        for model in models {
            for attempt_no in 0..=self.retry.max_retries {
                match attempt(model.as_str()).await? {
                    AttemptOutcome::Success(value) => return Ok(value),
                    AttemptOutcome::Invalid(problems) => {
                        last_failure = problems.join("; ");
                        warn!(model = %model, attempt = attempt_no, problems = %last_failure, "Attempt returned invalid payload");
                    }
                    AttemptOutcome::Transport(message) => {
                        last_failure = message;
                        warn!(model = %model, attempt = attempt_no, error = %last_failure, "Attempt failed in transport");
                    }
                }
                if attempt_no < self.retry.max_retries {
                    tokio::time::sleep(self.retry.delay_for(attempt_no)).await;
                }
            }
            warn!(model = %model, "Model exhausted its attempts, failing over");
        }

        Err(GenerationError::new(models.to_vec(), last_failure).into())
    }
}
