//! HTTP transport seam for the chat-completions API.

use crate::wire::{ChatCompletion, ChatRequest};
use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use hotnote_error::{HotnoteResult, HttpError, JsonError};
use std::pin::Pin;
use tracing::{debug, instrument};

/// Raw response bytes in arrival order.
pub type ByteStream = Pin<Box<dyn Stream<Item = HotnoteResult<Vec<u8>>> + Send>>;

/// Transport over which chat-completions calls travel.
///
/// [`AiClient`](crate::AiClient) is generic over this seam so retry and
/// failover behavior can be exercised without a network.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Execute a non-streaming completion.
    async fn complete(&self, request: &ChatRequest) -> HotnoteResult<ChatCompletion>;

    /// Open a streaming completion, returning the raw byte stream.
    async fn open_stream(&self, request: &ChatRequest) -> HotnoteResult<ByteStream>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpTransport {
    /// Point the transport at an OpenAI-compatible base URL.
    ///
    /// `base_url` is the provider base (typically ending in `/v1`); the
    /// `chat/completions` path is appended here.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }

    async fn send(&self, request: &ChatRequest) -> HotnoteResult<reqwest::Response> {
        debug!(endpoint = %self.endpoint, model = %request.model, stream = request.stream, "Sending chat-completions request");
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::new(format!("API error {}: {}", status, body)).into());
        }
        Ok(response)
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: &ChatRequest) -> HotnoteResult<ChatCompletion> {
        let response = self.send(request).await?;
        let completion = response
            .json::<ChatCompletion>()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read response body: {}", e)))?;
        Ok(completion)
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn open_stream(&self, request: &ChatRequest) -> HotnoteResult<ByteStream> {
        let response = self.send(request).await?;
        let stream = response.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| HttpError::new(format!("Stream error: {}", e)).into())
        });
        Ok(Box::pin(stream))
    }
}

// Used by analyze when the model returns fenced JSON despite
// response_format; kept here with the other body handling.
pub(crate) fn parse_json_lenient(content: &str) -> Result<serde_json::Value, JsonError> {
    let trimmed = strip_code_fences(content);
    serde_json::from_str(trimmed).map_err(|e| JsonError::new(format!("Invalid JSON body: {}", e)))
}

/// Remove a surrounding markdown code fence, if present.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Optional language tag on the opening fence line.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches(['\r', '\n'])
        .trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}
