//! Chat-completions wire types (OpenAI-compatible).

use serde::{Deserialize, Serialize};

/// Outbound chat-completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    /// Single-user-message request, the only shape this service sends.
    pub fn user(model: impl Into<String>, prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.into(),
            }],
            temperature,
            stream: false,
            response_format: None,
        }
    }

    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }

    pub fn json_object(mut self) -> Self {
        self.response_format = Some(ResponseFormat::json_object());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// `response_format` field, only ever `{"type": "json_object"}`.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

/// Non-streaming chat-completions response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

impl ChatCompletion {
    /// Content of the first choice, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// One streamed SSE payload.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamPayload {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

impl StreamPayload {
    /// Content delta of the first choice, if any.
    pub fn delta(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.delta.content.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamChoice {
    #[serde(default)]
    pub delta: StreamDelta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamDelta {
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_without_empty_response_format() {
        let req = ChatRequest::user("deepseek-chat", "hi", 0.8);
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("response_format"));
        assert!(json.contains("\"stream\":false"));

        let req = req.streaming().json_object();
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"type\":\"json_object\""));
        assert!(json.contains("\"stream\":true"));
    }

    #[test]
    fn completion_content_extraction() {
        let body = r#"{"choices":[{"message":{"content":"hello"}}]}"#;
        let completion: ChatCompletion = serde_json::from_str(body).unwrap();
        assert_eq!(completion.content(), Some("hello"));

        let empty: ChatCompletion = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(empty.content(), None);
    }

    #[test]
    fn stream_payload_delta_extraction() {
        let body = r#"{"choices":[{"delta":{"content":"片"}}]}"#;
        let payload: StreamPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.delta(), Some("片"));

        // role-only first chunk carries no content
        let body = r#"{"choices":[{"delta":{"role":"assistant"}}]}"#;
        let payload: StreamPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.delta(), None);
    }
}
