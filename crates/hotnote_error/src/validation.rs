//! AI response validation error types.

/// Structurally invalid AI output (empty content, malformed JSON,
/// missing required fields, zero streamed bytes).
///
/// Absorbed by the retry loop; only escalates across the component
/// boundary as a [`crate::GenerationError`] when persistent.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", errors.join("; "), line, file)]
pub struct ValidationError {
    /// Every validation failure found in the response
    pub errors: Vec<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError at the current location.
    #[track_caller]
    pub fn new(errors: Vec<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            errors,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a ValidationError with a single message.
    #[track_caller]
    pub fn single(message: impl Into<String>) -> Self {
        Self::new(vec![message.into()])
    }
}
