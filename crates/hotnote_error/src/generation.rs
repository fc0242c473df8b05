//! AI generation error types.

/// AI generation exhausted every candidate model and all retries.
///
/// Names every attempted model and carries the last underlying error,
/// so operators can see the full failover path in one log line.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Generation Failed: tried models [{}], last error: {} at line {} in {}",
    attempted_models.join(", "),
    last_error,
    line,
    file
)]
pub struct GenerationError {
    /// Every model attempted, in failover order
    pub attempted_models: Vec<String>,
    /// The last underlying error message
    pub last_error: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotnote_error::GenerationError;
    ///
    /// let err = GenerationError::new(vec!["gpt-4o".into(), "deepseek-chat".into()], "timeout");
    /// assert!(format!("{}", err).contains("gpt-4o"));
    /// assert!(format!("{}", err).contains("deepseek-chat"));
    /// ```
    #[track_caller]
    pub fn new(attempted_models: Vec<String>, last_error: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            attempted_models,
            last_error: last_error.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
