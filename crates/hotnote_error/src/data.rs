//! Reference data availability error types.

/// Reference data fetch exhausted the cache, live scrape and fallback
/// cache.
///
/// Recoverable: the caller may proceed without reference data or retry
/// later.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Reference Data Unavailable: {} at line {} in {}", message, line, file)]
pub struct DataUnavailableError {
    /// The underlying cause
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl DataUnavailableError {
    /// Create a new DataUnavailableError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotnote_error::DataUnavailableError;
    ///
    /// let err = DataUnavailableError::new("scrape failed and no fallback cache");
    /// assert!(err.message.contains("no fallback"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
