//! Scrape error types.

/// Failure while collecting hot posts from the upstream platform.
///
/// Covers transport errors, upstream API errors and per-page timeouts.
/// A timeout is fatal for the scrape attempt it interrupts; the fetcher
/// then falls back to cached data.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Scrape Error: {} at line {} in {}", message, line, file)]
pub struct ScrapeError {
    /// The underlying error message
    pub message: String,
    /// Whether the attempt was aborted by a per-page timeout
    pub timed_out: bool,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ScrapeError {
    /// Create a new ScrapeError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            timed_out: false,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a new ScrapeError marking a per-page timeout.
    #[track_caller]
    pub fn timeout(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            timed_out: true,
            line: location.line(),
            file: location.file(),
        }
    }
}
