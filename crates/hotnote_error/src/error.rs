//! Top-level error wrapper types.

use crate::{
    ChannelClosedError, ConfigError, DataUnavailableError, GenerationError, HttpError, JsonError,
    ScrapeError, StorageError, ValidationError,
};

/// Discriminated union over every hotnote failure mode.
///
/// # Examples
///
/// ```
/// use hotnote_error::{HotnoteError, HttpError};
///
/// let http_err = HttpError::new("Connection refused");
/// let err: HotnoteError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HotnoteErrorKind {
    /// Missing or invalid configuration (credentials, endpoints)
    #[from(ConfigError)]
    Config(ConfigError),
    /// Reference data exhausted cache, live scrape and fallback cache
    #[from(DataUnavailableError)]
    DataUnavailable(DataUnavailableError),
    /// AI generation exhausted all candidate models and retries
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Structurally invalid AI output
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Downstream streaming consumer disconnected
    #[from(ChannelClosedError)]
    ChannelClosed(ChannelClosedError),
    /// Scrape transport or upstream API failure
    #[from(ScrapeError)]
    Scrape(ScrapeError),
    /// Snapshot or cache file I/O failure
    #[from(StorageError)]
    Storage(StorageError),
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

impl HotnoteErrorKind {
    /// Whether the caller may reasonably retry the failed operation.
    ///
    /// Configuration errors require operator intervention and channel
    /// closure means the consumer is already gone, so neither is
    /// recoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Config(_) | Self::ChannelClosed(_) => false,
            Self::DataUnavailable(_)
            | Self::Generation(_)
            | Self::Validation(_)
            | Self::Scrape(_)
            | Self::Storage(_)
            | Self::Http(_)
            | Self::Json(_) => true,
        }
    }
}

/// Hotnote error with kind discrimination.
///
/// # Examples
///
/// ```
/// use hotnote_error::{HotnoteResult, ConfigError};
///
/// fn might_fail() -> HotnoteResult<()> {
///     Err(ConfigError::new("Missing API key"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Hotnote Error: {}", _0)]
pub struct HotnoteError(Box<HotnoteErrorKind>);

impl HotnoteError {
    /// Create a new error from a kind.
    pub fn new(kind: HotnoteErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HotnoteErrorKind {
        &self.0
    }

    /// Whether the caller may reasonably retry the failed operation.
    pub fn is_recoverable(&self) -> bool {
        self.0.is_recoverable()
    }
}

// Generic From implementation for any type that converts to HotnoteErrorKind
impl<T> From<T> for HotnoteError
where
    T: Into<HotnoteErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for hotnote operations.
///
/// # Examples
///
/// ```
/// use hotnote_error::{HotnoteResult, HttpError};
///
/// fn fetch_data() -> HotnoteResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type HotnoteResult<T> = std::result::Result<T, HotnoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverability_split() {
        let config: HotnoteError = ConfigError::new("missing key").into();
        assert!(!config.is_recoverable());

        let closed: HotnoteError = ChannelClosedError::new("consumer gone").into();
        assert!(!closed.is_recoverable());

        let data: HotnoteError = DataUnavailableError::new("no cache, no scrape").into();
        assert!(data.is_recoverable());

        let generation: HotnoteError =
            GenerationError::new(vec!["m1".into(), "m2".into()], "timeout").into();
        assert!(generation.is_recoverable());
    }

    #[test]
    fn display_includes_kind() {
        let err: HotnoteError = HttpError::new("refused").into();
        let text = format!("{}", err);
        assert!(text.contains("Hotnote Error"));
        assert!(text.contains("refused"));
    }
}
