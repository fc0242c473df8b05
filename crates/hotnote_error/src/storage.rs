//! Storage error types.

/// Snapshot or cache file I/O error with source location.
///
/// Storage failures attached to a primary operation (cache put,
/// history flush) are logged and swallowed by the caller; they must
/// never fail the operation they ride along with.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", message, line, file)]
pub struct StorageError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl StorageError {
    /// Create a new StorageError with the given message at the current location.
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

impl From<std::io::Error> for StorageError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}
