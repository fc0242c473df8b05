//! Output channel error types.

/// The downstream streaming consumer disconnected mid-stream.
///
/// Terminal and non-retryable: once the consumer is gone there is no
/// point attempting further writes, retries or failover models, and no
/// user-facing error is needed.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Channel Closed: {} at line {} in {}", message, line, file)]
pub struct ChannelClosedError {
    /// Context message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ChannelClosedError {
    /// Create a new ChannelClosedError at the current location.
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
