//! Error types for the hotnote content generation service.
//!
//! Each failure mode gets its own struct carrying the message plus the
//! source location where it was raised, wrapped into [`HotnoteErrorKind`]
//! and the boxed top-level [`HotnoteError`].
//!
//! The taxonomy distinguishes recoverable failures (reference data
//! unavailable, generation exhausted its retries) from non-recoverable
//! ones (missing configuration) and from the terminal
//! [`ChannelClosedError`] raised when the streaming consumer has
//! disconnected.

mod channel;
mod config;
mod data;
mod error;
mod generation;
mod http;
mod json;
mod scrape;
mod storage;
mod validation;

pub use channel::ChannelClosedError;
pub use config::ConfigError;
pub use data::DataUnavailableError;
pub use error::{HotnoteError, HotnoteErrorKind, HotnoteResult};
pub use generation::GenerationError;
pub use http::HttpError;
pub use json::JsonError;
pub use scrape::ScrapeError;
pub use storage::StorageError;
pub use validation::ValidationError;
