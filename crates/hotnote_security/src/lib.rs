//! Sensitive content detection and redaction.
//!
//! [`SensitiveWordFilter`] scans text for a configured list of banned
//! terms and replaces matched spans with a placeholder. It is stateless
//! per call and is applied to each streamed fragment independently; a
//! term split across two fragment boundaries will not be detected
//! (known limitation — eliminating it would require overlap buffering
//! at chunk boundaries).

mod filter;

pub use filter::{Detection, FilterMode, SensitiveWordFilter};
