//! Section parser for streamed generated markdown.
//!
//! Generated copy arrives as semi-structured markdown carrying up to
//! seven `##` section markers (the prompt contract). Parsing is pure
//! and stateless: re-running it on a prefix-extended buffer is the
//! expected usage while a stream is still growing, and each call fully
//! recomputes all seven fields.

mod markers;
mod parse;
mod sanitize;

pub use markers::{Section, section_pattern};
pub use parse::parse_generated_content;
pub use sanitize::sanitize_text;
