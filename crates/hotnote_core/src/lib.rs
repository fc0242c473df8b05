//! Core data types for the hotnote content generation service.
//!
//! Everything the other crates exchange lives here: the structured
//! [`GeneratedContent`] a generation produces, the [`GenerationRecord`]
//! and [`GenerationTask`] entities tracked by the lifecycle manager,
//! batch request types, and the environment-driven [`HotnoteConfig`].

mod config;
mod content;
mod post;
mod record;
mod request;
mod task;

pub use config::{HotnoteConfig, RetryConfig, parse_model_list};
pub use content::GeneratedContent;
pub use post::PostSummary;
pub use record::{GenerationRecord, RecordStatus};
pub use request::{BatchItem, BatchRequest};
pub use task::{GenerationTask, TaskKind, TaskStatus};
