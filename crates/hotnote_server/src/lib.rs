//! HTTP API and generation pipeline.
//!
//! The composition root lives in [`AppState`]; [`create_router`] wires
//! the four API operations plus a health check over it.

mod batch;
mod error;
mod generate;
mod improve;
mod pipeline;
mod prompts;
mod state;
mod status;

pub use error::ApiError;
pub use state::{create_router, AppState};
