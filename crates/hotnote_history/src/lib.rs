//! Generation record and task lifecycle with file-backed history.
//!
//! [`HistoryStore`] persists full JSON snapshots of both collections;
//! [`LifecycleManager`] is the sole writer, holding the in-memory maps
//! behind a mutex and flushing after every mutation.

mod manager;
mod store;

pub use manager::LifecycleManager;
pub use store::HistoryStore;
