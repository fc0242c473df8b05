//! Reference data cache with TTL expiry and category-based fallback.
//!
//! Scraped hot-post text is cached per normalized keyword. A fresh
//! entry (within TTL) short-circuits a live scrape; an expired entry is
//! a miss for direct lookup but stays eligible as same-category
//! fallback data when a live scrape fails.
//!
//! Every `put` snapshots the whole store to a JSON file, last-write-wins
//! per keyword with no cross-key transaction.

mod cache;
mod category;

pub use cache::{CacheSource, ReferenceCache, ReferenceCacheConfig, ReferenceCacheEntry};
pub use category::TopicCategory;
