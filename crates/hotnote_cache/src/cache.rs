//! Reference cache store implementation.

use crate::TopicCategory;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use hotnote_core::PostSummary;
use hotnote_error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

const SNAPSHOT_FILE: &str = "reference_cache.json";

/// Where a cache entry's data originally came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheSource {
    /// Freshly scraped from the platform
    Scraped,
    /// Served as same-category fallback
    Fallback,
}

/// Cached scrape result for one keyword.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ReferenceCacheEntry {
    /// The keyword this entry was written for
    keyword: String,
    /// Formatted hot-post text block
    data: String,
    /// Structured post summaries behind the text block
    items: Vec<PostSummary>,
    /// Provenance of the data
    source: CacheSource,
    /// Wall-clock write time; drives both TTL and fallback recency.
    /// Wall-clock (not monotonic) because entries persist across
    /// restarts.
    timestamp: DateTime<Utc>,
}

impl ReferenceCacheEntry {
    /// Whether this entry is older than `ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.timestamp);
        age.num_milliseconds() > ttl.as_millis() as i64
    }
}

/// Configuration for the reference cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceCacheConfig {
    /// Entry TTL in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Directory holding the JSON snapshot
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_ttl_secs() -> u64 {
    86_400 // 24 hours
}

fn default_enabled() -> bool {
    true
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for ReferenceCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            enabled: default_enabled(),
            data_dir: default_data_dir(),
        }
    }
}

/// Keyed cache for scraped reference text with freshness and
/// category-based fallback lookup.
///
/// Concurrent writers for different keys are fine: each `put` is a full
/// upsert, last-write-wins, and the on-disk snapshot is rewritten
/// atomically (temp file + rename) after every write.
///
/// # Examples
///
/// ```no_run
/// use hotnote_cache::{CacheSource, ReferenceCache, ReferenceCacheConfig};
///
/// let cache = ReferenceCache::new(ReferenceCacheConfig::default());
/// cache.put("护肤心得", "formatted hot posts...", vec![], CacheSource::Scraped);
///
/// if let Some(entry) = cache.get("护肤心得") {
///     println!("cached: {}", entry.data());
/// }
/// ```
pub struct ReferenceCache {
    config: ReferenceCacheConfig,
    entries: Mutex<HashMap<String, ReferenceCacheEntry>>,
}

impl ReferenceCache {
    /// Create a cache, loading any prior snapshot from disk.
    ///
    /// A missing or unreadable snapshot is logged and treated as an
    /// empty cache.
    pub fn new(config: ReferenceCacheConfig) -> Self {
        let entries = load_snapshot(&config.data_dir.join(SNAPSHOT_FILE));
        tracing::debug!(
            ttl_secs = config.ttl_secs,
            enabled = config.enabled,
            loaded = entries.len(),
            "Creating reference cache"
        );
        Self {
            config,
            entries: Mutex::new(entries),
        }
    }

    /// Get the fresh entry for `keyword`.
    ///
    /// Returns None when the cache is disabled, the key is absent, or
    /// the entry is past its TTL. Expired entries are left in place;
    /// they remain fallback-eligible.
    #[tracing::instrument(skip(self))]
    pub fn get(&self, keyword: &str) -> Option<ReferenceCacheEntry> {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, returning None");
            return None;
        }

        let key = normalize_key(keyword);
        let entries = self.entries.lock().expect("cache lock poisoned");
        let entry = entries.get(&key)?;
        if entry.is_expired(self.ttl()) {
            tracing::debug!(keyword = %key, "Cache entry expired");
            return None;
        }
        tracing::debug!(keyword = %key, items = entry.items.len(), "Cache hit");
        Some(entry.clone())
    }

    /// Upsert the entry for `keyword` and snapshot the store to disk.
    ///
    /// Snapshot write failures are logged and swallowed: a cache write
    /// must never fail the fetch it is attached to.
    #[tracing::instrument(skip(self, data, items), fields(items = items.len()))]
    pub fn put(&self, keyword: &str, data: impl Into<String>, items: Vec<PostSummary>, source: CacheSource) {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, skipping put");
            return;
        }

        let key = normalize_key(keyword);
        let entry = ReferenceCacheEntry {
            keyword: key.clone(),
            data: data.into(),
            items,
            source,
            timestamp: Utc::now(),
        };

        let snapshot = {
            let mut entries = self.entries.lock().expect("cache lock poisoned");
            entries.insert(key, entry);
            entries.clone()
        };

        if let Err(e) = write_snapshot(&self.config.data_dir, &snapshot) {
            tracing::warn!(error = %e, "Failed to persist reference cache snapshot");
        }
    }

    /// Find the best same-category fallback entry for `keyword`.
    ///
    /// TTL is ignored; entries written for `keyword` itself are
    /// excluded. Returns the most recently written category match.
    #[tracing::instrument(skip(self))]
    pub fn get_fallback(&self, keyword: &str) -> Option<ReferenceCacheEntry> {
        if !self.config.enabled {
            return None;
        }

        let key = normalize_key(keyword);
        let category = TopicCategory::classify(&key);
        let entries = self.entries.lock().expect("cache lock poisoned");

        let fallback = entries
            .values()
            .filter(|entry| entry.keyword != key)
            .filter(|entry| TopicCategory::classify(&entry.keyword) == category)
            .max_by_key(|entry| entry.timestamp)?;

        tracing::debug!(
            keyword = %key,
            fallback_keyword = %fallback.keyword,
            ?category,
            "Serving fallback cache entry"
        );
        Some(fallback.clone())
    }

    /// Number of stored entries, fresh or expired.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl_secs)
    }
}

fn normalize_key(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

fn load_snapshot(path: &Path) -> HashMap<String, ReferenceCacheEntry> {
    match std::fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Corrupt cache snapshot, starting empty");
                HashMap::new()
            }
        },
        Err(_) => HashMap::new(),
    }
}

fn write_snapshot(
    data_dir: &Path,
    entries: &HashMap<String, ReferenceCacheEntry>,
) -> Result<(), StorageError> {
    std::fs::create_dir_all(data_dir)?;
    let path = data_dir.join(SNAPSHOT_FILE);
    let tmp = data_dir.join(format!("{SNAPSHOT_FILE}.tmp"));

    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| StorageError::new(format!("serialize cache snapshot: {e}")))?;
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, &path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cache(ttl_secs: u64, dir: &Path) -> ReferenceCache {
        ReferenceCache::new(ReferenceCacheConfig {
            ttl_secs,
            enabled: true,
            data_dir: dir.to_path_buf(),
        })
    }

    #[test]
    fn hit_within_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let cache = test_cache(60, dir.path());
        cache.put("护肤心得", "posts", vec![], CacheSource::Scraped);

        let entry = cache.get("护肤心得").unwrap();
        assert_eq!(entry.data(), "posts");
        assert_eq!(*entry.source(), CacheSource::Scraped);
    }

    #[test]
    fn miss_past_ttl_but_fallback_eligible() {
        let dir = tempfile::tempdir().unwrap();
        // Zero TTL: every entry is immediately expired.
        let cache = test_cache(0, dir.path());
        cache.put("护肤心得", "old posts", vec![], CacheSource::Scraped);

        assert!(cache.get("护肤心得").is_none());
        // Same category, different keyword: still served as fallback.
        let fallback = cache.get_fallback("美妆新手").unwrap();
        assert_eq!(fallback.keyword(), "护肤心得");
    }

    #[test]
    fn fallback_excludes_own_key_and_other_categories() {
        let dir = tempfile::tempdir().unwrap();
        let cache = test_cache(60, dir.path());
        cache.put("护肤心得", "beauty posts", vec![], CacheSource::Scraped);
        cache.put("美食探店", "food posts", vec![], CacheSource::Scraped);

        // Own key excluded even though it exists.
        assert!(cache.get_fallback("护肤心得").is_none());
        // Travel keyword matches neither stored category.
        assert!(cache.get_fallback("周末旅行").is_none());
        // Food keyword finds the food entry.
        let fallback = cache.get_fallback("家常菜食谱").unwrap();
        assert_eq!(fallback.data(), "food posts");
    }

    #[test]
    fn fallback_prefers_most_recent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = test_cache(60, dir.path());
        cache.put("护肤心得", "older", vec![], CacheSource::Scraped);
        cache.put("面膜测评", "newer", vec![], CacheSource::Scraped);

        let fallback = cache.get_fallback("美妆推荐").unwrap();
        assert_eq!(fallback.data(), "newer");
    }

    #[test]
    fn put_overwrites_prior_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = test_cache(60, dir.path());
        cache.put("护肤心得", "first", vec![], CacheSource::Scraped);
        cache.put("护肤心得", "second", vec![], CacheSource::Scraped);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("护肤心得").unwrap().data(), "second");
    }

    #[test]
    fn snapshot_round_trips_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let cache = test_cache(60, dir.path());
            cache.put("护肤心得", "persisted", vec![], CacheSource::Scraped);
        }
        let reloaded = test_cache(60, dir.path());
        assert_eq!(reloaded.get("护肤心得").unwrap().data(), "persisted");
    }

    #[test]
    fn disabled_cache_returns_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ReferenceCache::new(ReferenceCacheConfig {
            ttl_secs: 60,
            enabled: false,
            data_dir: dir.path().to_path_buf(),
        });
        cache.put("护肤心得", "posts", vec![], CacheSource::Scraped);
        assert!(cache.get("护肤心得").is_none());
        assert!(cache.get_fallback("美妆").is_none());
    }

    #[test]
    fn keys_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let cache = test_cache(60, dir.path());
        cache.put("  Skincare Tips ", "posts", vec![], CacheSource::Scraped);
        assert!(cache.get("skincare tips").is_some());
    }
}
