//! Cache-first reference data fetching with fallback.

use crate::scraper::HotPostScraper;
use async_trait::async_trait;
use hotnote_cache::{CacheSource, ReferenceCache};
use hotnote_core::PostSummary;
use hotnote_error::{DataUnavailableError, HotnoteResult};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// A scraped reference block plus the structured posts behind it.
pub type ScrapedReference = (String, Vec<PostSummary>);

/// Seam over the live scraper so the fetch chain is testable offline.
#[async_trait]
pub trait ReferenceScraper: Send + Sync {
    async fn scrape(&self, keyword: &str) -> HotnoteResult<ScrapedReference>;
}

#[async_trait]
impl ReferenceScraper for HotPostScraper {
    async fn scrape(&self, keyword: &str) -> HotnoteResult<ScrapedReference> {
        HotPostScraper::scrape(self, keyword).await
    }
}

/// Fetches reference text for a keyword through the full chain: fresh
/// cache entry, live scrape (cached best-effort on success), then
/// same-category fallback entry.
///
/// With scraping disabled the fetch returns `Ok(None)` immediately and
/// never consults the cache; generation proceeds without reference
/// data.
pub struct HotPostFetcher {
    scraper: Arc<dyn ReferenceScraper>,
    cache: Arc<ReferenceCache>,
    scraping_enabled: bool,
}

impl HotPostFetcher {
    pub fn new(
        scraper: Arc<dyn ReferenceScraper>,
        cache: Arc<ReferenceCache>,
        scraping_enabled: bool,
    ) -> Self {
        Self {
            scraper,
            cache,
            scraping_enabled,
        }
    }

    /// Fetch reference text for `keyword`.
    ///
    /// # Errors
    ///
    /// [`DataUnavailableError`] when the scrape failed and no fallback
    /// entry exists; the message carries the scrape cause.
    #[instrument(skip(self))]
    pub async fn fetch(&self, keyword: &str) -> HotnoteResult<Option<String>> {
        if !self.scraping_enabled {
            debug!("Scraping disabled, generating without reference data");
            return Ok(None);
        }

        if let Some(entry) = self.cache.get(keyword) {
            debug!(items = entry.items().len(), "Serving cached reference data");
            return Ok(Some(entry.data().clone()));
        }

        let scrape_cause = match self.scraper.scrape(keyword).await {
            Ok((block, posts)) => {
                self.cache
                    .put(keyword, block.clone(), posts, CacheSource::Scraped);
                return Ok(Some(block));
            }
            Err(e) => {
                warn!(error = %e, "Live scrape failed, trying fallback cache");
                e
            }
        };

        if let Some(entry) = self.cache.get_fallback(keyword) {
            debug!(fallback_keyword = %entry.keyword(), "Serving fallback reference data");
            return Ok(Some(entry.data().clone()));
        }

        Err(DataUnavailableError::new(format!(
            "No reference data: scrape failed ({}) and no usable cache entry",
            scrape_cause
        ))
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotnote_cache::ReferenceCacheConfig;
    use hotnote_error::{HotnoteErrorKind, ScrapeError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockScraper {
        result: Option<ScrapedReference>,
        calls: AtomicUsize,
    }

    impl MockScraper {
        fn succeeding(block: &str) -> Arc<Self> {
            Arc::new(Self {
                result: Some((block.to_string(), vec![PostSummary::default()])),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                result: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReferenceScraper for MockScraper {
        async fn scrape(&self, _keyword: &str) -> HotnoteResult<ScrapedReference> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Some(reference) => Ok(reference.clone()),
                None => Err(ScrapeError::new("upstream rejected the request").into()),
            }
        }
    }

    fn cache_in(dir: &std::path::Path) -> Arc<ReferenceCache> {
        Arc::new(ReferenceCache::new(ReferenceCacheConfig {
            ttl_secs: 3600,
            enabled: true,
            data_dir: dir.to_path_buf(),
        }))
    }

    #[tokio::test]
    async fn disabled_scraping_skips_everything() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());
        cache.put("护肤", "cached block", vec![], CacheSource::Scraped);

        let scraper = MockScraper::succeeding("fresh block");
        let fetcher = HotPostFetcher::new(scraper.clone(), cache, false);

        assert_eq!(fetcher.fetch("护肤").await.unwrap(), None);
        assert_eq!(scraper.calls(), 0);
    }

    #[tokio::test]
    async fn cache_hit_short_circuits_the_scraper() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());
        cache.put("护肤", "cached block", vec![], CacheSource::Scraped);

        let scraper = MockScraper::succeeding("fresh block");
        let fetcher = HotPostFetcher::new(scraper.clone(), cache, true);

        assert_eq!(
            fetcher.fetch("护肤").await.unwrap(),
            Some("cached block".to_string())
        );
        assert_eq!(scraper.calls(), 0);
    }

    #[tokio::test]
    async fn successful_scrape_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());
        let scraper = MockScraper::succeeding("fresh block");
        let fetcher = HotPostFetcher::new(scraper.clone(), cache.clone(), true);

        assert_eq!(
            fetcher.fetch("护肤").await.unwrap(),
            Some("fresh block".to_string())
        );
        assert_eq!(scraper.calls(), 1);
        assert_eq!(cache.get("护肤").unwrap().data(), "fresh block");
    }

    #[tokio::test]
    async fn failed_scrape_serves_same_category_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());
        // Same category (beauty), different keyword.
        cache.put("面膜推荐", "fallback block", vec![], CacheSource::Scraped);

        let fetcher = HotPostFetcher::new(MockScraper::failing(), cache, true);
        assert_eq!(
            fetcher.fetch("护肤").await.unwrap(),
            Some("fallback block".to_string())
        );
    }

    #[tokio::test]
    async fn exhausted_chain_reports_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());
        let fetcher = HotPostFetcher::new(MockScraper::failing(), cache, true);

        let err = fetcher.fetch("护肤").await.unwrap_err();
        assert!(matches!(err.kind(), HotnoteErrorKind::DataUnavailable(_)));
        assert!(format!("{}", err).contains("upstream rejected the request"));
    }
}
