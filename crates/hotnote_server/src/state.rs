//! Application state and router assembly.

use axum::routing::{get, post};
use axum::Router;
use hotnote_cache::{ReferenceCache, ReferenceCacheConfig};
use hotnote_core::HotnoteConfig;
use hotnote_history::{HistoryStore, LifecycleManager};
use hotnote_models::AiClient;
use hotnote_scraper::{HotPostFetcher, HotPostScraper};
use hotnote_security::SensitiveWordFilter;
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub ai: AiClient,
    pub fetcher: Arc<HotPostFetcher>,
    pub history: Arc<LifecycleManager>,
    pub filter: Arc<SensitiveWordFilter>,
    pub config: Arc<HotnoteConfig>,
}

impl AppState {
    /// Wire up every component from one configuration.
    pub fn from_config(config: HotnoteConfig) -> Self {
        let cache = Arc::new(ReferenceCache::new(ReferenceCacheConfig {
            ttl_secs: config.cache_ttl().as_secs(),
            enabled: *config.cache_enabled(),
            data_dir: config.data_dir().clone(),
        }));
        let scraper = Arc::new(HotPostScraper::from_config(&config));
        let fetcher = Arc::new(HotPostFetcher::new(
            scraper,
            cache,
            *config.scraping_enabled(),
        ));
        let history = Arc::new(LifecycleManager::new(HistoryStore::new(config.data_dir())));
        Self {
            ai: AiClient::from_config(&config),
            fetcher,
            history,
            filter: Arc::new(SensitiveWordFilter::default()),
            config: Arc::new(config),
        }
    }
}

/// Build the full HTTP surface over `state`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate", post(crate::generate::generate))
        .route("/api/batch-generate", post(crate::batch::batch_generate))
        .route(
            "/api/generation-status",
            get(crate::status::generation_status).delete(crate::status::delete_record),
        )
        .route("/api/improve-content", post(crate::improve::improve_content))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
