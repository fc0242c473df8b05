//! Environment-driven service configuration.

use derive_getters::Getters;
use hotnote_error::{ConfigError, HotnoteResult};
use std::path::PathBuf;
use std::time::Duration;

/// Retry and backoff tuning for AI calls.
///
/// Delay between attempts is `min(base_delay * multiplier^attempt,
/// max_delay)` — exponential backoff, capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Additional attempts after the first, per model
    pub max_retries: u32,
    /// Base delay in milliseconds
    pub base_delay_ms: u64,
    /// Delay cap in milliseconds
    pub max_delay_ms: u64,
    /// Exponential multiplier
    pub backoff_multiplier: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 1_000,
            max_delay_ms: 10_000,
            backoff_multiplier: 2,
        }
    }
}

impl RetryConfig {
    /// Backoff delay before retrying after attempt number `attempt`
    /// (zero-based).
    ///
    /// # Examples
    ///
    /// ```
    /// use hotnote_core::RetryConfig;
    /// use std::time::Duration;
    ///
    /// let retry = RetryConfig::default();
    /// assert_eq!(retry.delay_for(0), Duration::from_millis(1_000));
    /// assert_eq!(retry.delay_for(1), Duration::from_millis(2_000));
    /// assert_eq!(retry.delay_for(10), Duration::from_millis(10_000));
    /// ```
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = (self.backoff_multiplier as u64).saturating_pow(attempt);
        let delay = self.base_delay_ms.saturating_mul(exp);
        Duration::from_millis(delay.min(self.max_delay_ms))
    }
}

/// Service configuration read from the environment.
///
/// Reads:
/// - `HOTNOTE_API_BASE_URL` (required) — chat-completions endpoint base
/// - `HOTNOTE_API_KEY` (required)
/// - `HOTNOTE_MODEL_LIST` (default "deepseek-chat") — comma separated,
///   failover order
/// - `HOTNOTE_TEMPERATURE` (default 0.8)
/// - `ENABLE_SCRAPING` (default true; "false" disables)
/// - `ENABLE_CACHE` (default true; "false" disables)
/// - `SCRAPER_AUTH_COOKIE` (optional; required only when a scrape runs)
/// - `REQUEST_TIMEOUT_MS` (default 15000) — per scrape page
/// - `TARGET_ITEM_COUNT` (default 40), `MAX_PAGES` (default 5)
/// - `MAX_CONTENT_LENGTH` (default 8000) — prompt-embedding cap
/// - `CACHE_TTL_SECS` (default 86400)
/// - `DATA_DIR` (default "data")
/// - `BIND_ADDR` (default "127.0.0.1:3000")
#[derive(Debug, Clone, Getters)]
pub struct HotnoteConfig {
    /// Chat-completions API base URL
    api_base_url: String,
    /// API key for the AI provider
    api_key: String,
    /// Candidate models in failover order
    model_list: Vec<String>,
    /// Sampling temperature
    temperature: f32,
    /// Whether hot-post scraping is enabled
    scraping_enabled: bool,
    /// Whether the reference cache is enabled
    cache_enabled: bool,
    /// Auth cookie for the scraped platform
    scraper_cookie: Option<String>,
    /// Per-page scrape request timeout
    request_timeout: Duration,
    /// Target number of hot posts per scrape
    target_item_count: usize,
    /// Page cap per scrape
    max_pages: usize,
    /// Maximum reference text length embedded into a prompt
    max_content_length: usize,
    /// Reference cache TTL
    cache_ttl: Duration,
    /// Durable data directory (history snapshots, cache file)
    data_dir: PathBuf,
    /// Listen address for the HTTP server
    bind_addr: String,
    /// AI retry/backoff tuning
    retry: RetryConfig,
}

impl HotnoteConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the API base URL or key is missing —
    /// the service cannot generate anything without them.
    pub fn from_env() -> HotnoteResult<Self> {
        let api_base_url = std::env::var("HOTNOTE_API_BASE_URL")
            .map_err(|_| ConfigError::new("HOTNOTE_API_BASE_URL not set"))?;
        let api_key = std::env::var("HOTNOTE_API_KEY")
            .map_err(|_| ConfigError::new("HOTNOTE_API_KEY not set"))?;

        let model_list = parse_model_list(
            &std::env::var("HOTNOTE_MODEL_LIST").unwrap_or_else(|_| "deepseek-chat".to_string()),
        );
        if model_list.is_empty() {
            return Err(ConfigError::new("HOTNOTE_MODEL_LIST is empty").into());
        }

        Ok(Self {
            api_base_url,
            api_key,
            model_list,
            temperature: env_parse("HOTNOTE_TEMPERATURE", 0.8),
            scraping_enabled: env_flag("ENABLE_SCRAPING", true),
            cache_enabled: env_flag("ENABLE_CACHE", true),
            scraper_cookie: std::env::var("SCRAPER_AUTH_COOKIE").ok().filter(|c| !c.is_empty()),
            request_timeout: Duration::from_millis(env_parse("REQUEST_TIMEOUT_MS", 15_000u64)),
            target_item_count: env_parse("TARGET_ITEM_COUNT", 40usize),
            max_pages: env_parse("MAX_PAGES", 5usize),
            max_content_length: env_parse("MAX_CONTENT_LENGTH", 8_000usize),
            cache_ttl: Duration::from_secs(env_parse("CACHE_TTL_SECS", 86_400u64)),
            data_dir: PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string())),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
            retry: RetryConfig::default(),
        })
    }

    /// Build a configuration directly, bypassing the environment.
    ///
    /// Intended for tests and embedding.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        api_base_url: impl Into<String>,
        api_key: impl Into<String>,
        model_list: Vec<String>,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            api_key: api_key.into(),
            model_list,
            temperature: 0.8,
            scraping_enabled: true,
            cache_enabled: true,
            scraper_cookie: None,
            request_timeout: Duration::from_millis(15_000),
            target_item_count: 40,
            max_pages: 5,
            max_content_length: 8_000,
            cache_ttl: Duration::from_secs(86_400),
            data_dir: data_dir.into(),
            bind_addr: "127.0.0.1:3000".to_string(),
            retry: RetryConfig::default(),
        }
    }

    /// Replace the scraping flag.
    pub fn with_scraping_enabled(mut self, enabled: bool) -> Self {
        self.scraping_enabled = enabled;
        self
    }

    /// Replace the scraper auth cookie.
    pub fn with_scraper_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.scraper_cookie = Some(cookie.into());
        self
    }

    /// Replace the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// Split a comma-separated model list, trimming blanks.
pub fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => value != "false",
        Err(_) => default,
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
