//! Hot-post scraping and cached reference data fetching.
//!
//! [`HotPostScraper`] pulls paginated search results from the platform
//! API and renders them into a prompt-ready text block.
//! [`HotPostFetcher`] layers the reference cache over it: fresh cache
//! entry, then live scrape, then same-category fallback.

mod fetcher;
mod scraper;
mod wire;

pub use fetcher::{HotPostFetcher, ReferenceScraper, ScrapedReference};
pub use scraper::HotPostScraper;
pub use wire::{SearchItem, SearchRequest, SearchResponse};
