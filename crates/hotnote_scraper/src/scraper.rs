//! Paginated hot-post scraper.

use crate::wire::{SearchRequest, SearchResponse};
use hotnote_core::{HotnoteConfig, PostSummary};
use hotnote_error::{ConfigError, HotnoteResult, ScrapeError};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

const SEARCH_ENDPOINT: &str = "https://edith.xiaohongshu.com/api/sns/web/v1/search/notes";
const DESC_PREVIEW_CHARS: usize = 100;

/// Scrapes popularity-sorted posts for a keyword and formats them into
/// a prompt-ready reference block.
///
/// Pages are fetched until the target item count is reached, the page
/// cap is hit, a page comes back empty, or the API reports no more
/// data. Each page request carries its own timeout and a fresh trace
/// id.
#[derive(Debug, Clone)]
pub struct HotPostScraper {
    http: reqwest::Client,
    endpoint: String,
    cookie: Option<String>,
    timeout: Duration,
    target_item_count: usize,
    max_pages: usize,
}

impl HotPostScraper {
    pub fn from_config(config: &HotnoteConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: SEARCH_ENDPOINT.to_string(),
            cookie: config.scraper_cookie().clone(),
            timeout: *config.request_timeout(),
            target_item_count: *config.target_item_count(),
            max_pages: *config.max_pages(),
        }
    }

    /// Point the scraper at a different endpoint (proxies, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Scrape hot posts for `keyword`.
    ///
    /// Returns the formatted reference block together with the
    /// normalized post summaries behind it.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when no auth cookie is configured; otherwise
    /// [`ScrapeError`] for transport, timeout and upstream failures.
    #[instrument(skip(self))]
    pub async fn scrape(&self, keyword: &str) -> HotnoteResult<(String, Vec<PostSummary>)> {
        let Some(cookie) = self.cookie.as_deref() else {
            return Err(ConfigError::new("SCRAPER_AUTH_COOKIE not set").into());
        };

        let mut posts: Vec<PostSummary> = Vec::new();
        let mut page = 1;
        while posts.len() < self.target_item_count && page <= self.max_pages {
            let response = self.fetch_page(keyword, page, cookie).await?;

            if !response.success {
                let msg = response.msg.unwrap_or_else(|| "unknown error".to_string());
                return Err(ScrapeError::new(format!("Search API error: {}", msg)).into());
            }
            let items = response
                .data
                .and_then(|data| Some((data.items?, data.has_more)))
                .ok_or_else(|| ScrapeError::new("Unexpected search API response structure"))?;
            let (items, has_more) = items;

            let page_posts: Vec<PostSummary> = items
                .iter()
                .filter(|item| item.is_note())
                .map(|item| item.summarize())
                .collect();
            debug!(page, notes = page_posts.len(), has_more, "Fetched search page");
            if page_posts.is_empty() {
                break;
            }
            posts.extend(page_posts);
            page += 1;

            if !has_more {
                break;
            }
        }

        if posts.is_empty() {
            return Err(ScrapeError::new("No notes found for keyword").into());
        }
        posts.truncate(self.target_item_count);

        let block = format_reference(keyword, self.target_item_count, &posts);
        Ok((block, posts))
    }

    async fn fetch_page(
        &self,
        keyword: &str,
        page: usize,
        cookie: &str,
    ) -> HotnoteResult<SearchResponse> {
        let request = SearchRequest::popularity_page(keyword, page, trace_id(21));

        let response = self
            .http
            .post(&self.endpoint)
            .timeout(self.timeout)
            .header("content-type", "application/json;charset=UTF-8")
            .header("origin", "https://www.xiaohongshu.com")
            .header("referer", "https://www.xiaohongshu.com/")
            .header("x-b3-traceid", trace_id(16))
            .header("cookie", cookie)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!(page, "Search page request timed out");
                    ScrapeError::timeout(format!("Page {} timed out", page))
                } else {
                    ScrapeError::new(format!("Page {} request failed: {}", page, e))
                }
            })?;

        if !response.status().is_success() {
            return Err(
                ScrapeError::new(format!("HTTP {} from search API", response.status())).into(),
            );
        }
        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| ScrapeError::new(format!("Invalid search API body: {}", e)).into())
    }
}

/// Random lowercase-hex trace id of `len` characters (at most 32).
fn trace_id(len: usize) -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(len);
    id
}

/// Render posts into the human-readable reference block embedded into
/// prompts: rank, title, truncated description, engagement, author.
fn format_reference(keyword: &str, target: usize, posts: &[PostSummary]) -> String {
    let mut block = format!(
        "关键词\"{}\"的热门笔记分析（目标{}篇，实际获取{}篇）：\n\n",
        keyword,
        target,
        posts.len()
    );
    for (index, post) in posts.iter().enumerate() {
        block.push_str(&format!("{}. 标题：{}\n", index + 1, post.title));
        block.push_str(&format!(
            "   描述：{}\n",
            truncate_chars(&post.desc, DESC_PREVIEW_CHARS)
        ));
        block.push_str(&format!(
            "   互动：点赞{} 评论{} 收藏{}\n",
            post.liked_count, post.comment_count, post.collected_count
        ));
        block.push_str(&format!("   作者：{}\n\n", post.author));
    }
    block
}

fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut preview: String = text.chars().take(limit).collect();
    preview.push_str("...");
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, desc: &str) -> PostSummary {
        PostSummary {
            title: title.to_string(),
            desc: desc.to_string(),
            liked_count: 10,
            comment_count: 2,
            collected_count: 5,
            author: "种草博主".to_string(),
        }
    }

    #[test]
    fn reference_block_layout() {
        let block = format_reference("护肤", 40, &[post("晚安面膜", "亲测一个月")]);
        assert!(block.starts_with("关键词\"护肤\"的热门笔记分析（目标40篇，实际获取1篇）："));
        assert!(block.contains("1. 标题：晚安面膜"));
        assert!(block.contains("   描述：亲测一个月\n"));
        assert!(block.contains("   互动：点赞10 评论2 收藏5\n"));
        assert!(block.contains("   作者：种草博主\n"));
    }

    #[test]
    fn long_descriptions_are_truncated_per_character() {
        let long_desc: String = "测".repeat(150);
        let block = format_reference("fit", 40, &[post("t", &long_desc)]);
        let expected = format!("{}...", "测".repeat(100));
        assert!(block.contains(&expected));
        assert!(!block.contains(&"测".repeat(101)));
    }

    #[test]
    fn trace_ids_have_requested_length() {
        assert_eq!(trace_id(21).len(), 21);
        assert_eq!(trace_id(16).len(), 16);
        assert_ne!(trace_id(21), trace_id(21));
    }

    #[tokio::test]
    async fn missing_cookie_is_a_config_error() {
        let config = HotnoteConfig::new("http://api", "key", vec!["m".to_string()], "data");
        let scraper = HotPostScraper::from_config(&config);
        let err = scraper.scrape("护肤").await.unwrap_err();
        assert!(!err.is_recoverable());
    }
}
