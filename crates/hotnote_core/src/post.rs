//! Processed hot-post summary.

use serde::{Deserialize, Serialize};

/// One scraped hot post, normalized for prompt embedding and caching.
///
/// Fields missing upstream fall back to documented defaults (unknown
/// author, zero engagement counts) rather than failing the scrape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    /// Post title ("无标题" upstream default when absent)
    pub title: String,
    /// Post description, untruncated
    pub desc: String,
    /// Like count
    pub liked_count: u64,
    /// Comment count
    pub comment_count: u64,
    /// Collect/bookmark count
    pub collected_count: u64,
    /// Author nickname ("未知用户" when absent)
    pub author: String,
}
