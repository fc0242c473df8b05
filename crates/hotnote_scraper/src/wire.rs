//! Search API wire types.

use hotnote_core::PostSummary;
use serde::{Deserialize, Deserializer, Serialize};

const UNTITLED: &str = "无标题";
const NO_DESC: &str = "无描述";
const UNKNOWN_AUTHOR: &str = "未知用户";

/// Outbound paginated search request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub keyword: String,
    pub page: usize,
    pub page_size: usize,
    pub search_id: String,
    pub sort: String,
    pub note_type: u32,
}

impl SearchRequest {
    /// Popularity-sorted page for `keyword`.
    pub fn popularity_page(keyword: &str, page: usize, search_id: String) -> Self {
        Self {
            keyword: keyword.to_string(),
            page,
            page_size: 20,
            search_id,
            sort: "popularity_descending".to_string(),
            note_type: 0,
        }
    }
}

/// Top-level search API response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<SearchData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub items: Option<Vec<SearchItem>>,
}

/// One search result item; only `model_type == "note"` entries carry
/// usable content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub model_type: String,
    #[serde(default)]
    pub note_card: Option<NoteCard>,
    // Some payload variants put the note fields directly on the item.
    #[serde(default)]
    pub display_title: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub interact_info: Option<InteractInfo>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteCard {
    #[serde(default)]
    pub display_title: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub interact_info: Option<InteractInfo>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

/// Engagement counters. The upstream API serves these as numbers or
/// decorated strings depending on endpoint version, so both are
/// accepted; anything unparseable counts as zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractInfo {
    #[serde(default, deserialize_with = "flexible_count")]
    pub liked_count: u64,
    #[serde(default, deserialize_with = "flexible_count")]
    pub comment_count: u64,
    #[serde(default, deserialize_with = "flexible_count")]
    pub collected_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub nickname: Option<String>,
}

impl SearchItem {
    /// Whether this item is a content note.
    pub fn is_note(&self) -> bool {
        self.model_type == "note"
    }

    /// Normalize into a [`PostSummary`], preferring `note_card` fields
    /// and defaulting everything missing.
    pub fn summarize(&self) -> PostSummary {
        let card = self.note_card.as_ref();
        let title = card
            .and_then(|c| c.display_title.clone().or_else(|| c.title.clone()))
            .or_else(|| self.display_title.clone())
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| UNTITLED.to_string());
        let desc = card
            .and_then(|c| c.desc.clone())
            .or_else(|| self.desc.clone())
            .unwrap_or_else(|| NO_DESC.to_string());
        let interact = card
            .and_then(|c| c.interact_info.clone())
            .or_else(|| self.interact_info.clone())
            .unwrap_or_default();
        let author = card
            .and_then(|c| c.user.as_ref())
            .or(self.user.as_ref())
            .and_then(|u| u.nickname.clone())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        PostSummary {
            title,
            desc,
            liked_count: interact.liked_count,
            comment_count: interact.comment_count,
            collected_count: interact.collected_count,
            author,
        }
    }
}

fn flexible_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s.trim().parse().unwrap_or(0),
        Raw::Other(_) => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_prefers_note_card() {
        let item: SearchItem = serde_json::from_str(
            r#"{
                "model_type": "note",
                "title": "outer title",
                "note_card": {
                    "display_title": "card title",
                    "desc": "card desc",
                    "interact_info": {"liked_count": "1234", "comment_count": 5},
                    "user": {"nickname": "作者"}
                }
            }"#,
        )
        .unwrap();

        let summary = item.summarize();
        assert_eq!(summary.title, "card title");
        assert_eq!(summary.desc, "card desc");
        assert_eq!(summary.liked_count, 1234);
        assert_eq!(summary.comment_count, 5);
        assert_eq!(summary.collected_count, 0);
        assert_eq!(summary.author, "作者");
    }

    #[test]
    fn summarize_defaults_everything_missing() {
        let item: SearchItem = serde_json::from_str(r#"{"model_type": "note"}"#).unwrap();
        let summary = item.summarize();
        assert_eq!(summary.title, "无标题");
        assert_eq!(summary.desc, "无描述");
        assert_eq!(summary.liked_count, 0);
        assert_eq!(summary.author, "未知用户");
    }

    #[test]
    fn decorated_counts_fall_back_to_zero() {
        let info: InteractInfo =
            serde_json::from_str(r#"{"liked_count": "1.2万", "comment_count": 7}"#).unwrap();
        assert_eq!(info.liked_count, 0);
        assert_eq!(info.comment_count, 7);
    }

    #[test]
    fn non_note_items_are_identifiable() {
        let item: SearchItem =
            serde_json::from_str(r#"{"model_type": "rec_query"}"#).unwrap();
        assert!(!item.is_note());
    }
}
