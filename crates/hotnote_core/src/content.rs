//! Structured generated content.

use serde::{Deserialize, Serialize};

/// The seven named sections a completed generation produces.
///
/// Starts all-empty and is filled either incrementally (while parsing a
/// growing stream buffer) or atomically once generation completes.
///
/// # Examples
///
/// ```
/// use hotnote_core::GeneratedContent;
///
/// let content = GeneratedContent {
///     titles: "Three catchy titles".to_string(),
///     tags: vec!["skincare".to_string(), "glow".to_string()],
///     ..Default::default()
/// };
/// assert!(content.body.is_empty());
/// assert_eq!(content.tags.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    /// Candidate post titles (the leading section, may lack a marker
    /// while content is still streaming in)
    pub titles: String,
    /// Main post body
    pub body: String,
    /// Extracted hashtag keywords, first-seen order, de-duplicated
    pub tags: Vec<String>,
    /// Prompt for a cover-image generator
    pub image_prompt: String,
    /// Suggested first comment for engagement seeding
    pub self_comment: String,
    /// Publishing strategy advice
    pub strategy: String,
    /// Long-form growth playbook
    pub playbook: String,
}

impl GeneratedContent {
    /// Overlay non-empty fields of `other` onto `self`.
    ///
    /// Empty strings and empty tag lists in `other` leave the existing
    /// value untouched, so a partial parse never erases sections that
    /// were already filled.
    pub fn merge(&mut self, other: &GeneratedContent) {
        if !other.titles.is_empty() {
            self.titles = other.titles.clone();
        }
        if !other.body.is_empty() {
            self.body = other.body.clone();
        }
        if !other.tags.is_empty() {
            self.tags = other.tags.clone();
        }
        if !other.image_prompt.is_empty() {
            self.image_prompt = other.image_prompt.clone();
        }
        if !other.self_comment.is_empty() {
            self.self_comment = other.self_comment.clone();
        }
        if !other.strategy.is_empty() {
            self.strategy = other.strategy.clone();
        }
        if !other.playbook.is_empty() {
            self.playbook = other.playbook.clone();
        }
    }

    /// Whether no section has been filled yet.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
            && self.body.is_empty()
            && self.tags.is_empty()
            && self.image_prompt.is_empty()
            && self.self_comment.is_empty()
            && self.strategy.is_empty()
            && self.playbook.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_existing_on_empty() {
        let mut base = GeneratedContent {
            titles: "old title".to_string(),
            body: "old body".to_string(),
            ..Default::default()
        };
        let update = GeneratedContent {
            body: "new body".to_string(),
            tags: vec!["tag".to_string()],
            ..Default::default()
        };
        base.merge(&update);
        assert_eq!(base.titles, "old title");
        assert_eq!(base.body, "new body");
        assert_eq!(base.tags, vec!["tag".to_string()]);
    }

    #[test]
    fn default_is_empty() {
        assert!(GeneratedContent::default().is_empty());
    }

    #[test]
    fn wire_names_are_camel_case() {
        let content = GeneratedContent {
            image_prompt: "sunset".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&content).unwrap();
        assert!(json.contains("imagePrompt"));
        assert!(json.contains("selfComment"));
    }
}
