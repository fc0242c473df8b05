//! Generation record entity.

use crate::GeneratedContent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a single generation attempt.
///
/// `Generating` (or `Improving` for improvement copies) transitions to
/// the terminal `Completed` or `Failed`; nothing leaves a terminal
/// state except creating a brand-new improved-version record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecordStatus {
    /// Initial state for fresh generations
    Generating,
    /// Terminal success
    Completed,
    /// Terminal failure
    Failed,
    /// Initial state for improvement copies
    Improving,
}

impl RecordStatus {
    /// Whether the record has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// One generation attempt: immutable inputs, mutable output and status.
///
/// # Examples
///
/// ```
/// use hotnote_core::{GenerationRecord, RecordStatus};
///
/// let record = GenerationRecord::new("skincare", "oil-free moisturizer notes");
/// assert_eq!(record.status, RecordStatus::Generating);
/// assert!(record.generated_content.is_empty());
/// assert_eq!(record.improvement_count, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    /// Opaque unique identifier, assigned at creation
    pub id: String,
    /// Topic keyword, captured at creation
    pub keyword: String,
    /// Raw user material, captured at creation
    pub user_info: String,
    /// Generated sections, filled incrementally or on completion
    pub generated_content: GeneratedContent,
    /// Lifecycle status
    pub status: RecordStatus,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Set once, on transition into Completed or Failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Set only on Failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// How many improvement passes led to this record
    #[serde(default)]
    pub improvement_count: u32,
    /// Whether this record is an improved copy of another
    #[serde(default)]
    pub is_improved: bool,
}

impl GenerationRecord {
    /// Create a fresh record in `Generating` state with a new id.
    pub fn new(keyword: impl Into<String>, user_info: impl Into<String>) -> Self {
        Self {
            id: uuid_string(),
            keyword: keyword.into(),
            user_info: user_info.into(),
            generated_content: GeneratedContent::default(),
            status: RecordStatus::Generating,
            created_at: Utc::now(),
            completed_at: None,
            error_message: None,
            improvement_count: 0,
            is_improved: false,
        }
    }

    /// Create an improvement copy of this record.
    ///
    /// The copy gets a new id, `Improving` status, a fresh creation
    /// timestamp and an incremented improvement count; content and
    /// inputs carry over from the parent.
    pub fn improved_copy(&self) -> Self {
        Self {
            id: uuid_string(),
            keyword: self.keyword.clone(),
            user_info: self.user_info.clone(),
            generated_content: self.generated_content.clone(),
            status: RecordStatus::Improving,
            created_at: Utc::now(),
            completed_at: None,
            error_message: None,
            improvement_count: self.improvement_count + 1,
            is_improved: true,
        }
    }
}

fn uuid_string() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn improved_copy_provenance() {
        let original = GenerationRecord::new("travel", "weekend itinerary notes");
        let improved = original.improved_copy();

        assert_ne!(improved.id, original.id);
        assert_eq!(improved.keyword, original.keyword);
        assert_eq!(improved.status, RecordStatus::Improving);
        assert_eq!(improved.improvement_count, 1);
        assert!(improved.is_improved);
        assert!(improved.completed_at.is_none());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&RecordStatus::Generating).unwrap();
        assert_eq!(json, "\"generating\"");
        let back: RecordStatus = serde_json::from_str("\"improving\"").unwrap();
        assert_eq!(back, RecordStatus::Improving);
    }

    #[test]
    fn terminal_states() {
        assert!(RecordStatus::Completed.is_terminal());
        assert!(RecordStatus::Failed.is_terminal());
        assert!(!RecordStatus::Generating.is_terminal());
        assert!(!RecordStatus::Improving.is_terminal());
    }
}
