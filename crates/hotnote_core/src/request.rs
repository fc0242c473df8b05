//! Batch generation request types.

use serde::{Deserialize, Serialize};

/// One item in a batch generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    /// Client-assigned item id (opaque, echoed back in progress views)
    pub id: String,
    /// Topic keyword
    pub keyword: String,
    /// Raw user material
    pub user_info: String,
}

/// A batch generation request.
///
/// A single generation is a batch of size 1.
///
/// # Examples
///
/// ```
/// use hotnote_core::{BatchItem, BatchRequest};
///
/// let request = BatchRequest {
///     items: vec![BatchItem {
///         id: "1".to_string(),
///         keyword: "skincare".to_string(),
///         user_info: "gel moisturizer, oily skin".to_string(),
///     }],
///     enable_improvement: false,
///     ai_model: None,
///     enable_scraping: Some(false),
/// };
/// assert_eq!(request.items.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    /// Items to generate, processed strictly sequentially
    pub items: Vec<BatchItem>,
    /// Whether to run an improvement pass after each successful item
    #[serde(default)]
    pub enable_improvement: bool,
    /// Comma-separated model list override for this batch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_model: Option<String>,
    /// Per-request scraping override; defaults to the service setting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_scraping: Option<bool>,
}
