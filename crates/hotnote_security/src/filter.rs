//! Banned-term scanning and replacement.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Placeholder substituted for every matched span.
const REPLACEMENT: &str = "***";

/// Built-in banned terms covering the usual platform advertising-law
/// and absolute-claim vocabulary. Callers can extend or replace the
/// list at construction.
const DEFAULT_TERMS: &[&str] = &[
    "最好",
    "第一",
    "顶级",
    "绝对",
    "百分百",
    "根治",
    "特效",
    "秒杀",
    "万能",
    "免费领取",
    "稳赚",
    "国家级",
    "世界级",
    "best ever",
    "guaranteed",
];

/// Result of scanning a text span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Whether any banned term was found
    pub has_matches: bool,
    /// Terms found, in term-list order, de-duplicated
    pub matched_terms: Vec<String>,
}

/// How matched spans are rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Substitute each matched span with a placeholder
    Replace,
}

/// Stateless scanner/redactor for banned terms.
///
/// Matching is literal substring comparison (not fuzzy) and works on
/// any script, including multi-byte CJK text. Detection is local to the
/// span it is given; callers streaming chunked text are responsible for
/// chunk-boundary effects.
///
/// # Examples
///
/// ```
/// use hotnote_security::{FilterMode, SensitiveWordFilter};
///
/// let filter = SensitiveWordFilter::default();
/// let detection = filter.detect("这款面霜绝对是最好的选择");
/// assert!(detection.has_matches);
///
/// let clean = filter.filter("这款面霜绝对是最好的选择", FilterMode::Replace);
/// assert!(!clean.contains("绝对"));
/// assert!(clean.contains("***"));
/// ```
#[derive(Debug, Clone)]
pub struct SensitiveWordFilter {
    terms: Vec<String>,
}

impl SensitiveWordFilter {
    /// Create a filter with an explicit term list.
    ///
    /// Empty terms are dropped; they would otherwise match everywhere.
    pub fn new(terms: Vec<String>) -> Self {
        let terms: Vec<String> = terms.into_iter().filter(|t| !t.is_empty()).collect();
        debug!(term_count = terms.len(), "Creating sensitive word filter");
        Self { terms }
    }

    /// Scan `text` for banned terms.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn detect(&self, text: &str) -> Detection {
        let mut matched_terms = Vec::new();
        for term in &self.terms {
            if text.contains(term.as_str()) && !matched_terms.contains(term) {
                matched_terms.push(term.clone());
            }
        }
        Detection {
            has_matches: !matched_terms.is_empty(),
            matched_terms,
        }
    }

    /// Rewrite `text`, replacing every matched span.
    ///
    /// Unmatched text passes through unchanged. Never fails.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn filter(&self, text: &str, mode: FilterMode) -> String {
        match mode {
            FilterMode::Replace => {
                let mut result = text.to_string();
                for term in &self.terms {
                    if result.contains(term.as_str()) {
                        result = result.replace(term.as_str(), REPLACEMENT);
                    }
                }
                result
            }
        }
    }

    /// The configured term list.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl Default for SensitiveWordFilter {
    fn default() -> Self {
        Self::new(DEFAULT_TERMS.iter().map(|t| t.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_passes_through() {
        let filter = SensitiveWordFilter::default();
        let text = "今天分享一个温和的护肤思路";
        assert!(!filter.detect(text).has_matches);
        assert_eq!(filter.filter(text, FilterMode::Replace), text);
    }

    #[test]
    fn detects_multibyte_terms() {
        let filter = SensitiveWordFilter::default();
        let detection = filter.detect("这个方法百分百有效，绝对不踩雷");
        assert!(detection.has_matches);
        assert!(detection.matched_terms.contains(&"百分百".to_string()));
        assert!(detection.matched_terms.contains(&"绝对".to_string()));
    }

    #[test]
    fn replaces_every_occurrence() {
        let filter = SensitiveWordFilter::new(vec!["秒杀".to_string()]);
        let filtered = filter.filter("秒杀全场，手慢无，再来一次秒杀", FilterMode::Replace);
        assert!(!filtered.contains("秒杀"));
        assert_eq!(filtered.matches(REPLACEMENT).count(), 2);
    }

    #[test]
    fn detection_deduplicates_terms() {
        let filter = SensitiveWordFilter::new(vec!["第一".to_string()]);
        let detection = filter.detect("第一名，第一时间");
        assert_eq!(detection.matched_terms.len(), 1);
    }

    #[test]
    fn mixed_script_terms() {
        let filter = SensitiveWordFilter::default();
        let filtered = filter.filter("This cream is the best ever!", FilterMode::Replace);
        assert!(!filtered.contains("best ever"));
    }

    #[test]
    fn empty_terms_are_dropped() {
        let filter = SensitiveWordFilter::new(vec![String::new(), "x".to_string()]);
        assert_eq!(filter.terms().len(), 1);
    }
}
