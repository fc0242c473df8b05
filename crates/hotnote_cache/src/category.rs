//! Keyword classification for fallback lookup.

use serde::{Deserialize, Serialize};

/// Coarse topic buckets used to find same-category fallback entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicCategory {
    /// Skincare, makeup
    Beauty,
    /// Restaurants, recipes
    Food,
    /// Destinations, itineraries
    Travel,
    /// Clothing, outfits
    Fashion,
    /// Workouts, wellness
    Fitness,
    /// Gadgets, apps
    Digital,
    /// Furnishing, organization
    Home,
    /// Everything else
    General,
}

/// Markers checked by substring; a keyword matching none classifies as
/// `General`.
const CATEGORY_MARKERS: &[(TopicCategory, &[&str])] = &[
    (
        TopicCategory::Beauty,
        &["护肤", "美妆", "化妆", "彩妆", "面膜", "skincare", "makeup"],
    ),
    (
        TopicCategory::Food,
        &["美食", "探店", "餐厅", "食谱", "菜", "food", "recipe"],
    ),
    (
        TopicCategory::Travel,
        &["旅行", "旅游", "攻略", "景点", "出游", "travel"],
    ),
    (
        TopicCategory::Fashion,
        &["穿搭", "服装", "时尚", "搭配", "outfit", "fashion"],
    ),
    (
        TopicCategory::Fitness,
        &["健身", "运动", "减肥", "瑜伽", "fitness", "workout"],
    ),
    (
        TopicCategory::Digital,
        &["数码", "手机", "电脑", "相机", "app", "数字"],
    ),
    (
        TopicCategory::Home,
        &["家居", "装修", "收纳", "家装", "home"],
    ),
];

impl TopicCategory {
    /// Classify a keyword by its first matching category marker.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotnote_cache::TopicCategory;
    ///
    /// assert_eq!(TopicCategory::classify("护肤心得"), TopicCategory::Beauty);
    /// assert_eq!(TopicCategory::classify("川西旅行攻略"), TopicCategory::Travel);
    /// assert_eq!(TopicCategory::classify("量子力学"), TopicCategory::General);
    /// ```
    pub fn classify(keyword: &str) -> Self {
        let lowered = keyword.to_lowercase();
        for (category, markers) in CATEGORY_MARKERS {
            if markers.iter().any(|marker| lowered.contains(marker)) {
                return *category;
            }
        }
        Self::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(TopicCategory::classify("Best SKINCARE tips"), TopicCategory::Beauty);
    }

    #[test]
    fn first_marker_wins() {
        // "美食旅行" carries both food and travel markers; food is listed first.
        assert_eq!(TopicCategory::classify("美食旅行"), TopicCategory::Food);
    }
}
