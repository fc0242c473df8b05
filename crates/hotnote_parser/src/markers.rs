//! The section marker table.
//!
//! All marker patterns live in this one table; prompt wording changes
//! touch nothing but the pattern strings here. Each section accepts
//! several header phrasings, an optional `.`/`、` after the number and
//! an optional `（N个）`-style count annotation, matched
//! case-insensitively.

use regex::Regex;
use std::sync::LazyLock;

/// The seven named output sections, in prompt-contract order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// `## 1.` candidate titles
    Titles,
    /// `## 2.` post body
    Body,
    /// `## 3.` keyword tags
    Tags,
    /// `## 4.` image-generation prompt
    ImagePrompt,
    /// `## 5.` first-comment seeding
    SelfComment,
    /// `## 6.` publishing strategy
    Strategy,
    /// `## 7.` growth playbook
    Playbook,
}

/// All sections in marker order.
pub const ALL_SECTIONS: [Section; 7] = [
    Section::Titles,
    Section::Body,
    Section::Tags,
    Section::ImagePrompt,
    Section::SelfComment,
    Section::Strategy,
    Section::Playbook,
];

static MARKER_TABLE: LazyLock<Vec<(Section, Regex)>> = LazyLock::new(|| {
    [
        (
            Section::Titles,
            r"(?i)##\s*1[.、]?\s*(爆款标题创作|标题|生成标题)(\s*（\d+个）)?",
        ),
        (
            Section::Body,
            r"(?i)##\s*2[.、]?\s*(正文内容|笔记正文|内容|正文|文案内容)",
        ),
        (
            Section::Tags,
            r"(?i)##\s*3[.、]?\s*(关键词标签|标签|关键词)(\s*（\d+-\d+个）)?",
        ),
        (
            Section::ImagePrompt,
            r"(?i)##\s*4[.、]?\s*(AI绘画提示词|绘画提示词|AI绘画|绘画提示)",
        ),
        (
            Section::SelfComment,
            r"(?i)##\s*5[.、]?\s*(首评关键词引导|首评)",
        ),
        (
            Section::Strategy,
            r"(?i)##\s*6[.、]?\s*(发布策略建议|发布策略)",
        ),
        (
            Section::Playbook,
            r"(?i)##\s*7[.、]?\s*(小红书增长\s*Playbook|增长\s*Playbook)",
        ),
    ]
    .into_iter()
    .map(|(section, pattern)| {
        (
            section,
            Regex::new(pattern).expect("section marker patterns are valid"),
        )
    })
    .collect()
});

/// The compiled marker pattern for one section.
pub fn section_pattern(section: Section) -> &'static Regex {
    &MARKER_TABLE
        .iter()
        .find(|(s, _)| *s == section)
        .expect("every section has a marker pattern")
        .1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_phrasing_variants() {
        let titles = section_pattern(Section::Titles);
        assert!(titles.is_match("## 1. 爆款标题创作（3个）"));
        assert!(titles.is_match("##1、标题"));
        assert!(titles.is_match("## 1 生成标题"));

        let body = section_pattern(Section::Body);
        assert!(body.is_match("## 2. 正文内容"));
        assert!(body.is_match("## 2、笔记正文"));
    }

    #[test]
    fn case_insensitive_playbook() {
        let playbook = section_pattern(Section::Playbook);
        assert!(playbook.is_match("## 7. 小红书增长 Playbook (高级策略)"));
        assert!(playbook.is_match("## 7. 增长 PLAYBOOK"));
    }

    #[test]
    fn wrong_number_does_not_match() {
        assert!(!section_pattern(Section::Tags).is_match("## 5. 标签"));
    }
}
