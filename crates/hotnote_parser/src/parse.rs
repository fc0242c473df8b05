//! Marker-ordered section extraction.

use crate::markers::{ALL_SECTIONS, Section, section_pattern};
use hotnote_core::GeneratedContent;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[\p{Han}a-zA-Z0-9_]+").expect("valid hashtag pattern"));
static BULLET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[-*]\s*(.+)$").expect("valid bullet pattern"));

/// Parse a block of generated markdown into the seven typed sections.
///
/// Safe to call repeatedly on a monotonically growing buffer; each call
/// recomputes everything from the full text.
///
/// - Text before the first found marker goes to `titles` (the title
///   section is conventionally first and may lack its marker while
///   content is still streaming in).
/// - With zero markers, the entire input lands in `titles`.
/// - The tags span is additionally mined for `#hashtag` tokens and
///   bullet lines, merged, de-duplicated in first-seen order.
///
/// # Examples
///
/// ```
/// use hotnote_parser::parse_generated_content;
///
/// let text = "## 1. 标题\n三个标题\n## 2. 正文\n正文内容\n## 3. 标签\n#护肤 #面膜\n";
/// let content = parse_generated_content(text);
/// assert_eq!(content.titles, "三个标题");
/// assert_eq!(content.body, "正文内容");
/// assert_eq!(content.tags[0], "护肤");
/// ```
pub fn parse_generated_content(text: &str) -> GeneratedContent {
    // First match position per section; sections without a marker are
    // dropped for this pass.
    let mut found: Vec<(Section, usize, usize)> = ALL_SECTIONS
        .iter()
        .filter_map(|&section| {
            section_pattern(section)
                .find(text)
                .map(|m| (section, m.start(), m.end()))
        })
        .collect();
    found.sort_by_key(|&(_, start, _)| start);

    let mut content = GeneratedContent::default();

    if found.is_empty() {
        // Expected state while a stream has not reached its first marker.
        content.titles = text.trim().to_string();
        return content;
    }

    debug!(sections = found.len(), "Parsed section markers");

    let first_start = found[0].1;
    if first_start > 0 {
        content.titles = text[..first_start].trim().to_string();
    }

    for (i, &(section, _, marker_end)) in found.iter().enumerate() {
        let span_end = found.get(i + 1).map_or(text.len(), |&(_, start, _)| start);
        let span = text[marker_end..span_end].trim();

        match section {
            Section::Titles => content.titles = span.to_string(),
            Section::Body => content.body = span.to_string(),
            Section::Tags => content.tags = extract_tags(span),
            Section::ImagePrompt => content.image_prompt = span.to_string(),
            Section::SelfComment => content.self_comment = span.to_string(),
            Section::Strategy => content.strategy = span.to_string(),
            Section::Playbook => content.playbook = span.to_string(),
        }
    }

    content
}

/// Mine the tags span for hashtag tokens and bullet-list entries.
fn extract_tags(span: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for m in HASHTAG.find_iter(span) {
        push_unique(&mut tags, m.as_str().trim_start_matches('#'));
    }
    for caps in BULLET_LINE.captures_iter(span) {
        if let Some(item) = caps.get(1) {
            // A bullet item may itself contain hashtag tokens; strip
            // the decoration and keep the bare terms.
            let item = item.as_str().trim();
            if item.contains('#') {
                for m in HASHTAG.find_iter(item) {
                    push_unique(&mut tags, m.as_str().trim_start_matches('#'));
                }
            } else {
                push_unique(&mut tags, item);
            }
        }
    }

    tags
}

fn push_unique(tags: &mut Vec<String>, candidate: &str) {
    if !candidate.is_empty() && !tags.iter().any(|t| t == candidate) {
        tags.push(candidate.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_TEXT: &str = "\
## 1. 爆款标题创作（3个）
标题一
标题二
## 2. 正文内容
今天的正文。
## 3. 关键词标签（10-15个）
#护肤 #glow
- 面膜
* 补水
## 4. AI绘画提示词
soft morning light
## 5. 首评关键词引导
评论区见
## 6. 发布策略建议
晚上八点发布
## 7. 小红书增长 Playbook (高级策略)
连续更新三周
";

    #[test]
    fn all_sections_parse() {
        let content = parse_generated_content(FULL_TEXT);
        assert!(content.titles.contains("标题一"));
        assert_eq!(content.body, "今天的正文。");
        assert_eq!(content.tags, vec!["护肤", "glow", "面膜", "补水"]);
        assert_eq!(content.image_prompt, "soft morning light");
        assert_eq!(content.self_comment, "评论区见");
        assert_eq!(content.strategy, "晚上八点发布");
        assert_eq!(content.playbook, "连续更新三周");
    }

    #[test]
    fn no_markers_fall_back_to_titles() {
        let content = parse_generated_content("还没有出现任何标记的内容");
        assert_eq!(content.titles, "还没有出现任何标记的内容");
        assert!(content.body.is_empty());
        assert!(content.tags.is_empty());
    }

    #[test]
    fn leading_unmarked_text_goes_to_titles() {
        let content = parse_generated_content("前置标题内容\n## 2. 正文内容\n正文在这里");
        assert_eq!(content.titles, "前置标题内容");
        assert_eq!(content.body, "正文在这里");
    }

    #[test]
    fn tag_dedup_across_hashtag_and_bullet() {
        let content =
            parse_generated_content("## 3. 标签\n#旅行\n- 旅行\n- #旅行\n#美食");
        assert_eq!(content.tags, vec!["旅行", "美食"]);
    }

    #[test]
    fn growth_is_consistent() {
        // Parsing every prefix that ends on a line boundary must agree
        // with parsing the final buffer for the sections already seen.
        let final_content = parse_generated_content(FULL_TEXT);
        let mut buffer = String::new();
        for line in FULL_TEXT.lines() {
            buffer.push_str(line);
            buffer.push('\n');
            let partial = parse_generated_content(&buffer);
            if !partial.body.is_empty() && buffer.contains("## 3.") {
                // Once a later marker appears, earlier sections are final.
                assert_eq!(partial.body, final_content.body);
            }
        }
        assert_eq!(parse_generated_content(&buffer), final_content);
    }

    #[test]
    fn spec_scenario_minimal_stream() {
        let content = parse_generated_content(
            "## 1. 标题\nFoo\n## 2. 正文\nBar\n## 3. 标签\n#glow #skin\n",
        );
        assert_eq!(content.titles, "Foo");
        assert_eq!(content.body, "Bar");
        assert_eq!(content.tags, vec!["glow", "skin"]);
        assert!(content.image_prompt.is_empty());
        assert!(content.playbook.is_empty());
    }
}
