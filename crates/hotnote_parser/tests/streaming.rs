//! Parsing a document the way the pipeline sees it: re-parsed on a
//! monotonically growing buffer as chunks arrive.

use hotnote_parser::{parse_generated_content, sanitize_text};

const CHUNKS: &[&str] = &[
    "## 1. 爆款标题创作（3个）\n",
    "- 秋天第一杯奶茶，我选这家\n- 奶茶测评｜喝过30家后的真心话\n",
    "## 2. 正文内容\n",
    "最近一口气喝了30家奶茶店，",
    "这三家是我会回购的。\n",
    "## 3. 关键词标签（10-15个）\n",
    "#奶茶 #奶茶测评 #秋天的第一杯奶茶\n",
    "## 4. AI绘画提示词\n",
    "a cozy milk tea shop, warm light\n",
];

#[test]
fn growing_buffer_parses_are_prefixes_of_the_final_parse() {
    let mut buffer = String::new();
    let mut previous_tag_count = 0;
    for chunk in CHUNKS {
        buffer.push_str(chunk);
        let parsed = parse_generated_content(&buffer);
        assert!(parsed.tags.len() >= previous_tag_count);
        previous_tag_count = parsed.tags.len();
    }

    let parsed = parse_generated_content(&buffer);
    assert!(parsed.titles.contains("秋天第一杯奶茶"));
    assert!(parsed.body.starts_with("最近一口气喝了30家奶茶店"));
    assert_eq!(parsed.tags, ["奶茶", "奶茶测评", "秋天的第一杯奶茶"]);
    assert!(parsed.image_prompt.contains("milk tea shop"));
    assert!(parsed.self_comment.is_empty());
}

#[test]
fn sanitize_then_parse_strips_invisible_characters_inside_sections() {
    let raw = "## 1. 标题\n\u{feff}防晒\u{200b}测评\n## 2. 正文\n正文内容\n";
    let parsed = parse_generated_content(&sanitize_text(raw));
    assert_eq!(parsed.titles, "防晒测评");
    assert_eq!(parsed.body, "正文内容");
}
