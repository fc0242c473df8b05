//! Prompt construction for generation and improvement calls.

use hotnote_core::GenerationRecord;

/// The output contract every generation prompt ends with: the seven
/// numbered markdown sections the parser recognizes.
const SECTION_CONTRACT: &str = "\
请严格按照以下七个部分输出，每个部分以对应的markdown标记开头：

## 1. 爆款标题创作（3个）
三个不同风格的候选标题。

## 2. 正文内容
完整的笔记正文，口语化、有个人体验感，分段清晰。

## 3. 关键词标签（10-15个）
以#开头的话题标签。

## 4. AI绘画提示词
一段可直接用于封面图生成的英文提示词。

## 5. 首评关键词引导
发布后用作者身份发的第一条评论。

## 6. 发布策略建议
发布时间、频率与互动策略。

## 7. 小红书增长 Playbook (高级策略)
面向账号长期增长的进阶建议。";

/// Build the generation prompt, embedding reference data when present.
///
/// Reference text is defanged before embedding: code fences are
/// rewritten so they cannot break the prompt's markdown structure, and
/// the text is truncated to `max_content_length` characters.
pub fn generation_prompt(
    reference: Option<&str>,
    user_info: &str,
    keyword: &str,
    max_content_length: usize,
) -> String {
    let rules = match reference {
        Some(text) => {
            let safe = safe_reference(text, max_content_length);
            format!(
                "**【小红书热门笔记数据 - 供你内化分析】**\n\n\
                 以下是关于\"{}\"的热门笔记数据：\n\n{}\n\n\
                 **内化要求：**\n\
                 请默默提取爆款规律（标题公式、内容结构、标签策略等），\
                 转化为创作直觉，但不要在输出中体现任何分析过程。",
                keyword, safe
            )
        }
        None => "**【创作说明】**\n\n\
                 没有热门笔记参考数据。请基于你对小红书平台特点和爆款规律\
                 的理解直接创作，仍需遵守全部输出要求。"
            .to_string(),
    };

    format!(
        "你是一位深谙小红书爆款逻辑的资深内容创作者。\n\n{}\n\n\
         **【用户素材】**\n关键词：{}\n补充信息：{}\n\n{}",
        rules, keyword, user_info, SECTION_CONTRACT
    )
}

/// Build the improvement prompt from a completed record.
///
/// Embeds the parent's titles, body and tags and asks for a rewrite
/// under the same seven-section contract.
pub fn improvement_prompt(record: &GenerationRecord) -> String {
    let content = &record.generated_content;
    format!(
        "你是一位深谙小红书爆款逻辑的资深内容创作者。\n\n\
         以下是关于\"{}\"的一篇已有笔记，请在保留原意的基础上全面改写提升：\
         标题更抓人、正文更有个人体验感、降低模板感。\n\n\
         **【原标题】**\n{}\n\n\
         **【原正文】**\n{}\n\n\
         **【原标签】**\n{}\n\n{}",
        record.keyword,
        content.titles,
        content.body,
        content.tags.join(" "),
        SECTION_CONTRACT
    )
}

/// Escape and bound reference text for prompt embedding.
fn safe_reference(text: &str, max_content_length: usize) -> String {
    let safe = text.replace("```", "´´´");
    let safe = safe.trim();
    if safe.chars().count() <= max_content_length {
        return safe.to_string();
    }
    let truncated: String = safe.chars().take(max_content_length).collect();
    format!("{}\n\n[内容因长度限制被截断...]", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotnote_core::GeneratedContent;

    #[test]
    fn with_reference_embeds_the_block() {
        let prompt = generation_prompt(Some("热门笔记1：晚安面膜"), "油皮", "护肤", 8000);
        assert!(prompt.contains("热门笔记1：晚安面膜"));
        assert!(prompt.contains("关键词：护肤"));
        assert!(prompt.contains("## 7. 小红书增长 Playbook"));
    }

    #[test]
    fn without_reference_uses_the_explanatory_note() {
        let prompt = generation_prompt(None, "油皮", "护肤", 8000);
        assert!(prompt.contains("没有热门笔记参考数据"));
        assert!(prompt.contains("## 1. 爆款标题创作"));
    }

    #[test]
    fn code_fences_in_reference_are_defanged() {
        let prompt = generation_prompt(Some("```\nrm -rf\n```"), "", "kw", 8000);
        assert!(!prompt.contains("```\nrm"));
        assert!(prompt.contains("´´´"));
    }

    #[test]
    fn oversized_reference_is_truncated_by_characters() {
        let reference = "测".repeat(50);
        let prompt = generation_prompt(Some(&reference), "", "kw", 10);
        assert!(prompt.contains("[内容因长度限制被截断...]"));
        assert!(!prompt.contains(&"测".repeat(11)));
    }

    #[test]
    fn improvement_prompt_carries_the_parent_content() {
        let mut record = GenerationRecord::new("护肤", "notes");
        record.generated_content = GeneratedContent {
            titles: "旧标题".to_string(),
            body: "旧正文".to_string(),
            tags: vec!["护肤".to_string(), "面膜".to_string()],
            ..Default::default()
        };
        let prompt = improvement_prompt(&record);
        assert!(prompt.contains("旧标题"));
        assert!(prompt.contains("旧正文"));
        assert!(prompt.contains("护肤 面膜"));
        assert!(prompt.contains("## 2. 正文内容"));
    }
}
