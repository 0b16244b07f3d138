/// 不打断文本流的内联修饰标签，可与相邻文本合并为同一批次
pub const INLINE_TAGS: &[&str] = &["span", "i", "em", "b", "strong", "u", "a"];

/// 硬换行标签，总是打断批次
pub const LINE_BREAK_TAG: &str = "br";

/// 检查标签是否为内联修饰标签（换行标签除外）
pub fn is_inline_decorative(tag_name: &str) -> bool {
    let tag_name = tag_name.to_lowercase();
    tag_name != LINE_BREAK_TAG && INLINE_TAGS.contains(&tag_name.as_str())
}

/// 检查文本是否只包含空白
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
