//! 英文内容检测
//!
//! 没有任何英文字母的输入直接放行，完全不触发模型调用。
//! 这是整条流水线最重要的性能优化。

/// 检查文本是否包含英文字母
pub fn contains_english(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_english() {
        assert!(contains_english("hello"));
        assert!(contains_english("HELLO"));
        assert!(contains_english("한국어 mixed with English"));
        assert!(contains_english("数字123和x"));
    }

    #[test]
    fn test_no_english() {
        assert!(!contains_english(""));
        assert!(!contains_english("12345"));
        assert!(!contains_english("한국어만 있습니다"));
        assert!(!contains_english("中文，还有标点！？"));
        assert!(!contains_english("   \n\t  "));
    }
}
