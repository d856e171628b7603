//! 上下文截断
//!
//! 短回复（"yes"、"the second one"）指向的是上一条回复的结尾，
//! 所以超长上下文从前面截，保留尾部。

/// 上下文字符数上限
pub const CONTEXT_MAX_CHARS: usize = 2000;

/// 保留尾部的截断，超长时加 "..." 前缀
///
/// 按字符计数，UTF-8 安全。幂等：再截一次结果不变。
pub fn truncate_tail(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }

    let tail: String = text.chars().skip(count - max_chars).collect();
    format!("...{}", tail)
}
