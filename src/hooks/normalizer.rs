//! Prompt 归一化
//!
//! 斜杠命令和 @ 提及是协议语法，不是自然语言，送去校对前必须剥掉。
//! 三个 pass 按顺序执行，后面的 pass 不会重新解释前面已经处理过的内容：
//!
//! 1. 开头的 `/command ` 前缀（只认第一个）
//! 2. `@"..."` 带引号提及：带文件扩展名的保留裸内容，其余整体删除
//! 3. 裸 `@token` 提及（只认开头或空白后的 `@`，pass 2 还原出来的
//!    路径内容不会被二次解析）：带扩展名的去掉 `@`，含 "agent" 的
//!    整体删除，其余原样保留（歧义时宁可不动用户内容）
//!
//! 收尾只整理删除留下的空隙：水平空白压成单个空格、换行两侧的残留
//! 空格去掉。换行本身保留，多行 prompt 的段落结构原样送去校对。

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref LEADING_COMMAND: Regex = Regex::new(r"^/\S+\s*").unwrap();
    static ref QUOTED_MENTION: Regex = Regex::new(r#"@"([^"]+)""#).unwrap();
    // 裸提及必须从行首或空白后开始，捕获组 1 保住边界字符
    static ref BARE_MENTION: Regex = Regex::new(r"(^|\s)@(\S+)").unwrap();
    // 文件路径启发式：一个点后跟至少一个 word 字符
    static ref DOT_EXTENSION: Regex = Regex::new(r"\.\w+").unwrap();
    // 换行以外的空白
    static ref HORIZONTAL_WS: Regex = Regex::new(r"[^\S\n]+").unwrap();
    static ref NEWLINE_PADDING: Regex = Regex::new(r" ?\n ?").unwrap();
}

/// 剥离协议 token，返回真正需要校对的文本
///
/// 结果可能为空字符串，调用方应将其视为"无内容"直接放行。
pub fn normalize_prompt(text: &str) -> String {
    // Pass 1: 开头的斜杠命令
    let text = LEADING_COMMAND.replace(text, "");

    // Pass 2: 带引号提及
    let text = QUOTED_MENTION.replace_all(&text, |caps: &Captures| {
        let content = &caps[1];
        if DOT_EXTENSION.is_match(content) {
            // 文件引用：保留裸路径
            content.to_string()
        } else {
            // agent/persona 引用：整体删除
            String::new()
        }
    });

    // Pass 3: 裸提及
    let text = BARE_MENTION.replace_all(&text, |caps: &Captures| {
        let boundary = &caps[1];
        let token = &caps[2];
        if DOT_EXTENSION.is_match(token) {
            format!("{}{}", boundary, token)
        } else if token.contains("agent") {
            // 删除提及，边界字符（空格/换行）留下
            boundary.to_string()
        } else {
            // 歧义：原样保留
            caps[0].to_string()
        }
    });

    let text = HORIZONTAL_WS.replace_all(&text, " ");
    let text = NEWLINE_PADDING.replace_all(&text, "\n");
    text.trim().to_string()
}
