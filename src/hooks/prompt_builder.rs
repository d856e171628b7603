//! 校对 prompt 组装
//!
//! 纯字符串拼接，无任何 I/O。输出格式约定是协议的一部分：
//! 要么是 NO_ISSUES 哨兵，要么是裸 JSON 数组。

/// 组装送给模型的校对 prompt
///
/// `context` 是上一条 assistant 回复（已截断），有上下文时明确告诉
/// 模型省略式短回复是正常的，避免把 "yes" 判成不完整句子。
pub fn build_proofread_prompt(text: &str, context: Option<&str>) -> String {
    let context_section = match context {
        Some(ctx) => format!(
            r#"For context, this text replies to the assistant's previous message:
"""
{}
"""
Short or elliptical answers are a normal way to reply - do NOT flag them as incomplete sentences.

"#,
            ctx
        ),
        None => String::new(),
    };

    format!(
        r#"You are an English proofreading assistant for a non-native speaker who wants to learn.

Analyze the following text for:
1. Grammar errors
2. Wrong word usage
3. Unnatural expressions (from a native speaker's perspective)

Focus ONLY on the English parts. Ignore any Korean or other non-English text.

{}Text to proofread:
"""
{}
"""

If there are NO issues, respond with exactly:
NO_ISSUES

If there ARE issues, respond with ONLY a JSON array, no surrounding prose:
[{{"original": "[original phrase]", "corrected": "[corrected phrase]", "explanation": "[Detailed educational explanation of why this is wrong and how to remember the correct usage. Include grammar rules, common patterns, or helpful tips.]"}}]

Be thorough but focus on actual errors, not style preferences. If the English is grammatically correct and natural-sounding, respond with NO_ISSUES."#,
        context_section, text
    )
}
