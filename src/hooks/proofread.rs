//! Proofread Hook
//!
//! UserPromptSubmit 主流水线：
//! 英文门槛 → token 归一化 → 上下文重建 → prompt 组装 → claude 调用
//! → 回复解析 → 决策输出 → 审计日志
//!
//! 前两步短路时输出 `{}`，一次模型调用都不发生。

use anyhow::Result;
use serde_json::Value;
use std::path::Path;

use crate::hooks::audit::{append_audit_log, AuditEntry};
use crate::hooks::claude_executor::ReviewBackend;
use crate::hooks::decision::{emit_decision, emit_no_opinion};
use crate::hooks::language_gate::contains_english;
use crate::hooks::normalizer::normalize_prompt;
use crate::hooks::prompt_builder::build_proofread_prompt;
use crate::hooks::review_parser::parse_proofread_reply;
use crate::transcript::{last_assistant_message, truncate_tail, CONTEXT_MAX_CHARS};

/// 运行 proofread hook
///
/// 输入是整个 hook 调用对象：`{ "prompt": string, "transcript_path"?: string }`。
/// 后端调用失败会向上传播，由 runner 的顶层兜底转成 `{}`。
pub fn run_proofread_hook(input: &Value, backend: &dyn ReviewBackend) -> Result<Value> {
    let prompt = input.get("prompt").and_then(Value::as_str).unwrap_or("");

    // 没有英文内容：最便宜的出口
    if !contains_english(prompt) {
        return Ok(emit_no_opinion());
    }

    // 剥掉协议 token 后空了也一样放行
    let normalized = normalize_prompt(prompt);
    if normalized.is_empty() {
        return Ok(emit_no_opinion());
    }

    // 上一条 assistant 回复作为上下文（可选，缺失是常态）
    let context = input
        .get("transcript_path")
        .and_then(Value::as_str)
        .and_then(|path| last_assistant_message(Path::new(path)))
        .map(|text| truncate_tail(&text, CONTEXT_MAX_CHARS))
        .filter(|text| !text.trim().is_empty());

    let review_prompt = build_proofread_prompt(&normalized, context.as_deref());
    let reply = backend.review(&review_prompt)?;
    let verdict = parse_proofread_reply(&reply);

    let output = emit_decision(&verdict);

    // 决策已定，审计失败只能警告
    let entry = AuditEntry::new(prompt, &verdict);
    if let Err(e) = append_audit_log(&entry) {
        eprintln!("⚠️  Failed to write audit log: {}", e);
    }

    Ok(output)
}
