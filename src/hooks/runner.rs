//! Hook 统一执行器
//!
//! stdin 读入调用 JSON，按名字分发，stdout 打印输出对象。
//! 这里是整个进程唯一的顶层兜底：任何失败（stdin 读不了、JSON 非法、
//! claude 挂了）都归一化为 `{}`，用户的 prompt 永远不会因为我们的
//! 故障被拦下。退出码恒为 0。

use anyhow::Result;
use serde_json::{json, Value};
use std::io::{self, Read};

use crate::hooks::claude_executor::{ClaudeBackend, ReviewBackend};
use crate::hooks::proofread::run_proofread_hook;

/// 运行指定的 hook
pub fn run_hook(hook_name: &str, input: &Value, backend: &dyn ReviewBackend) -> Result<Value> {
    match hook_name {
        "proofread" | "user_prompt_submit" => run_proofread_hook(input, backend),

        _ => {
            // 未知 hook 是配置错误，不是流水线故障
            Ok(json!({
                "status": "ok",
                "message": format!("Unknown hook: {}", hook_name)
            }))
        }
    }
}

/// 运行 hook（从 stdin 读取输入），永不失败
pub fn run_hook_from_stdin(hook_name: &str) -> Value {
    match try_run_from_stdin(hook_name) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Proofreading error: {}", e);
            json!({})
        }
    }
}

fn try_run_from_stdin(hook_name: &str) -> Result<Value> {
    let mut stdin_data = String::new();
    io::stdin().read_to_string(&mut stdin_data)?;

    let input: Value = if stdin_data.trim().is_empty() {
        json!({})
    } else {
        serde_json::from_str(&stdin_data)?
    };

    let backend = ClaudeBackend::new();
    run_hook(hook_name, &input, &backend)
}

/// 打印 hook 输出（单行 JSON）
pub fn print_hook_output(output: &Value) {
    println!(
        "{}",
        serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
    );
}
