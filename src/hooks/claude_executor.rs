//! Claude 调用执行器
//!
//! `ReviewBackend` 是流水线的依赖注入缝：生产环境用 `ClaudeBackend`
//! 起 claude 子进程，测试里换成确定性的 stub。
//!
//! claude 以 headless 模式运行：零工具权限、单轮预算，stdout 是
//! stream-json 事件流，取最后一个 `result` 事件的文本作为回复。

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;

use crate::hooks::claude_resolver::resolve_claude_path;

/// 校对用的快速模型
pub const DEFAULT_REVIEW_MODEL: &str = "haiku";

/// 调用 claude 的失败形态
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("claude exited with code {code:?}:\n{stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },
    #[error("no result event found in claude output")]
    MissingResult,
}

/// 文本生成后端：一个 prompt 进，一段回复文本出
pub trait ReviewBackend {
    fn review(&self, prompt: &str) -> Result<String>;
}

/// 生产实现：claude CLI 子进程
pub struct ClaudeBackend {
    model: String,
}

impl ClaudeBackend {
    pub fn new() -> Self {
        ClaudeBackend {
            model: DEFAULT_REVIEW_MODEL.to_string(),
        }
    }
}

impl Default for ClaudeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewBackend for ClaudeBackend {
    fn review(&self, prompt: &str) -> Result<String> {
        let claude_bin = resolve_claude_path().context("Failed to resolve claude command path")?;

        let mut child = Command::new(&claude_bin)
            .args([
                "-p",
                "--output-format",
                "stream-json",
                "--verbose",
                "--model",
                &self.model,
                "--max-turns",
                "1",
                "--allowedTools",
                "",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn claude process")?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(prompt.as_bytes())
                .context("Failed to write prompt to claude stdin")?;
        }

        let output = child.wait_with_output().context("Failed to wait for claude")?;

        if !output.status.success() {
            return Err(BackendError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        extract_result_text(&stdout).ok_or_else(|| BackendError::MissingResult.into())
    }
}

/// 从事件流里提取最终回复
///
/// 逐行解析，非 JSON 行跳过；多个 result 事件取最后一个。
fn extract_result_text(output: &str) -> Option<String> {
    let mut result = None;

    for line in output.lines() {
        let Ok(event) = serde_json::from_str::<Value>(line) else {
            continue;
        };

        if event.get("type").and_then(Value::as_str) == Some("result") {
            if let Some(text) = event.get("result").and_then(Value::as_str) {
                result = Some(text.to_string());
            }
        }
    }

    result
}
