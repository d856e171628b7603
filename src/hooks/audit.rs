//! 审计日志
//!
//! 每次决策追加一行 JSON 到按日切分的日志文件，只写不读。
//! 写失败只打 stderr 警告，绝不影响已经做出的决策。

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::hooks::review_parser::{Finding, ProofreadVerdict};

/// 一条审计记录
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    /// 原始 prompt（归一化之前）
    pub prompt: String,
    pub findings: Vec<Finding>,
    /// "block" | "pass"
    pub decision: &'static str,
}

impl AuditEntry {
    pub fn new(prompt: &str, verdict: &ProofreadVerdict) -> Self {
        let (findings, decision) = match verdict {
            ProofreadVerdict::Clean => (Vec::new(), "pass"),
            ProofreadVerdict::HasIssues(findings) => (findings.clone(), "block"),
        };

        AuditEntry {
            timestamp: Utc::now(),
            prompt: prompt.to_string(),
            findings,
            decision,
        }
    }
}

/// 默认日志目录：~/.claude/proofreader/logs
pub fn audit_log_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".claude/proofreader/logs"))
}

/// 追加一条审计记录（best-effort，调用方自行决定如何报告失败）
pub fn append_audit_log(entry: &AuditEntry) -> Result<()> {
    let dir = audit_log_dir().context("Could not resolve home directory")?;
    append_audit_log_to(&dir, entry)
}

/// 写到指定目录，文件名取记录时间戳的日期部分
pub fn append_audit_log_to(dir: &Path, entry: &AuditEntry) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let path = dir.join(format!("{}.jsonl", entry.timestamp.format("%Y-%m-%d")));
    let line = serde_json::to_string(entry).context("Failed to serialize audit entry")?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    writeln!(file, "{}", line)
        .with_context(|| format!("Failed to append to log file: {}", path.display()))
}
