//! claude 命令路径解析器
//!
//! 搜索优先级：
//! 1. 环境变量 `CLAUDE_PROOFREADER_CLAUDE_BIN`（最高优先级，也是测试的注入点）
//! 2. 系统 PATH（尝试执行 `claude --version`）
//! 3. nvm 目录：`~/.nvm/versions/node/*/bin/claude`（取最新版本）
//! 4. 项目本地：`./node_modules/.bin/claude`（向上查找最多 5 层）

use anyhow::Result;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

/// 环境变量覆盖
pub const CLAUDE_BIN_ENV: &str = "CLAUDE_PROOFREADER_CLAUDE_BIN";

/// 进程内缓存，一次解析全程复用
static CLAUDE_PATH_CACHE: OnceLock<Option<PathBuf>> = OnceLock::new();

/// 解析 claude 可执行文件路径（带缓存）
pub fn resolve_claude_path() -> Result<String> {
    let cached = CLAUDE_PATH_CACHE.get_or_init(|| resolve_uncached().ok());

    match cached {
        Some(path) => Ok(path.to_string_lossy().to_string()),
        // 缓存的是失败结果，重新搜索一次换取详细错误信息
        None => resolve_uncached().map(|p| p.to_string_lossy().to_string()),
    }
}

fn resolve_uncached() -> Result<PathBuf> {
    if let Ok(env_path) = env::var(CLAUDE_BIN_ENV) {
        let path = PathBuf::from(&env_path);
        if validate_claude_binary(&path) {
            return Ok(path);
        }
        eprintln!("⚠️  {} points to invalid binary: {}", CLAUDE_BIN_ENV, env_path);
    }

    if is_in_path("claude") {
        return Ok(PathBuf::from("claude"));
    }

    if let Some(path) = search_nvm_directories() {
        return Ok(path);
    }

    if let Some(path) = search_project_local() {
        return Ok(path);
    }

    Err(anyhow::anyhow!(
        "claude command not found.\n\
         Searched: {} env var, system PATH, ~/.nvm/versions/node/*/bin/claude, ./node_modules/.bin/claude\n\
         💡 Install with: npm install -g @anthropic-ai/claude-code\n\
         Or set {} to the full path",
        CLAUDE_BIN_ENV,
        CLAUDE_BIN_ENV
    ))
}

/// 验证路径确实是可执行的 claude：存在、有执行位、`--version` 成功退出
fn validate_claude_binary(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match fs::metadata(path) {
            Ok(metadata) if metadata.permissions().mode() & 0o111 != 0 => {}
            _ => return false,
        }
    }

    Command::new(path)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn is_in_path(cmd: &str) -> bool {
    Command::new(cmd)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// 扫描 nvm 的 node 版本目录，多个版本时取字典序最新的
fn search_nvm_directories() -> Option<PathBuf> {
    let nvm_base = dirs::home_dir()?.join(".nvm/versions/node");

    let mut candidates: Vec<(String, PathBuf)> = fs::read_dir(&nvm_base)
        .ok()?
        .flatten()
        .filter_map(|entry| {
            let version_dir = entry.path();
            let claude_path = version_dir.join("bin/claude");
            if version_dir.is_dir() && validate_claude_binary(&claude_path) {
                Some((entry.file_name().to_string_lossy().to_string(), claude_path))
            } else {
                None
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.0.cmp(&a.0));
    candidates.into_iter().next().map(|(_, path)| path)
}

/// 从当前目录向上找 node_modules/.bin/claude，最多 5 层
fn search_project_local() -> Option<PathBuf> {
    let mut current = env::current_dir().ok()?;

    for _ in 0..5 {
        let candidate = current.join("node_modules/.bin/claude");
        if validate_claude_binary(&candidate) {
            return Some(candidate);
        }
        current = current.parent()?.to_path_buf();
    }

    None
}
