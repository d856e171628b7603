//! Transcript 模块
//!
//! 从 Claude Code 会话日志（append-only JSONL）重建上下文

pub mod reader;
pub mod truncate;

// 重导出
pub use reader::*;
pub use truncate::*;
