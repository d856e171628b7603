//! Transcript 倒序扫描
//!
//! 会话日志可能很大，不能整个读进内存。从文件末尾按固定大小的 chunk
//! 往前读，按换行切分后从后往前逐行求值，找到第一条 assistant 记录就停。
//! 每个 chunk 最左边的片段可能是被切断的半行，留给下一个 chunk 拼接，
//! 绝不提前求值。
//!
//! 文件不存在、为空、或根本没有 assistant 记录都是正常情况（比如会话
//! 第一轮），返回 None 而不是错误。

use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// 每次倒序读取的块大小
const READ_CHUNK_SIZE: u64 = 8192;

/// 会话日志里的一条记录
#[derive(Debug, Deserialize)]
struct TranscriptRecord {
    #[serde(rename = "type")]
    role: String,
    #[serde(default)]
    content: Option<RecordContent>,
}

/// content 字段：纯字符串，或带类型的 block 序列
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// 返回日志中最近一条 assistant 记录的文本内容
pub fn last_assistant_message(path: &Path) -> Option<String> {
    let mut file = File::open(path).ok()?;
    let len = file.metadata().ok()?.len();
    if len == 0 {
        return None;
    }

    let mut pos = len;
    // 上一个 chunk 切分后留下的最左片段（可能是半行）
    let mut carry: Vec<u8> = Vec::new();

    while pos > 0 {
        let start = pos.saturating_sub(READ_CHUNK_SIZE);
        let mut chunk = vec![0u8; (pos - start) as usize];
        file.seek(SeekFrom::Start(start)).ok()?;
        file.read_exact(&mut chunk).ok()?;
        pos = start;

        chunk.extend_from_slice(&carry);

        let mut parts: Vec<&[u8]> = chunk.split(|&b| b == b'\n').collect();
        // 最左片段留到下一轮再拼
        let head = parts.remove(0).to_vec();

        for line in parts.iter().rev() {
            if let Some(text) = parse_assistant_line(line) {
                return Some(text);
            }
        }

        carry = head;
    }

    // 到达文件开头，carry 就是完整的第一行
    parse_assistant_line(&carry)
}

/// 解析一行记录，assistant 记录返回其文本内容，其余返回 None
///
/// 非法 JSON 行直接跳过（返回 None），不中断扫描。
fn parse_assistant_line(line: &[u8]) -> Option<String> {
    if line.iter().all(|b| b.is_ascii_whitespace()) {
        return None;
    }

    let record: TranscriptRecord = serde_json::from_slice(line).ok()?;
    if record.role != "assistant" {
        return None;
    }

    Some(extract_text(record.content))
}

/// 从 content 字段提取纯文本
///
/// block 序列只拼接 text 类型的 block（按原顺序、无分隔符），
/// tool_use 等其他类型全部忽略。
fn extract_text(content: Option<RecordContent>) -> String {
    match content {
        None => String::new(),
        Some(RecordContent::Text(s)) => s,
        Some(RecordContent::Blocks(blocks)) => blocks
            .into_iter()
            .filter(|b| b.kind == "text")
            .filter_map(|b| b.text)
            .collect(),
    }
}
