//! 校对结果解析器
//!
//! 回复格式经历过两代：早期是自由文本讲解，现在是 JSON 数组。
//! 两种都必须接受，解析不动的回复原样兜底返回，绝不丢掉模型给出的反馈。

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// "无问题" 哨兵，精确匹配或前缀匹配
pub const NO_ISSUES_SENTINEL: &str = "NO_ISSUES";

lazy_static! {
    // 模型常把 JSON 包在 code fence 里，剥一层
    static ref CODE_FENCE: Regex = Regex::new(r"(?s)^```(?:\w+)?\s*(.*?)\s*```$").unwrap();
}

/// 单条校对发现
///
/// 审计日志里 Correction 序列化为三字段对象，Raw 序列化为裸字符串。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Finding {
    /// 结构化修正：原文、改后、讲解
    Correction {
        original: String,
        corrected: String,
        explanation: String,
    },
    /// 未能结构化解析的原始反馈
    Raw(String),
}

/// 校对判定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofreadVerdict {
    Clean,
    HasIssues(Vec<Finding>),
}

/// 解析模型回复
///
/// 1. 哨兵（精确或前缀）→ Clean
/// 2. 剥掉可能的 code fence，按 JSON 数组解析，每个元素一条 Correction
/// 3. 都失败 → 整段回复作为单条 Raw 返回
///
/// 注意：空数组 `[]` 解析为零条发现的 HasIssues，不归一化为 Clean。
pub fn parse_proofread_reply(raw: &str) -> ProofreadVerdict {
    let trimmed = raw.trim();

    if trimmed.starts_with(NO_ISSUES_SENTINEL) {
        return ProofreadVerdict::Clean;
    }

    let candidate = match CODE_FENCE.captures(trimmed) {
        Some(caps) => caps[1].to_string(),
        None => trimmed.to_string(),
    };

    match serde_json::from_str::<Value>(&candidate) {
        Ok(Value::Array(items)) => {
            let findings = items.iter().map(correction_from_value).collect();
            ProofreadVerdict::HasIssues(findings)
        }
        _ => ProofreadVerdict::HasIssues(vec![Finding::Raw(trimmed.to_string())]),
    }
}

/// 数组元素 → Correction，缺失字段按空字符串处理（fail-open，不做校验）
fn correction_from_value(item: &Value) -> Finding {
    let field = |key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string()
    };

    Finding::Correction {
        original: field("original"),
        corrected: field("corrected"),
        explanation: field("explanation"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_exact() {
        assert_eq!(parse_proofread_reply("NO_ISSUES"), ProofreadVerdict::Clean);
    }

    #[test]
    fn test_sentinel_with_whitespace() {
        assert_eq!(parse_proofread_reply("  NO_ISSUES  "), ProofreadVerdict::Clean);
    }

    #[test]
    fn test_sentinel_prefix() {
        assert_eq!(
            parse_proofread_reply("NO_ISSUES - your text is perfect!"),
            ProofreadVerdict::Clean
        );
    }

    #[test]
    fn test_json_array_parsed() {
        let reply = r#"[{"original":"a","corrected":"b","explanation":"c"}]"#;
        let ProofreadVerdict::HasIssues(findings) = parse_proofread_reply(reply) else {
            panic!("expected HasIssues");
        };
        assert_eq!(
            findings,
            vec![Finding::Correction {
                original: "a".to_string(),
                corrected: "b".to_string(),
                explanation: "c".to_string(),
            }]
        );
    }

    #[test]
    fn test_code_fence_stripped() {
        let reply = "```json\n[{\"original\":\"a\",\"corrected\":\"b\",\"explanation\":\"c\"}]\n```";
        let ProofreadVerdict::HasIssues(findings) = parse_proofread_reply(reply) else {
            panic!("expected HasIssues");
        };
        assert_eq!(findings.len(), 1);
        assert!(matches!(findings[0], Finding::Correction { .. }));
    }

    #[test]
    fn test_unparseable_falls_back_to_raw() {
        let reply = "not json";
        assert_eq!(
            parse_proofread_reply(reply),
            ProofreadVerdict::HasIssues(vec![Finding::Raw("not json".to_string())])
        );
    }

    #[test]
    fn test_json_object_is_not_an_array() {
        // 顶层不是数组也走 raw 兜底
        let reply = r#"{"original":"a"}"#;
        let ProofreadVerdict::HasIssues(findings) = parse_proofread_reply(reply) else {
            panic!("expected HasIssues");
        };
        assert_eq!(findings, vec![Finding::Raw(reply.to_string())]);
    }

    #[test]
    fn test_empty_array_stays_has_issues() {
        assert_eq!(
            parse_proofread_reply("[]"),
            ProofreadVerdict::HasIssues(vec![])
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let reply = r#"[{"original":"a"}]"#;
        let ProofreadVerdict::HasIssues(findings) = parse_proofread_reply(reply) else {
            panic!("expected HasIssues");
        };
        assert_eq!(
            findings[0],
            Finding::Correction {
                original: "a".to_string(),
                corrected: String::new(),
                explanation: String::new(),
            }
        );
    }

    #[test]
    fn test_finding_serialization_shapes() {
        let correction = Finding::Correction {
            original: "a".to_string(),
            corrected: "b".to_string(),
            explanation: "c".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&correction).unwrap(),
            r#"{"original":"a","corrected":"b","explanation":"c"}"#
        );

        let raw = Finding::Raw("free text".to_string());
        assert_eq!(serde_json::to_string(&raw).unwrap(), r#""free text""#);
    }
}
