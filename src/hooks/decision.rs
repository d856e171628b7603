//! Hook 决策输出
//!
//! 三种输出形态（UserPromptSubmit 协议）：
//! - `{}`                                  无意见（未触发校对或内部出错）
//! - `{suppressOutput, systemMessage}`     放行，静默确认
//! - `{decision: "block", reason}`         拦截，附教学反馈

use serde_json::{json, Value};

use crate::hooks::review_parser::{Finding, ProofreadVerdict};

/// 判定 → hook 输出对象
pub fn emit_decision(verdict: &ProofreadVerdict) -> Value {
    match verdict {
        ProofreadVerdict::Clean => json!({
            "suppressOutput": true,
            "systemMessage": "✓ No English issues found"
        }),
        ProofreadVerdict::HasIssues(findings) => json!({
            "decision": "block",
            "reason": format!(
                "📝 English Proofreading:\n\n{}\n\nPlease revise your prompt and re-submit.",
                render_findings(findings)
            )
        }),
    }
}

/// 无意见输出（英文门槛/空 prompt 短路，以及顶层兜底都用它）
pub fn emit_no_opinion() -> Value {
    json!({})
}

/// 按返回顺序渲染每条发现，可见分隔符连接，不排序不去重
pub fn render_findings(findings: &[Finding]) -> String {
    findings
        .iter()
        .map(|finding| match finding {
            Finding::Correction {
                original,
                corrected,
                explanation,
            } => format!(
                "✗ \"{}\" → \"{}\"\nExplanation: {}",
                original, corrected, explanation
            ),
            Finding::Raw(text) => text.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_emits_suppressed_confirmation() {
        let output = emit_decision(&ProofreadVerdict::Clean);
        assert_eq!(output["suppressOutput"], true);
        assert_eq!(output["systemMessage"], "✓ No English issues found");
        assert!(output.get("decision").is_none());
    }

    #[test]
    fn test_issues_emit_block() {
        let verdict = ProofreadVerdict::HasIssues(vec![Finding::Correction {
            original: "I have went".to_string(),
            corrected: "I went".to_string(),
            explanation: "Use simple past.".to_string(),
        }]);

        let output = emit_decision(&verdict);
        assert_eq!(output["decision"], "block");

        let reason = output["reason"].as_str().unwrap();
        assert!(reason.contains("I have went"));
        assert!(reason.contains("I went"));
        assert!(reason.contains("Use simple past."));
        assert!(reason.contains("re-submit"));
    }

    #[test]
    fn test_raw_finding_rendered_verbatim() {
        let verdict =
            ProofreadVerdict::HasIssues(vec![Finding::Raw("free-form feedback".to_string())]);
        let output = emit_decision(&verdict);
        assert!(output["reason"]
            .as_str()
            .unwrap()
            .contains("free-form feedback"));
    }

    #[test]
    fn test_findings_joined_in_order() {
        let findings = vec![
            Finding::Raw("first".to_string()),
            Finding::Raw("second".to_string()),
        ];
        let rendered = render_findings(&findings);
        assert_eq!(rendered, "first\n\n---\n\nsecond");
    }

    #[test]
    fn test_zero_findings_still_block() {
        // 空数组判定保持 block（见 DESIGN.md 开放问题 1）
        let output = emit_decision(&ProofreadVerdict::HasIssues(vec![]));
        assert_eq!(output["decision"], "block");
    }

    #[test]
    fn test_no_opinion_is_empty_object() {
        assert_eq!(emit_no_opinion().to_string(), "{}");
    }
}
