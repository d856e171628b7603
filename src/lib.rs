// Claude English Proofreader - Library Root
//
// UserPromptSubmit hook：提交前英文校对，fail-open 设计

pub mod hooks;
pub mod transcript;

// 重新导出常用类型
pub use hooks::claude_executor::{ClaudeBackend, ReviewBackend};
pub use hooks::review_parser::{Finding, ProofreadVerdict};
pub use hooks::runner::{print_hook_output, run_hook, run_hook_from_stdin};
