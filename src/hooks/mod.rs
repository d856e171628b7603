//! Hook 模块
//!
//! 实现 hooks：proofread（UserPromptSubmit 英文校对）

pub mod audit;
pub mod decision;
pub mod language_gate;
pub mod normalizer;
pub mod prompt_builder;
pub mod proofread;
pub mod review_parser;
pub mod runner;

// Claude 调用相关模块
pub mod claude_executor;
pub mod claude_resolver;

// 重导出
pub use decision::*;
pub use language_gate::*;
pub use normalizer::*;
pub use proofread::*;
pub use runner::*;
