use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

use claude_proofreader::hooks::audit::audit_log_dir;
use claude_proofreader::hooks::claude_executor::DEFAULT_REVIEW_MODEL;
use claude_proofreader::hooks::claude_resolver::{resolve_claude_path, CLAUDE_BIN_ENV};
use claude_proofreader::{print_hook_output, run_hook_from_stdin};

/// Claude English Proofreader
///
/// UserPromptSubmit hook：提交前校对 prompt 里的英文，教学式反馈
#[derive(Parser)]
#[command(name = "claude-proofreader")]
#[command(author, version = env!("APP_VERSION"), about)]
#[command(
    long_about = "English proofreading hook for Claude Code.\n\
                  Blocks prompts with grammar issues and explains the fix, so you learn as you work."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行 hook（由 Claude Code 调用，stdin/stdout JSON）
    Hook {
        /// Hook 名称: proofread
        name: String,
    },

    /// 诊断环境和配置
    Doctor,
}

// ═══════════════════════════════════════════════════════════════════
// Hook 执行
// ═══════════════════════════════════════════════════════════════════

fn run_hook(hook_name: &str) {
    // fail-open：无论内部发生什么，这里都会拿到一个可打印的输出对象
    let output = run_hook_from_stdin(hook_name);
    print_hook_output(&output);
}

// ═══════════════════════════════════════════════════════════════════
// 诊断环境
// ═══════════════════════════════════════════════════════════════════

fn doctor() -> Result<()> {
    println!("{}", "🔍 Claude Proofreader Doctor".cyan().bold());
    println!();

    print!("🤖 claude binary... ");
    match resolve_claude_path() {
        Ok(path) => {
            println!("{}", "✓".green());
            println!("   {}", path.yellow());
        }
        Err(e) => {
            println!("{}", "✗".red());
            println!("   {}", e.to_string().red());
            println!("   Set {} to override", CLAUDE_BIN_ENV.cyan());
        }
    }

    println!();
    print!("📁 Audit log directory... ");
    match audit_log_dir() {
        Some(dir) => match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                println!("{}", "✓".green());
                println!("   {}", dir.display().to_string().yellow());
            }
            Err(e) => {
                println!("{}", "✗".red());
                println!("   {} ({})", dir.display().to_string().red(), e);
            }
        },
        None => {
            println!("{}", "✗".red());
            println!("   {}", "Could not resolve home directory".red());
        }
    }

    println!();
    println!("🧠 Review model: {}", DEFAULT_REVIEW_MODEL.cyan());

    println!();
    println!("{}", "✅ Diagnostic complete".green().bold());

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════
// Main
// ═══════════════════════════════════════════════════════════════════

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Hook { name } => {
            run_hook(&name);
            Ok(())
        }
        Commands::Doctor => doctor(),
    }
}
