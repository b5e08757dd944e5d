// apps/xp_cli/src/main.rs

//! ExaPlast 命令行界面
//!
//! 在仿真启动前检查一份 TOML 配置文档。多进程运行时每个进程都执行同样的
//! 验证（`--rank` 只决定谁输出报告），因此任何进程的失败都意味着所有
//! 进程失败。
//!
//! # 退出码
//!
//! - `0`: 验证通过；`--strict` 下还要求没有任何提示
//! - 非 0: 配置错误（消息中给出出错的键），或严格模式下存在提示
//!
//! 日志写到 stderr，报告写到 stdout，两者可以分别重定向。

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// ExaPlast 配置验证工具
#[derive(Parser)]
#[command(name = "xp_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "ExaPlast crystal plasticity option validator", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 解析并交叉验证配置文档，rank 0 输出选项报告
    Validate(commands::validate::ValidateArgs),
    /// 显示构建能力、兼容矩阵与默认选项
    Info(commands::info::InfoArgs),
}

/// 未识别的级别按 info 处理
fn log_level(name: &str) -> Level {
    name.parse().unwrap_or(Level::INFO)
}

fn init_logging(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(log_level(&cli.log_level))?;

    match cli.command {
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Info(args) => commands::info::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_names() {
        assert_eq!(log_level("debug"), Level::DEBUG);
        assert_eq!(log_level("WARN"), Level::WARN);
        assert_eq!(log_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_validate_arguments() {
        let cli = Cli::try_parse_from([
            "xp_cli", "validate", "--config", "options.toml", "--rank", "3", "--strict",
            "-l", "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.rank, 3);
                assert!(args.strict);
                assert!(!args.quiet);
                assert!(args.json.is_none());
            }
            Commands::Info(_) => panic!("期望 validate 子命令"),
        }
    }

    #[test]
    fn test_validate_requires_config() {
        assert!(Cli::try_parse_from(["xp_cli", "validate"]).is_err());
    }
}
