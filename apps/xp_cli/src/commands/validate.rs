// apps/xp_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 解析并交叉验证配置文档。所有 rank 都执行同样的验证，
//! 只有 rank 0 输出选项报告与 JSON。

use anyhow::{bail, Context, Result};
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use xp_config::{emit, parse_file, Advisory, ParsedOptions};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径 (TOML)
    #[arg(short, long)]
    pub config: PathBuf,

    /// 当前进程的 rank，只有 0 输出报告
    #[arg(short, long, default_value_t = 0)]
    pub rank: u32,

    /// 严格模式（提示也视为错误）
    #[arg(long)]
    pub strict: bool,

    /// 将验证后的选项写出为 JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// 不输出选项报告
    #[arg(short, long)]
    pub quiet: bool,
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== ExaPlast 配置验证 ===");
    let stdout = io::stdout();
    run(&args, &mut stdout.lock())
}

fn run<W: Write>(args: &ValidateArgs, out: &mut W) -> Result<()> {
    let parsed = parse_file(&args.config)
        .with_context(|| format!("配置验证失败: {}", args.config.display()))?;

    report_advisories(&parsed.advisories);

    if !args.quiet {
        emit(&parsed.options, args.rank, &mut *out).context("无法写出选项报告")?;
    }

    if let Some(path) = &args.json {
        if args.rank == 0 {
            parsed
                .options
                .save_json(path)
                .with_context(|| format!("无法写出 JSON: {}", path.display()))?;
            info!("选项已写出: {}", path.display());
        }
    }

    finish(&parsed, args.strict)
}

fn report_advisories(advisories: &[Advisory]) {
    for advisory in advisories {
        warn!("⚠ {}", advisory);
    }
}

fn finish(parsed: &ParsedOptions, strict: bool) -> Result<()> {
    if strict && !parsed.is_clean() {
        bail!(
            "验证失败：严格模式下发现 {} 条提示",
            parsed.advisories.len()
        );
    }
    info!("✓ 验证通过");
    Ok(())
}
