// apps/xp_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示构建能力、材料模型兼容矩阵与默认选项。

use anyhow::Result;
use clap::Args;
use tracing::info;
use xp_config::choice::{SlipType, XtalType};
use xp_config::compat::{self, ORI_STATE_VAR_OFFSET};
use xp_config::{BuildCapabilities, Capabilities, Capability, ExaOptions};

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 显示构建能力
    #[arg(long)]
    pub capabilities: bool,

    /// 显示材料模型兼容矩阵
    #[arg(long)]
    pub matrix: bool,

    /// 显示默认选项 (JSON)
    #[arg(long)]
    pub defaults: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== ExaPlast 信息 ===");

    let show_all = !args.capabilities && !args.matrix && !args.defaults;

    if args.capabilities || show_all {
        print!("{}", capabilities_text(&Capabilities::compiled()));
        println!();
    }
    if args.matrix || show_all {
        print!("{}", matrix_text());
        println!();
    }
    if args.defaults || show_all {
        println!("=== 默认选项 ===");
        println!("{}", ExaOptions::default().to_json_pretty()?);
    }

    Ok(())
}

fn capabilities_text(caps: &dyn BuildCapabilities) -> String {
    let mut text = String::from("=== 构建能力 ===\n");
    text.push_str(&format!("xp_cli 版本: {}\n", env!("CARGO_PKG_VERSION")));
    for cap in Capability::ALL {
        let mark = if caps.supports(cap) { "✓" } else { "✗" };
        text.push_str(&format!("  - {cap}: {mark}\n"));
    }
    text
}

fn matrix_text() -> String {
    let laws = [SlipType::MtsDd, SlipType::PowerVoce, SlipType::PowerVoceNl];
    let mut text = String::from("=== ExaCMech 兼容矩阵 (num_props) ===\n");
    text.push_str(&format!("{:<6}", "xtal"));
    for law in laws {
        text.push_str(&format!("{:>14}", law.to_string()));
    }
    text.push_str(&format!("{:>12}\n", "num_vars"));

    for xtal in [XtalType::Fcc, XtalType::Bcc, XtalType::Hcp] {
        text.push_str(&format!("{:<6}", xtal.to_string().to_uppercase()));
        for law in laws {
            let cell = compat::required_props(xtal, law)
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string());
            text.push_str(&format!("{cell:>14}"));
        }
        let vars = compat::required_state_vars(xtal).unwrap_or(0);
        text.push_str(&format!("{vars:>12}\n"));
    }
    text.push_str(&format!(
        "取向四元数在状态变量中的起始位置: {ORI_STATE_VAR_OFFSET}\n"
    ));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_text() {
        let text = capabilities_text(&Capabilities::none());
        assert!(text.contains("cuda: ✗"));
        let text = capabilities_text(&Capabilities::all());
        assert!(text.contains("conduit: ✓"));
    }

    #[test]
    fn test_matrix_marks_unsupported() {
        let text = matrix_text();
        let hcp = text.lines().find(|l| l.starts_with("HCP")).unwrap();
        assert!(hcp.contains("42"));
        assert_eq!(hcp.matches('-').count(), 2);
        assert!(hcp.trim_end().ends_with("38"));
    }
}
