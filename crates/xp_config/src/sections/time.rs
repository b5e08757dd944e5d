// crates/xp_config/src/sections/time.rs

//! `[Time]`：固定步长 / 自定义步长
//!
//! 两个子表都可选。同时给出时自定义步长优先，并记录一条提示；
//! 严格模式下调用方可以把这条提示当作错误处理。

use crate::context::ValidationContext;
use crate::error::ConfigResult;
use crate::options::ExaOptions;

use super::Section;

/// 时间步验证器
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSection;

impl Section for TimeSection {
    fn name(&self) -> &'static str {
        "Time"
    }

    fn validate(
        &self,
        ctx: &mut ValidationContext<'_>,
        options: &mut ExaOptions,
    ) -> ConfigResult<()> {
        let Some(section) = ctx.tree().table(self.name())? else {
            tracing::debug!("未给出 [Time]，使用默认固定步长");
            return Ok(());
        };
        let time = &mut options.time;

        let fixed = section.table("Fixed")?;
        if let Some(fixed) = &fixed {
            time.dt_cust = false;
            time.dt = fixed.get_f64("dt")?.unwrap_or(time.dt);
            time.t_final = fixed.get_f64("t_final")?.unwrap_or(time.t_final);
        }

        if let Some(custom) = section.table("Custom")? {
            time.dt_cust = true;
            time.nsteps = custom.get_usize("nsteps")?.unwrap_or(time.nsteps);
            time.dt_file = custom.get_path("floc")?.unwrap_or_else(|| time.dt_file.clone());

            if fixed.is_some() {
                ctx.advise(
                    section.path(),
                    "同时给出了 Fixed 与 Custom，使用 Custom 自定义时间步",
                );
            }
        }

        tracing::debug!(dt_cust = options.time.dt_cust, "Time 验证通过");
        Ok(())
    }
}
