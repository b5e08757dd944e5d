// crates/xp_config/src/sections/solvers.rs

//! `[Solvers]`：组装方式、运行时目标、非线性求解器、积分格式、Krylov 求解器

use crate::choice::{
    read_choice, Assembly, Choice, IntegrationType, KrylovSolver, NlSolver, RtModel,
};
use crate::context::ValidationContext;
use crate::error::{ConfigError, ConfigResult};
use crate::options::{ExaOptions, SolverOptions};
use crate::probe::Capability;
use crate::tree::TableRef;

use super::Section;

/// 求解器验证器
#[derive(Debug, Clone, Copy, Default)]
pub struct SolversSection;

impl Section for SolversSection {
    fn name(&self) -> &'static str {
        "Solvers"
    }

    fn validate(
        &self,
        ctx: &mut ValidationContext<'_>,
        options: &mut ExaOptions,
    ) -> ConfigResult<()> {
        let Some(section) = ctx.tree().table(self.name())? else {
            options.solvers = SolverOptions::default();
            return Ok(());
        };
        let mut solvers = SolverOptions {
            assembly: read_choice(&section, "assembly", Some("full"))?,
            ..SolverOptions::default()
        };
        solvers.rtmodel = read_rtmodel(ctx, &section, solvers.assembly)?;

        if let Some(nr) = section.table("NR")? {
            solvers.nl_solver = read_choice(&nr, "nl_solver", Some("nr"))?;
            solvers.newton_iter = nr.get_usize("iter")?.unwrap_or(solvers.newton_iter);
            solvers.newton_rel_tol = nr.get_f64("rel_tol")?.unwrap_or(solvers.newton_rel_tol);
            solvers.newton_abs_tol = nr.get_f64("abs_tol")?.unwrap_or(solvers.newton_abs_tol);
        }

        solvers.integ_type = read_choice(&section, "integ_model", Some("full"))?;
        if solvers.integ_type == IntegrationType::BBar && solvers.nl_solver == NlSolver::Nr {
            ctx.advise(
                section.qualify("integ_model"),
                "BBar 积分与带线搜索的 Newton-Raphson (nrls) 搭配效果更好",
            );
        }

        if let Some(krylov) = section.table("Krylov")? {
            solvers.krylov_solver = read_choice::<KrylovSolver>(&krylov, "solver", Some("gmres"))?;
            solvers.krylov_iter = krylov.get_usize("iter")?.unwrap_or(solvers.krylov_iter);
            solvers.krylov_rel_tol = krylov.get_f64("rel_tol")?.unwrap_or(solvers.krylov_rel_tol);
            solvers.krylov_abs_tol = krylov.get_f64("abs_tol")?.unwrap_or(solvers.krylov_abs_tol);
        }

        tracing::debug!(
            assembly = %solvers.assembly,
            rtmodel = %solvers.rtmodel,
            "Solvers 验证通过"
        );
        options.solvers = solvers;
        Ok(())
    }
}

/// 解析运行时目标；未编译进来的目标视为不可用
fn read_rtmodel(
    ctx: &ValidationContext<'_>,
    section: &TableRef<'_>,
    assembly: Assembly,
) -> ConfigResult<RtModel> {
    let key = section.qualify("rtmodel");
    let raw = section.get_str("rtmodel")?.unwrap_or("cpu");
    let rtmodel = RtModel::parse_for(&key, raw)?;
    match rtmodel {
        RtModel::Cpu => {}
        RtModel::OpenMp => ctx.require_capability(&key, raw, Capability::OpenMp)?,
        RtModel::Cuda => {
            ctx.require_capability(&key, raw, Capability::Cuda)?;
            if assembly == Assembly::Full {
                return Err(ConfigError::incompatible(
                    key,
                    "CUDA 运行时不支持全组装 (assembly = full)",
                ));
            }
        }
    }
    Ok(rtmodel)
}
