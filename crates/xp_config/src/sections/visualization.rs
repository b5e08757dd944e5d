// crates/xp_config/src/sections/visualization.rs

//! `[Visualizations]`：输出频率、输出后端与平均量文件名

use crate::context::ValidationContext;
use crate::error::ConfigResult;
use crate::options::{ExaOptions, VisualizationOptions};
use crate::probe::Capability;

use super::Section;

/// 可视化验证器
#[derive(Debug, Clone, Copy, Default)]
pub struct VisualizationSection;

impl Section for VisualizationSection {
    fn name(&self) -> &'static str {
        "Visualizations"
    }

    fn validate(
        &self,
        ctx: &mut ValidationContext<'_>,
        options: &mut ExaOptions,
    ) -> ConfigResult<()> {
        let Some(section) = ctx.tree().table(self.name())? else {
            return Ok(());
        };
        let d = VisualizationOptions::default();

        let vis = VisualizationOptions {
            steps: section.get_usize("steps")?.unwrap_or(d.steps),
            visit: section.get_bool("visit")?.unwrap_or(d.visit),
            conduit: section.get_bool("conduit")?.unwrap_or(d.conduit),
            paraview: section.get_bool("paraview")?.unwrap_or(d.paraview),
            adios2: section.get_bool("adios2")?.unwrap_or(d.adios2),
            basename: section.get_path("floc")?.unwrap_or(d.basename),
            avg_stress_fname: section.get_path("avg_stress_fname")?.unwrap_or(d.avg_stress_fname),
            additional_avgs: section.get_bool("additional_avgs")?.unwrap_or(d.additional_avgs),
            avg_def_grad_fname: section
                .get_path("avg_def_grad_fname")?
                .unwrap_or(d.avg_def_grad_fname),
            avg_pl_work_fname: section
                .get_path("avg_pl_work_fname")?
                .unwrap_or(d.avg_pl_work_fname),
            avg_dp_tensor_fname: section
                .get_path("avg_dp_tensor_fname")?
                .unwrap_or(d.avg_dp_tensor_fname),
        };

        if vis.conduit {
            ctx.require_capability(&section.qualify("conduit"), "true", Capability::Conduit)?;
        }
        if vis.adios2 {
            ctx.require_capability(&section.qualify("adios2"), "true", Capability::Adios2)?;
        }

        options.visualization = vis;
        tracing::debug!("Visualizations 验证通过");
        Ok(())
    }
}
