// crates/xp_config/src/report.rs

//! 选项报告
//!
//! 人类可读的选项清单，只在 rank 0 输出。顺序固定：
//! 网格 → 时间步 → 可视化 → 非线性求解器 → 积分格式 → 线性求解器 →
//! 组装/运行时 → 材料模型 → 晶粒/取向 → 材料参数 → 边界条件时间表。

use std::fmt;
use std::io::{self, Write};

use crate::choice::{
    Assembly, IntegrationType, KrylovSolver, MechType, NlSolver, RtModel, SlipType, XtalType,
};
use crate::options::{ExaOptions, MeshSource};

/// 选项报告（通过 `Display` 渲染）
#[derive(Debug, Clone, Copy)]
pub struct OptionsReport<'a> {
    options: &'a ExaOptions,
}

impl<'a> OptionsReport<'a> {
    /// 包装一组选项
    pub fn new(options: &'a ExaOptions) -> Self {
        Self { options }
    }
}

/// 在 rank 0 上写出报告，其他 rank 什么都不做
///
/// 返回是否实际写出。
pub fn emit<W: Write>(options: &ExaOptions, rank: u32, mut out: W) -> io::Result<bool> {
    if rank != 0 {
        return Ok(false);
    }
    write!(out, "{}", OptionsReport::new(options))?;
    out.flush()?;
    Ok(true)
}

impl fmt::Display for OptionsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.options;

        // 网格
        let mesh = &o.mesh;
        match &mesh.source {
            MeshSource::Auto { length, ncuts } => {
                writeln!(f, "Mesh type: auto")?;
                writeln!(
                    f,
                    "Edge dimensions (mx, my, mz): {} {} {}",
                    length[0], length[1], length[2]
                )?;
                writeln!(
                    f,
                    "Number of cells on an edge (nx, ny, nz): {} {} {}",
                    ncuts[0], ncuts[1], ncuts[2]
                )?;
            }
            source => {
                if let Some(file) = source.file() {
                    writeln!(f, "Mesh file location: {}", file.display())?;
                }
                writeln!(f, "Mesh type: {}", source.mesh_type())?;
            }
        }
        writeln!(f, "Serial Refinement level: {}", mesh.ref_ser)?;
        writeln!(f, "Parallel Refinement level: {}", mesh.ref_par)?;
        writeln!(f, "P-refinement level: {}", mesh.order)?;

        // 时间步
        let time = &o.time;
        writeln!(f, "Custom dt flag (dt_cust): {}", time.dt_cust)?;
        if time.dt_cust {
            writeln!(f, "Number of time steps (nsteps): {}", time.nsteps)?;
            writeln!(f, "Custom time file loc (dt_file): {}", time.dt_file.display())?;
        } else {
            writeln!(f, "Constant time stepping on")?;
            writeln!(f, "Final time (t_final): {}", time.t_final)?;
            writeln!(f, "Time step (dt): {}", time.dt)?;
        }

        // 可视化
        let vis = &o.visualization;
        writeln!(f, "Visit flag: {}", vis.visit)?;
        writeln!(f, "Conduit flag: {}", vis.conduit)?;
        writeln!(f, "Paraview flag: {}", vis.paraview)?;
        writeln!(f, "ADIOS2 flag: {}", vis.adios2)?;
        writeln!(f, "Visualization steps: {}", vis.steps)?;
        writeln!(f, "Visualization directory: {}", vis.basename.display())?;
        writeln!(f, "Average stress filename: {}", vis.avg_stress_fname.display())?;
        if vis.additional_avgs {
            writeln!(f, "Additional averages being computed")?;
            writeln!(
                f,
                "Average deformation gradient filename: {}",
                vis.avg_def_grad_fname.display()
            )?;
            writeln!(
                f,
                "Average plastic work filename: {}",
                vis.avg_pl_work_fname.display()
            )?;
            writeln!(
                f,
                "Average plastic strain rate tensor filename: {}",
                vis.avg_dp_tensor_fname.display()
            )?;
        } else {
            writeln!(f, "No additional averages being computed")?;
        }

        // 求解器
        let s = &o.solvers;
        let nl = match s.nl_solver {
            NlSolver::Nr => "Newton Raphson",
            NlSolver::NrLs => "Newton Raphson with a line search",
        };
        writeln!(f, "Nonlinear Solver is {nl}")?;
        writeln!(f, "Newton Raphson rel. tol.: {:e}", s.newton_rel_tol)?;
        writeln!(f, "Newton Raphson abs. tol.: {:e}", s.newton_abs_tol)?;
        writeln!(f, "Newton Raphson # of iter.: {}", s.newton_iter)?;

        let integ = match s.integ_type {
            IntegrationType::Full => "Full",
            IntegrationType::BBar => "BBar",
        };
        writeln!(f, "Integration Type: {integ}")?;

        let krylov = match s.krylov_solver {
            KrylovSolver::Gmres => "GMRES",
            KrylovSolver::Pcg => "PCG",
            KrylovSolver::Minres => "MINRES",
        };
        writeln!(f, "Krylov solver: {krylov}")?;
        writeln!(f, "Krylov solver rel. tol.: {:e}", s.krylov_rel_tol)?;
        writeln!(f, "Krylov solver abs. tol.: {:e}", s.krylov_abs_tol)?;
        writeln!(f, "Krylov solver # of iter.: {}", s.krylov_iter)?;

        let assembly = match s.assembly {
            Assembly::Full => "Full Assembly",
            Assembly::Partial => "Partial Assembly",
            Assembly::Element => "Element Assembly",
        };
        writeln!(f, "Matrix Assembly is: {assembly}")?;
        let rt = match s.rtmodel {
            RtModel::Cpu => "CPU",
            RtModel::Cuda => "CUDA",
            RtModel::OpenMp => "OpenMP",
        };
        writeln!(f, "Runtime model is: {rt}")?;

        // 材料模型
        let m = &o.model;
        match m.mech_type {
            MechType::Umat => writeln!(f, "Mechanical model library being used UMAT")?,
            MechType::ExaCMech => {
                writeln!(f, "Mechanical model library being used ExaCMech")?;
                if m.xtal_type != XtalType::None {
                    writeln!(
                        f,
                        "Crystal symmetry group is {}",
                        m.xtal_type.to_string().to_uppercase()
                    )?;
                }
                if let Some(law) = slip_description(m.slip_type) {
                    writeln!(f, "Slip system and hardening model being used is {law}")?;
                }
            }
        }
        writeln!(f, "Xtal Plasticity being used: {}", m.cp)?;

        // 晶粒 / 取向
        let p = &o.properties;
        let g = &p.grain;
        writeln!(f, "Orientation file location: {}", g.ori_file.display())?;
        writeln!(f, "Grain map file location: {}", g.grain_map.display())?;
        writeln!(f, "Number of grains: {}", g.num_grains)?;
        writeln!(f, "Orientation type: {}", g.ori_type)?;
        writeln!(f, "Custom stride to read grain map file: {}", g.ori_stride)?;
        match g.ori_state_var_loc {
            Some(loc) => writeln!(f, "Orientation offset in state variable file: {loc}")?,
            None => writeln!(f, "Orientation offset in state variable file: unset")?,
        }

        // 材料参数
        writeln!(f, "Temperature (K): {}", p.temperature_k)?;
        writeln!(f, "Number of properties: {}", p.num_props)?;
        writeln!(f, "Property file location: {}", p.props_file.display())?;
        writeln!(f, "Number of state variables: {}", p.num_state_vars)?;
        writeln!(f, "State variable file location: {}", p.state_file.display())?;

        // 边界条件，按声明顺序
        for (step, bc) in o.bcs.iter_updates() {
            writeln!(f, "Starting on step {step} essential BCs values are:")?;
            writeln!(f, "Essential ids are set as: {}", join(&bc.ids))?;
            writeln!(f, "Essential components are set as: {}", join(&bc.comps))?;
            writeln!(f, "Essential boundary values are set as: {}", join(&bc.values))?;
        }
        Ok(())
    }
}

fn slip_description(slip: SlipType) -> Option<&'static str> {
    match slip {
        SlipType::MtsDd => {
            Some("MTS slip like kinetics with dislocation density based hardening")
        }
        SlipType::PowerVoce => Some("Power law slip kinetics with a linear Voce hardening law"),
        SlipType::PowerVoceNl => {
            Some("Power law slip kinetics with a nonlinear Voce hardening law")
        }
        SlipType::None => None,
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{BcSchedule, BcStep};
    use std::collections::BTreeMap;

    fn position(text: &str, needle: &str) -> usize {
        text.find(needle)
            .unwrap_or_else(|| panic!("报告中缺少 '{needle}'"))
    }

    #[test]
    fn test_section_order() {
        let text = OptionsReport::new(&ExaOptions::default()).to_string();
        let order = [
            "Mesh file location",
            "Custom dt flag",
            "Visit flag",
            "Nonlinear Solver",
            "Integration Type",
            "Krylov solver:",
            "Matrix Assembly",
            "Mechanical model library",
            "Orientation file location",
            "Number of properties",
        ];
        let positions: Vec<_> = order.iter().map(|n| position(&text, n)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn test_extra_averages_only_when_enabled() {
        let mut options = ExaOptions::default();
        let text = OptionsReport::new(&options).to_string();
        assert!(text.contains("No additional averages"));
        assert!(!text.contains("Average plastic work filename"));

        options.visualization.additional_avgs = true;
        let text = OptionsReport::new(&options).to_string();
        assert!(text.contains("Average plastic work filename"));
    }

    #[test]
    fn test_bc_steps_in_declared_order() {
        let mut steps = BTreeMap::new();
        steps.insert(0, BcStep::default());
        for (s, id) in [(1u64, 7i64), (4, 8), (9, 9)] {
            steps.insert(
                s,
                BcStep {
                    ids: vec![id],
                    comps: vec![0],
                    values: vec![0.5],
                },
            );
        }
        let mut options = ExaOptions::default();
        options.bcs = BcSchedule {
            changing: true,
            update_steps: vec![1, 9, 4],
            steps,
        };
        let text = OptionsReport::new(&options).to_string();
        let a = position(&text, "Starting on step 1 ");
        let b = position(&text, "Starting on step 9 ");
        let c = position(&text, "Starting on step 4 ");
        assert!(a < b && b < c);
        assert!(!text.contains("Starting on step 0"));
        assert!(text.contains("Essential ids are set as: 9"));
    }

    #[test]
    fn test_emit_rank_gated() {
        let options = ExaOptions::default();
        let mut buf = Vec::new();
        assert!(!emit(&options, 3, &mut buf).unwrap());
        assert!(buf.is_empty());
        assert!(emit(&options, 0, &mut buf).unwrap());
        assert!(String::from_utf8(buf).unwrap().starts_with("Mesh file location"));
    }
}
