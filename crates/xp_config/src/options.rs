// crates/xp_config/src/options.rs

//! ExaOptions - 经过验证的仿真选项
//!
//! 由各 section 验证器依次填充的唯一聚合对象。构造时为默认值，
//! 验证通过后只读，下游求解器无需再做任何检查。

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::choice::{
    Assembly, IntegrationType, KrylovSolver, MechType, MeshType, NlSolver, OriType, RtModel,
    SlipType, XtalType,
};
use crate::error::{ConfigError, ConfigResult};
use crate::schedule::BcSchedule;

/// 仿真选项
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExaOptions {
    /// 材料属性与晶粒
    pub properties: PropertiesOptions,
    /// 本质边界条件时间表
    pub bcs: BcSchedule,
    /// 材料本构模型
    pub model: ModelOptions,
    /// 时间步
    pub time: TimeOptions,
    /// 可视化输出
    pub visualization: VisualizationOptions,
    /// 求解器
    pub solvers: SolverOptions,
    /// 网格
    pub mesh: MeshOptions,
}

impl ExaOptions {
    /// 序列化为 JSON
    pub fn to_json_pretty(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 保存为 JSON 文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

/// 材料属性
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertiesOptions {
    /// 温度 [K]
    pub temperature_k: f64,
    /// 材料参数文件
    pub props_file: PathBuf,
    /// 材料参数个数
    pub num_props: usize,
    /// 状态变量文件
    pub state_file: PathBuf,
    /// 状态变量个数
    pub num_state_vars: usize,
    /// 晶粒与取向
    pub grain: GrainOptions,
}

impl Default for PropertiesOptions {
    fn default() -> Self {
        Self {
            temperature_k: 298.0,
            props_file: PathBuf::from("props.txt"),
            num_props: 1,
            state_file: PathBuf::from("state.txt"),
            num_state_vars: 1,
            grain: GrainOptions::default(),
        }
    }
}

/// 晶粒与取向
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrainOptions {
    /// 取向在状态变量中的起始位置
    pub ori_state_var_loc: Option<usize>,
    /// 读取晶粒映射文件的自定义步长
    pub ori_stride: usize,
    /// 取向表示
    pub ori_type: OriType,
    /// 晶粒数
    pub num_grains: usize,
    /// 取向文件
    pub ori_file: PathBuf,
    /// 晶粒映射文件
    pub grain_map: PathBuf,
}

impl Default for GrainOptions {
    fn default() -> Self {
        Self {
            ori_state_var_loc: None,
            ori_stride: 0,
            ori_type: OriType::None,
            num_grains: 0,
            ori_file: PathBuf::from("ori.txt"),
            grain_map: PathBuf::from("grain_map.txt"),
        }
    }
}

/// 材料本构模型
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelOptions {
    /// 本构库
    pub mech_type: MechType,
    /// 是否为晶体塑性模型
    pub cp: bool,
    /// 晶体对称性（仅 ExaCMech）
    pub xtal_type: XtalType,
    /// 滑移/硬化律（仅 ExaCMech）
    pub slip_type: SlipType,
}

/// 时间步
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeOptions {
    /// 是否使用自定义时间步文件
    pub dt_cust: bool,
    /// 固定时间步长
    pub dt: f64,
    /// 终止时间
    pub t_final: f64,
    /// 自定义步数
    pub nsteps: usize,
    /// 自定义时间步文件
    pub dt_file: PathBuf,
}

impl Default for TimeOptions {
    fn default() -> Self {
        Self {
            dt_cust: false,
            dt: 1.0,
            t_final: 1.0,
            nsteps: 1,
            dt_file: PathBuf::from("custom_dt.txt"),
        }
    }
}

/// 可视化输出
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualizationOptions {
    /// 输出间隔步数
    pub steps: usize,
    /// VisIt 输出
    pub visit: bool,
    /// Conduit 输出
    pub conduit: bool,
    /// ParaView 输出
    pub paraview: bool,
    /// ADIOS2 输出
    pub adios2: bool,
    /// 输出目录/文件名前缀
    pub basename: PathBuf,
    /// 平均应力文件名
    pub avg_stress_fname: PathBuf,
    /// 是否计算额外平均量
    pub additional_avgs: bool,
    /// 平均变形梯度文件名
    pub avg_def_grad_fname: PathBuf,
    /// 平均塑性功文件名
    pub avg_pl_work_fname: PathBuf,
    /// 平均塑性应变率张量文件名
    pub avg_dp_tensor_fname: PathBuf,
}

impl Default for VisualizationOptions {
    fn default() -> Self {
        Self {
            steps: 1,
            visit: false,
            conduit: false,
            paraview: false,
            adios2: false,
            basename: PathBuf::from("results/exaconstit"),
            avg_stress_fname: PathBuf::from("avg_stress.txt"),
            additional_avgs: false,
            avg_def_grad_fname: PathBuf::from("avg_def_grad.txt"),
            avg_pl_work_fname: PathBuf::from("avg_pl_work.txt"),
            avg_dp_tensor_fname: PathBuf::from("avg_dp_tensor.txt"),
        }
    }
}

/// 求解器
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverOptions {
    /// 组装方式
    pub assembly: Assembly,
    /// 运行时目标
    pub rtmodel: RtModel,
    /// 非线性求解器
    pub nl_solver: NlSolver,
    /// Newton 最大迭代次数
    pub newton_iter: usize,
    /// Newton 相对容差
    pub newton_rel_tol: f64,
    /// Newton 绝对容差
    pub newton_abs_tol: f64,
    /// 积分格式
    pub integ_type: IntegrationType,
    /// Krylov 求解器
    pub krylov_solver: KrylovSolver,
    /// Krylov 最大迭代次数
    pub krylov_iter: usize,
    /// Krylov 相对容差
    pub krylov_rel_tol: f64,
    /// Krylov 绝对容差
    pub krylov_abs_tol: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            assembly: Assembly::Full,
            rtmodel: RtModel::Cpu,
            nl_solver: NlSolver::Nr,
            newton_iter: 25,
            newton_rel_tol: 1e-5,
            newton_abs_tol: 1e-10,
            integ_type: IntegrationType::Full,
            krylov_solver: KrylovSolver::Gmres,
            krylov_iter: 200,
            krylov_rel_tol: 1e-10,
            krylov_abs_tol: 1e-30,
        }
    }
}

/// 网格
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshOptions {
    /// 串行加密层数
    pub ref_ser: usize,
    /// 并行加密层数
    pub ref_par: usize,
    /// 多项式阶数
    pub order: usize,
    /// 网格来源
    pub source: MeshSource,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            ref_ser: 0,
            ref_par: 0,
            order: 1,
            source: MeshSource::default(),
        }
    }
}

/// 网格来源记录：文件路径与程序化生成参数互斥
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MeshSource {
    /// Cubit 网格文件
    Cubit {
        /// 网格文件
        file: PathBuf,
    },
    /// 程序化生成的长方体
    Auto {
        /// 各方向边长
        length: [f64; 3],
        /// 各方向单元数
        ncuts: [u64; 3],
    },
    /// 其他格式网格文件
    Other {
        /// 网格文件
        file: PathBuf,
    },
}

impl Default for MeshSource {
    fn default() -> Self {
        Self::Other {
            file: PathBuf::from(DEFAULT_MESH_FILE),
        }
    }
}

/// 默认网格文件
pub const DEFAULT_MESH_FILE: &str = "../../data/cube-hex-ro.mesh";

impl MeshSource {
    /// 来源类型
    pub fn mesh_type(&self) -> MeshType {
        match self {
            Self::Cubit { .. } => MeshType::Cubit,
            Self::Auto { .. } => MeshType::Auto,
            Self::Other { .. } => MeshType::Other,
        }
    }

    /// 文件型来源的路径
    pub fn file(&self) -> Option<&Path> {
        match self {
            Self::Cubit { file } | Self::Other { file } => Some(file.as_path()),
            Self::Auto { .. } => None,
        }
    }
}
