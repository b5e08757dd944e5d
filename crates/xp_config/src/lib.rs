// crates/xp_config/src/lib.rs

//! ExaPlast Config Layer
//!
//! 晶体塑性仿真驱动的配置层：读取一份 TOML 配置文档，按 section 依次
//! 填充默认值、验证并交叉检查，产出只读的 [`ExaOptions`]。
//!
//! # 模块概览
//!
//! - [`tree`]: 配置树访问器（点分路径、类型化取值）
//! - [`choice`]: 封闭选项的解析表（忽略大小写、同义词）
//! - [`compat`]: 晶体对称性 × 硬化律 兼容性矩阵
//! - [`schedule`]: 本质边界条件时间表
//! - [`options`]: ExaOptions 选项聚合
//! - [`sections`]: 各 section 验证器
//! - [`context`]: 验证上下文与提示
//! - [`probe`]: 文件可访问性与构建能力接口
//! - [`parser`]: 解析入口
//! - [`report`]: rank 0 选项报告
//! - [`error`]: 配置错误类型
//!
//! # 数据流
//!
//! ```text
//! TOML ─> ConfigTree ─> Properties → BCs → Model → Time → Visualizations → Solvers → Mesh
//!                                        │
//!                                        └─> ExaOptions + Vec<Advisory> ─> report (rank 0)
//! ```
//!
//! # 设计原则
//!
//! 1. **一次失败即终止**: 任何配置错误都不会留下部分结果
//! 2. **显式上下文**: 配置树与外部接口通过 [`ValidationContext`] 传递
//! 3. **选项即数据**: 枚举解析与兼容性约束都是查表
//! 4. **确定性**: 同一份文档两次解析结果相同

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod choice;
pub mod compat;
pub mod context;
pub mod error;
pub mod options;
pub mod parser;
pub mod probe;
pub mod report;
pub mod schedule;
pub mod sections;
pub mod tree;

// 重导出核心类型
pub use context::{Advisory, ValidationContext};
pub use error::{ConfigError, ConfigResult};
pub use options::{
    ExaOptions, GrainOptions, MeshOptions, MeshSource, ModelOptions, PropertiesOptions,
    SolverOptions, TimeOptions, VisualizationOptions,
};
pub use parser::{parse_file, parse_options, OptionParser, ParsedOptions};
pub use probe::{BuildCapabilities, Capabilities, Capability, FileProbe, FsProbe};
pub use report::{emit, OptionsReport};
pub use schedule::{BcSchedule, BcStep};
pub use tree::{ConfigTree, TableRef};
