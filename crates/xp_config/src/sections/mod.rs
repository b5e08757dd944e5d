// crates/xp_config/src/sections/mod.rs

//! Section 验证器
//!
//! 每个 section 读取配置文档中属于自己的子树，填充默认值、验证，
//! 并写入 [`ExaOptions`]。调用顺序固定，后面的 section 会读取前面写入的字段：
//!
//! ```text
//! Properties → BCs → Model → Time → Visualizations → Solvers → Mesh
//!                      ↑ 读取 num_props / num_state_vars / ori_type
//! ```

use crate::context::ValidationContext;
use crate::error::ConfigResult;
use crate::options::ExaOptions;

pub mod bcs;
pub mod mesh;
pub mod model;
pub mod properties;
pub mod solvers;
pub mod time;
pub mod visualization;

pub use bcs::BcsSection;
pub use mesh::MeshSection;
pub use model::ModelSection;
pub use properties::PropertiesSection;
pub use solvers::SolversSection;
pub use time::TimeSection;
pub use visualization::VisualizationSection;

/// 单个配置 section 的验证器
pub trait Section {
    /// 在配置文档中的表名
    fn name(&self) -> &'static str;

    /// 读取、验证并写入选项
    fn validate(
        &self,
        ctx: &mut ValidationContext<'_>,
        options: &mut ExaOptions,
    ) -> ConfigResult<()>;
}

/// 固定的验证顺序
pub const SECTIONS: [&dyn Section; 7] = [
    &PropertiesSection,
    &BcsSection,
    &ModelSection,
    &TimeSection,
    &VisualizationSection,
    &SolversSection,
    &MeshSection,
];


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_order() {
        let names: Vec<_> = SECTIONS.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "Properties",
                "BCs",
                "Model",
                "Time",
                "Visualizations",
                "Solvers",
                "Mesh"
            ]
        );
    }
}
