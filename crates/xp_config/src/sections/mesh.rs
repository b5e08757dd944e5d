// crates/xp_config/src/sections/mesh.rs

//! `[Mesh]`：网格来源与加密层数
//!
//! 文件型来源（cubit / other）要求网格文件可访问；程序化生成（auto）
//! 需要 `[Mesh.Auto]` 给出三个方向的边长与单元数，不探测任何文件。

use std::path::PathBuf;

use crate::choice::{read_choice, MeshType};
use crate::context::ValidationContext;
use crate::error::{ConfigError, ConfigResult};
use crate::options::{ExaOptions, MeshOptions, MeshSource, DEFAULT_MESH_FILE};
use crate::tree::TableRef;

use super::Section;

/// 网格验证器
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshSection;

impl Section for MeshSection {
    fn name(&self) -> &'static str {
        "Mesh"
    }

    fn validate(
        &self,
        ctx: &mut ValidationContext<'_>,
        options: &mut ExaOptions,
    ) -> ConfigResult<()> {
        let tree = ctx.tree();
        let Some(section) = tree.table(self.name())? else {
            // 整个表缺省时仍然是默认的文件型来源，需要检查文件
            let mesh = MeshOptions::default();
            if let Some(file) = mesh.source.file() {
                ctx.require_file("Mesh.floc", file)?;
            }
            options.mesh = mesh;
            return Ok(());
        };
        let d = MeshOptions::default();

        let order = section.get_usize("p_refinement")?.unwrap_or(d.order);
        if order < 1 {
            return Err(ConfigError::invalid_value(
                section.qualify("p_refinement"),
                order,
                "多项式阶数至少为 1",
            ));
        }

        let file = section
            .get_path("floc")?
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MESH_FILE));
        let source = match read_choice::<MeshType>(&section, "type", Some("other"))? {
            MeshType::Cubit => MeshSource::Cubit { file },
            MeshType::Other => MeshSource::Other { file },
            MeshType::Auto => read_auto(&section.require_table("Auto")?)?,
        };
        if let Some(file) = source.file() {
            ctx.require_file(&section.qualify("floc"), file)?;
        }

        options.mesh = MeshOptions {
            ref_ser: section.get_usize("ref_ser")?.unwrap_or(d.ref_ser),
            ref_par: section.get_usize("ref_par")?.unwrap_or(d.ref_par),
            order,
            source,
        };
        tracing::debug!(
            mesh_type = %options.mesh.source.mesh_type(),
            order,
            "Mesh 验证通过"
        );
        Ok(())
    }
}

fn read_auto(auto: &TableRef<'_>) -> ConfigResult<MeshSource> {
    let length_key = auto.qualify("length");
    let length = auto
        .get_f64_array("length")?
        .ok_or_else(|| ConfigError::Missing(length_key.clone()))?;
    let length: [f64; 3] = exactly_three(&length_key, length)?;
    if let Some(i) = length.iter().position(|l| !(l.is_finite() && *l > 0.0)) {
        return Err(ConfigError::invalid_value(
            format!("{length_key}[{i}]"),
            length[i],
            "边长必须为大于 0 的有限值",
        ));
    }

    let ncuts_key = auto.qualify("ncuts");
    let raw = auto
        .get_i64_array("ncuts")?
        .ok_or_else(|| ConfigError::Missing(ncuts_key.clone()))?;
    let raw: [i64; 3] = exactly_three(&ncuts_key, raw)?;
    let mut ncuts = [0u64; 3];
    for (i, (dst, n)) in ncuts.iter_mut().zip(raw).enumerate() {
        *dst = u64::try_from(n).ok().filter(|n| *n >= 1).ok_or_else(|| {
            ConfigError::invalid_value(format!("{ncuts_key}[{i}]"), n, "单元数至少为 1")
        })?;
    }

    Ok(MeshSource::Auto { length, ncuts })
}

fn exactly_three<T>(key: &str, items: Vec<T>) -> ConfigResult<[T; 3]> {
    let actual = items.len();
    items.try_into().map_err(|_| ConfigError::LengthMismatch {
        key: key.to_string(),
        expected: 3,
        actual,
    })
}
