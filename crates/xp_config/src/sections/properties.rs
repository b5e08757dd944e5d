// crates/xp_config/src/sections/properties.rs

//! `[Properties]`：温度、材料参数表、状态变量表、晶粒/取向

use std::path::PathBuf;

use crate::choice::{read_choice, OriType};
use crate::context::ValidationContext;
use crate::error::{ConfigError, ConfigResult};
use crate::options::{ExaOptions, GrainOptions};
use crate::tree::TableRef;

use super::Section;

/// 材料属性验证器
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesSection;

impl Section for PropertiesSection {
    fn name(&self) -> &'static str {
        "Properties"
    }

    fn validate(
        &self,
        ctx: &mut ValidationContext<'_>,
        options: &mut ExaOptions,
    ) -> ConfigResult<()> {
        let section = ctx.tree().require_table(self.name())?;
        let props = &mut options.properties;

        // 温度以开尔文给出
        let temperature = section.get_f64("temperature")?.unwrap_or(props.temperature_k);
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(ConfigError::invalid_value(
                section.qualify("temperature"),
                temperature,
                "温度以开尔文为单位，必须为大于 0 的有限值",
            ));
        }
        props.temperature_k = temperature;

        let matl = section.require_table("Matl_Props")?;
        let (props_file, num_props) = read_table_ref(ctx, &matl, "props.txt", "num_props")?;
        props.props_file = props_file;
        props.num_props = num_props;

        let state = section.require_table("State_Vars")?;
        let (state_file, num_vars) = read_table_ref(ctx, &state, "state.txt", "num_vars")?;
        props.state_file = state_file;
        props.num_state_vars = num_vars;

        if let Some(grain) = section.table("Grain")? {
            props.grain = read_grain(&grain)?;
        }

        tracing::debug!(
            num_props = props.num_props,
            num_state_vars = props.num_state_vars,
            ori_type = %props.grain.ori_type,
            "Properties 验证通过"
        );
        Ok(())
    }
}

/// 读取 `floc` + 数量，并确认文件可访问
fn read_table_ref(
    ctx: &ValidationContext<'_>,
    table: &TableRef<'_>,
    default_file: &str,
    count_key: &str,
) -> ConfigResult<(PathBuf, usize)> {
    let file = table
        .get_path("floc")?
        .unwrap_or_else(|| PathBuf::from(default_file));
    ctx.require_file(&table.qualify("floc"), &file)?;
    let count = table.get_usize(count_key)?.unwrap_or(1);
    Ok((file, count))
}

fn read_grain(table: &TableRef<'_>) -> ConfigResult<GrainOptions> {
    let defaults = GrainOptions::default();
    Ok(GrainOptions {
        ori_state_var_loc: table.get_usize("ori_state_var_loc")?,
        ori_stride: table.get_usize("ori_stride")?.unwrap_or(defaults.ori_stride),
        ori_type: read_choice::<OriType>(table, "ori_type", Some("euler"))?,
        num_grains: table.get_usize("num_grains")?.unwrap_or(defaults.num_grains),
        ori_file: table.get_path("ori_floc")?.unwrap_or(defaults.ori_file),
        grain_map: table.get_path("grain_floc")?.unwrap_or(defaults.grain_map),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Capabilities;
    use crate::sections::test_support::{run, run_with};
    use std::path::Path;

    const BASE: &str = r#"
        [Properties]
        temperature = 300.0
        [Properties.Matl_Props]
        floc = "props_cp.txt"
        num_props = 17
        [Properties.State_Vars]
        floc = "state_cp.txt"
        num_vars = 24
    "#;

    #[test]
    fn test_reads_tables() {
        let mut options = ExaOptions::default();
        run(&PropertiesSection, BASE, &mut options).unwrap();
        let p = &options.properties;
        assert_eq!(p.temperature_k, 300.0);
        assert_eq!(p.num_props, 17);
        assert_eq!(p.num_state_vars, 24);
        assert_eq!(p.props_file, PathBuf::from("props_cp.txt"));
        assert_eq!(p.grain.ori_type, OriType::None);
    }

    #[test]
    fn test_non_positive_temperature() {
        for t in ["0.0", "-5.0", "nan", "inf"] {
            let doc = BASE.replace("temperature = 300.0", &format!("temperature = {t}"));
            let err = run(&PropertiesSection, &doc, &mut ExaOptions::default()).unwrap_err();
            assert_eq!(err.key(), Some("Properties.temperature"));
        }
    }

    #[test]
    fn test_default_temperature() {
        let doc = BASE.replace("temperature = 300.0", "");
        let mut options = ExaOptions::default();
        run(&PropertiesSection, &doc, &mut options).unwrap();
        assert_eq!(options.properties.temperature_k, 298.0);
    }

    #[test]
    fn test_missing_tables() {
        let doc = "[Properties]\n[Properties.Matl_Props]\n";
        let err = run(&PropertiesSection, doc, &mut ExaOptions::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ref k) if k == "Properties.State_Vars"));

        let err = run(&PropertiesSection, "", &mut ExaOptions::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ref k) if k == "Properties"));
    }

    #[test]
    fn test_unreachable_state_file() {
        let err = run_with(
            &PropertiesSection,
            BASE,
            &mut ExaOptions::default(),
            Capabilities::none(),
            |p: &Path| p != Path::new("state_cp.txt"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::FileNotFound { ref key, .. } if key == "Properties.State_Vars.floc"
        ));
    }

    #[test]
    fn test_grain_block() {
        let doc = format!(
            "{BASE}\n[Properties.Grain]\nori_type = \"Quat\"\nnum_grains = 500\nori_stride = 4\nori_floc = \"ori.txt\"\n"
        );
        let mut options = ExaOptions::default();
        run(&PropertiesSection, &doc, &mut options).unwrap();
        let g = &options.properties.grain;
        assert_eq!(g.ori_type, OriType::Quaternion);
        assert_eq!(g.num_grains, 500);
        assert_eq!(g.ori_stride, 4);
        assert_eq!(g.ori_state_var_loc, None);
        assert_eq!(g.grain_map, PathBuf::from("grain_map.txt"));
    }

    #[test]
    fn test_grain_default_ori_type_is_euler() {
        let doc = format!("{BASE}\n[Properties.Grain]\nnum_grains = 2\n");
        let mut options = ExaOptions::default();
        run(&PropertiesSection, &doc, &mut options).unwrap();
        assert_eq!(options.properties.grain.ori_type, OriType::Euler);
    }

    #[test]
    fn test_bad_ori_type() {
        let doc = format!("{BASE}\n[Properties.Grain]\nori_type = \"rodrigues\"\n");
        let err = run(&PropertiesSection, &doc, &mut ExaOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidChoice { ref key, .. } if key == "Properties.Grain.ori_type"
        ));
    }
}
