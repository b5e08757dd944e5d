// crates/xp_config/src/sections/model.rs

//! `[Model]`：材料本构模型
//!
//! ExaCMech 模型需要与 `[Properties]` 交叉验证：
//!
//! 1. `cp` 必须为 true
//! 2. 取向必须以四元数给出
//! 3. `num_state_vars` 必须等于该晶体对称性要求的状态变量个数
//! 4. `num_props` 必须等于 (对称性, 硬化律) 组合要求的参数个数
//!
//! UMAT 模型不做进一步检查。

use crate::choice::{read_choice, Choice, MechType, OriType, SlipType, XtalType};
use crate::compat::{self, ORI_STATE_VAR_OFFSET};
use crate::context::ValidationContext;
use crate::error::{ConfigError, ConfigResult};
use crate::options::ExaOptions;

use super::Section;

const NUM_PROPS_KEY: &str = "Properties.Matl_Props.num_props";
const NUM_VARS_KEY: &str = "Properties.State_Vars.num_vars";
const ORI_TYPE_KEY: &str = "Properties.Grain.ori_type";

/// 材料模型验证器
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelSection;

impl Section for ModelSection {
    fn name(&self) -> &'static str {
        "Model"
    }

    fn validate(
        &self,
        ctx: &mut ValidationContext<'_>,
        options: &mut ExaOptions,
    ) -> ConfigResult<()> {
        let section = ctx.tree().require_table(self.name())?;

        let mech_type: MechType = read_choice(&section, "mech_type", None)?;
        let cp = section.get_bool("cp")?.unwrap_or(false);
        options.model.mech_type = mech_type;
        options.model.cp = cp;

        if mech_type == MechType::Umat {
            tracing::debug!(cp, "Model 验证通过 (UMAT)");
            return Ok(());
        }

        if !cp {
            return Err(ConfigError::incompatible(
                section.qualify("cp"),
                "ExaCMech 模型要求 cp = true",
            ));
        }

        let ori_type = options.properties.grain.ori_type;
        if ori_type != OriType::Quaternion {
            return Err(ConfigError::incompatible(
                ORI_TYPE_KEY,
                format!("ExaCMech 模型要求取向类型为 quaternion, 当前为 {ori_type}"),
            ));
        }
        options.properties.grain.ori_state_var_loc = Some(ORI_STATE_VAR_OFFSET);

        let ecmech = section.require_table("ExaCMech")?;
        let xtal: XtalType = read_choice(&ecmech, "xtal_type", None)?;
        check_state_vars(xtal, options.properties.num_state_vars)?;
        options.model.xtal_type = xtal;

        let slip: SlipType = read_choice(&ecmech, "slip_type", None)?;
        check_props(xtal, slip, options.properties.num_props, &ecmech.qualify("slip_type"))?;
        options.model.slip_type = slip;

        tracing::debug!(%xtal, %slip, "Model 验证通过 (ExaCMech)");
        Ok(())
    }
}

/// 检查状态变量个数（只与对称性有关）
pub fn check_state_vars(xtal: XtalType, num_state_vars: usize) -> ConfigResult<()> {
    let required = compat::required_state_vars(xtal).ok_or_else(|| {
        ConfigError::invalid_value("Model.ExaCMech.xtal_type", xtal, "未设置晶体对称性")
    })?;
    if num_state_vars != required {
        return Err(ConfigError::CountMismatch {
            key: NUM_VARS_KEY.to_string(),
            required,
            actual: num_state_vars,
            context: format!("{} 晶体, 不含取向四元数", xtal.canonical().to_uppercase()),
        });
    }
    Ok(())
}

/// 检查材料参数个数；HCP 与 Voce 族组合不受支持
pub fn check_props(
    xtal: XtalType,
    slip: SlipType,
    num_props: usize,
    slip_key: &str,
) -> ConfigResult<()> {
    let required = compat::required_props(xtal, slip).ok_or_else(|| {
        ConfigError::incompatible(
            slip_key,
            format!(
                "{} 晶体不支持 {} 硬化律",
                xtal.canonical().to_uppercase(),
                slip
            ),
        )
    })?;
    if num_props != required {
        return Err(ConfigError::CountMismatch {
            key: NUM_PROPS_KEY.to_string(),
            required,
            actual: num_props,
            context: format!("{} + {}", xtal.canonical().to_uppercase(), slip),
        });
    }
    Ok(())
}
