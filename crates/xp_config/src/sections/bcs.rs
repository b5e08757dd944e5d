// crates/xp_config/src/sections/bcs.rs

//! `[BCs]`：本质边界条件时间表
//!
//! - 静态模式：三个一维数组，挂在步 1
//! - 变化模式：更新步列表 + 三个嵌套数组，按位置配对

use crate::context::ValidationContext;
use crate::error::{ConfigError, ConfigResult};
use crate::options::ExaOptions;
use crate::schedule::{zip3, BcSchedule, BcStep, Zip3Keys};
use crate::tree::TableRef;

use super::Section;

/// 边界条件验证器
#[derive(Debug, Clone, Copy, Default)]
pub struct BcsSection;

impl Section for BcsSection {
    fn name(&self) -> &'static str {
        "BCs"
    }

    fn validate(
        &self,
        ctx: &mut ValidationContext<'_>,
        options: &mut ExaOptions,
    ) -> ConfigResult<()> {
        let section = ctx.tree().require_table(self.name())?;
        let changing = section.get_bool("changing_ess_bcs")?.unwrap_or(false);

        options.bcs = if changing {
            read_changing(&section)?
        } else {
            read_static(&section)?
        };

        tracing::debug!(
            changing,
            update_steps = ?options.bcs.update_steps,
            "BCs 验证通过"
        );
        Ok(())
    }
}

fn read_static(section: &TableRef<'_>) -> ConfigResult<BcSchedule> {
    let ids = required_non_empty(section, "essential_ids", TableRef::get_i64_array)?;
    let comps = required_non_empty(section, "essential_comps", TableRef::get_i64_array)?;
    let values = required_non_empty(section, "essential_vals", TableRef::get_f64_array)?;
    Ok(BcSchedule::fixed(BcStep { ids, comps, values }))
}

fn read_changing(section: &TableRef<'_>) -> ConfigResult<BcSchedule> {
    let steps_key = section.qualify("update_steps");
    let raw_steps = required_non_empty(section, "update_steps", TableRef::get_i64_array)?;

    let mut update_steps = Vec::with_capacity(raw_steps.len());
    for (i, step) in raw_steps.into_iter().enumerate() {
        let step = u64::try_from(step)
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| {
                ConfigError::invalid_value(format!("{steps_key}[{i}]"), step, "更新步必须为正整数")
            })?;
        if update_steps.contains(&step) {
            return Err(ConfigError::invalid_value(
                format!("{steps_key}[{i}]"),
                step,
                "更新步重复",
            ));
        }
        update_steps.push(step);
    }
    if !update_steps.contains(&1) {
        return Err(ConfigError::invalid_value(
            steps_key,
            format!("{update_steps:?}"),
            "必须包含步 1",
        ));
    }

    let ids = required(section, "essential_ids", TableRef::get_nested_i64_array)?;
    let comps = required(section, "essential_comps", TableRef::get_nested_i64_array)?;
    let values = required(section, "essential_vals", TableRef::get_nested_f64_array)?;

    let ids_key = section.qualify("essential_ids");
    let comps_key = section.qualify("essential_comps");
    let values_key = section.qualify("essential_vals");
    zip3(
        &update_steps,
        ids,
        comps,
        values,
        Zip3Keys {
            ids: &ids_key,
            comps: &comps_key,
            values: &values_key,
        },
    )
}

fn required<'t, T>(
    section: &TableRef<'t>,
    key: &str,
    read: fn(&TableRef<'t>, &str) -> ConfigResult<Option<T>>,
) -> ConfigResult<T> {
    read(section, key)?.ok_or_else(|| ConfigError::Missing(section.qualify(key)))
}

fn required_non_empty<'t, T>(
    section: &TableRef<'t>,
    key: &str,
    read: fn(&TableRef<'t>, &str) -> ConfigResult<Option<Vec<T>>>,
) -> ConfigResult<Vec<T>> {
    let items = required(section, key, read)?;
    if items.is_empty() {
        return Err(ConfigError::EmptyArray(section.qualify(key)));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::run;

    fn schedule(doc: &str) -> ConfigResult<BcSchedule> {
        let mut options = ExaOptions::default();
        run(&BcsSection, doc, &mut options)?;
        Ok(options.bcs)
    }

    #[test]
    fn test_static() {
        let s = schedule(
            "[BCs]\nessential_ids = [1, 2]\nessential_comps = [0, 1]\nessential_vals = [0.0, 1.0]\n",
        )
        .unwrap();
        assert!(!s.changing);
        assert_eq!(s.update_steps, vec![1]);
        assert!(s.at(0).unwrap().is_empty());
        assert_eq!(
            s.at(1).unwrap(),
            &BcStep {
                ids: vec![1, 2],
                comps: vec![0, 1],
                values: vec![0.0, 1.0],
            }
        );
        assert_eq!(s.steps.len(), 2);
    }

    #[test]
    fn test_static_empty_array() {
        for (key, doc) in [
            ("BCs.essential_ids", "essential_ids = []\nessential_comps = [0]\nessential_vals = [0.0]"),
            ("BCs.essential_comps", "essential_ids = [1]\nessential_comps = []\nessential_vals = [0.0]"),
            ("BCs.essential_vals", "essential_ids = [1]\nessential_comps = [0]\nessential_vals = []"),
        ] {
            let err = schedule(&format!("[BCs]\n{doc}\n")).unwrap_err();
            assert!(matches!(err, ConfigError::EmptyArray(ref k) if k == key), "{err}");
        }
    }

    #[test]
    fn test_static_missing_array() {
        let err = schedule("[BCs]\nessential_ids = [1]\nessential_vals = [0.0]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ref k) if k == "BCs.essential_comps"));
    }

    const CHANGING: &str = r#"
        [BCs]
        changing_ess_bcs = true
        update_steps = [1, 5, 10]
        essential_ids = [[1, 2], [1, 2, 3], [4]]
        essential_comps = [[0, 1], [0, 1, 2], [3]]
        essential_vals = [[0.0, 1.0], [0.0, 0.5, 1.0], [2.0]]
    "#;

    #[test]
    fn test_changing() {
        let s = schedule(CHANGING).unwrap();
        assert!(s.changing);
        assert_eq!(s.steps.keys().copied().collect::<Vec<_>>(), vec![0, 1, 5, 10]);
        assert!(s.at(0).unwrap().is_empty());
        assert_eq!(s.at(5).unwrap().ids, vec![1, 2, 3]);
        assert_eq!(s.at(10).unwrap().comps, vec![3]);
        assert_eq!(s.at(10).unwrap().values, vec![2.0]);
    }

    #[test]
    fn test_changing_requires_step_one() {
        let doc = CHANGING.replace("[1, 5, 10]", "[2, 5, 10]");
        let err = schedule(&doc).unwrap_err();
        assert_eq!(err.key(), Some("BCs.update_steps"));
    }

    #[test]
    fn test_changing_empty_steps() {
        let doc = CHANGING.replace("[1, 5, 10]", "[]");
        assert!(matches!(schedule(&doc), Err(ConfigError::EmptyArray(_))));
    }

    #[test]
    fn test_changing_count_mismatch() {
        let doc = CHANGING.replace("[[0, 1], [0, 1, 2], [3]]", "[[0, 1], [0, 1, 2]]");
        let err = schedule(&doc).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::LengthMismatch { ref key, expected: 3, actual: 2 } if key == "BCs.essential_comps"
        ));
    }

    #[test]
    fn test_changing_empty_inner() {
        let doc = CHANGING.replace("[[0.0, 1.0], [0.0, 0.5, 1.0], [2.0]]", "[[0.0, 1.0], [], [2.0]]");
        let err = schedule(&doc).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyArray(ref k) if k == "BCs.essential_vals[1]"));
    }

    #[test]
    fn test_changing_rejects_step_zero_and_duplicates() {
        let doc = CHANGING.replace("[1, 5, 10]", "[1, 0, 10]");
        assert!(matches!(schedule(&doc), Err(ConfigError::InvalidValue { .. })));

        let doc = CHANGING.replace("[1, 5, 10]", "[1, 5, 5]");
        let err = schedule(&doc).unwrap_err();
        assert_eq!(err.key(), Some("BCs.update_steps[2]"));
    }

    #[test]
    fn test_missing_section() {
        assert!(matches!(schedule(""), Err(ConfigError::Missing(ref k)) if k == "BCs"));
    }
}
