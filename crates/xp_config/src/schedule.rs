// crates/xp_config/src/schedule.rs

//! 本质边界条件时间表
//!
//! 按仿真步号索引的约束集合。步 0 永远为空，步 1 必须存在；变化模式下
//! 每个声明的更新步对应三组嵌套数组中同一位置的内层数组。

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{ConfigError, ConfigResult};

/// 某一步开始生效的约束
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BcStep {
    /// 受约束的节点组 ID
    pub ids: Vec<i64>,
    /// 受约束的位移分量
    pub comps: Vec<i64>,
    /// 给定值
    pub values: Vec<f64>,
}

impl BcStep {
    /// 是否没有任何约束
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.comps.is_empty() && self.values.is_empty()
    }
}

/// 边界条件时间表
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BcSchedule {
    /// 约束是否随时间变化
    pub changing: bool,
    /// 声明顺序下的更新步
    pub update_steps: Vec<u64>,
    /// 步号 → 约束
    pub steps: BTreeMap<u64, BcStep>,
}

impl Default for BcSchedule {
    fn default() -> Self {
        let mut steps = BTreeMap::new();
        steps.insert(0, BcStep::default());
        Self {
            changing: false,
            update_steps: Vec::new(),
            steps,
        }
    }
}

impl BcSchedule {
    /// 静态模式：单组约束挂在步 1
    pub fn fixed(step: BcStep) -> Self {
        let mut schedule = Self::default();
        schedule.update_steps.push(1);
        schedule.steps.insert(1, step);
        schedule
    }

    /// 取某一步的约束
    pub fn at(&self, step: u64) -> Option<&BcStep> {
        self.steps.get(&step)
    }

    /// 按声明顺序遍历更新步
    pub fn iter_updates(&self) -> impl Iterator<Item = (u64, &BcStep)> + '_ {
        self.update_steps
            .iter()
            .filter_map(move |s| self.steps.get(s).map(|step| (*s, step)))
    }
}

/// 三组嵌套数组的来源键名
#[derive(Debug, Clone, Copy)]
pub struct Zip3Keys<'k> {
    /// 节点组 ID 键
    pub ids: &'k str,
    /// 分量键
    pub comps: &'k str,
    /// 给定值键
    pub values: &'k str,
}

/// 把更新步与三组嵌套数组按位置配对，构建时间表
///
/// 检查顺序与来源顺序一致：先 ID，再分量，最后给定值；每个来源独立检查
/// 内层数组非空以及数组个数等于更新步个数。
pub fn zip3(
    update_steps: &[u64],
    ids: Vec<Vec<i64>>,
    comps: Vec<Vec<i64>>,
    values: Vec<Vec<f64>>,
    keys: Zip3Keys<'_>,
) -> ConfigResult<BcSchedule> {
    let ids = align(update_steps, ids, keys.ids)?;
    let comps = align(update_steps, comps, keys.comps)?;
    let values = align(update_steps, values, keys.values)?;

    let mut schedule = BcSchedule {
        changing: true,
        update_steps: update_steps.to_vec(),
        ..BcSchedule::default()
    };
    for ((&step, ids), (comps, values)) in update_steps
        .iter()
        .zip(ids)
        .zip(comps.into_iter().zip(values))
    {
        schedule.steps.insert(step, BcStep { ids, comps, values });
    }
    Ok(schedule)
}

fn align<T>(update_steps: &[u64], nested: Vec<Vec<T>>, key: &str) -> ConfigResult<Vec<Vec<T>>> {
    if let Some(i) = nested.iter().position(Vec::is_empty) {
        return Err(ConfigError::EmptyArray(format!("{key}[{i}]")));
    }
    if nested.len() != update_steps.len() {
        return Err(ConfigError::LengthMismatch {
            key: key.to_string(),
            expected: update_steps.len(),
            actual: nested.len(),
        });
    }
    Ok(nested)
}
