// crates/xp_config/src/compat.rs

//! 材料模型兼容矩阵
//!
//! (晶体对称性, 滑移/硬化律) → 材料参数个数；晶体对称性 → 状态变量个数。
//! 数值与晶体塑性本构库的模型定义一一对应，是固定常量而非配置项。
//! 状态变量个数不含取向四元数的 4 个分量。

use crate::choice::{SlipType, XtalType};

/// 状态变量中取向四元数的起始位置
pub const ORI_STATE_VAR_OFFSET: usize = 9;

/// 兼容矩阵的一行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamCount {
    /// 晶体对称性
    pub xtal: XtalType,
    /// 滑移/硬化律
    pub slip: SlipType,
    /// 所需材料参数个数
    pub num_props: usize,
}

/// 支持的 (对称性, 硬化律) 组合
///
/// 不在表中的组合（HCP + Voce 族）不受支持。
pub const PARAM_COUNTS: [ParamCount; 7] = [
    ParamCount { xtal: XtalType::Fcc, slip: SlipType::MtsDd, num_props: 24 },
    ParamCount { xtal: XtalType::Fcc, slip: SlipType::PowerVoce, num_props: 17 },
    ParamCount { xtal: XtalType::Fcc, slip: SlipType::PowerVoceNl, num_props: 18 },
    ParamCount { xtal: XtalType::Bcc, slip: SlipType::MtsDd, num_props: 26 },
    ParamCount { xtal: XtalType::Bcc, slip: SlipType::PowerVoce, num_props: 17 },
    ParamCount { xtal: XtalType::Bcc, slip: SlipType::PowerVoceNl, num_props: 18 },
    ParamCount { xtal: XtalType::Hcp, slip: SlipType::MtsDd, num_props: 42 },
];

/// 各对称性所需的状态变量个数
pub const STATE_VAR_COUNTS: [(XtalType, usize); 3] = [
    (XtalType::Fcc, 24),
    (XtalType::Bcc, 24),
    (XtalType::Hcp, 38),
];

/// 查找所需材料参数个数；组合不受支持时返回 `None`
pub fn required_props(xtal: XtalType, slip: SlipType) -> Option<usize> {
    PARAM_COUNTS
        .iter()
        .find(|row| row.xtal == xtal && row.slip == slip)
        .map(|row| row.num_props)
}

/// 查找所需状态变量个数
pub fn required_state_vars(xtal: XtalType) -> Option<usize> {
    STATE_VAR_COUNTS
        .iter()
        .find(|(x, _)| *x == xtal)
        .map(|(_, n)| *n)
}

/// 组合是否受支持
pub fn is_supported(xtal: XtalType, slip: SlipType) -> bool {
    required_props(xtal, slip).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::Choice;

    #[test]
    fn test_every_resolvable_pair_is_classified() {
        for x in XtalType::TABLE {
            assert!(required_state_vars(x.variant).is_some());
            for s in SlipType::TABLE {
                let supported = is_supported(x.variant, s.variant);
                let hcp_voce = x.variant == XtalType::Hcp && s.variant.is_voce();
                assert_eq!(supported, !hcp_voce);
            }
        }
    }

    #[test]
    fn test_rows_are_unique() {
        for (i, a) in PARAM_COUNTS.iter().enumerate() {
            for b in &PARAM_COUNTS[i + 1..] {
                assert!(!(a.xtal == b.xtal && a.slip == b.slip));
            }
        }
    }

    #[test]
    fn test_unset_variants() {
        assert_eq!(required_props(XtalType::None, SlipType::MtsDd), None);
        assert_eq!(required_props(XtalType::Fcc, SlipType::None), None);
        assert_eq!(required_state_vars(XtalType::None), None);
    }

    #[test]
    fn test_known_counts() {
        assert_eq!(required_props(XtalType::Fcc, SlipType::PowerVoce), Some(17));
        assert_eq!(required_props(XtalType::Hcp, SlipType::MtsDd), Some(42));
        assert_eq!(required_state_vars(XtalType::Hcp), Some(38));
    }
}
