// crates/xp_config/src/choice.rs

//! 枚举选项
//!
//! 所有封闭集合的选项（材料库、晶体对称性、滑移/硬化律、取向表示、网格来源、
//! 组装方式、运行时目标、非线性/线性求解器、积分格式）都通过同一张
//! "规范名 + 同义词 + 变体" 表来解析，匹配时忽略大小写。
//!
//! 无法匹配的字符串一律报错，不会回退到任何默认变体。各枚举的 `None`
//! 变体只表示"未设置"，不出现在解析表中。
//!
//! # 示例
//!
//! ```rust
//! use xp_config::choice::{Choice, XtalType};
//!
//! assert_eq!(XtalType::resolve("Fcc"), Some(XtalType::Fcc));
//! assert_eq!("BCC".parse::<XtalType>().unwrap(), XtalType::Bcc);
//! assert!(XtalType::resolve("fcx").is_none());
//! ```

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};
use crate::tree::TableRef;

/// 解析表中的一项
#[derive(Debug, Clone, Copy)]
pub struct ChoiceEntry<T: 'static> {
    /// 规范名称
    pub canonical: &'static str,
    /// 额外接受的同义词（规范名本身总是被接受）
    pub synonyms: &'static [&'static str],
    /// 对应变体
    pub variant: T,
}

/// 由解析表驱动的封闭选项
pub trait Choice: Copy + PartialEq + Sized + 'static {
    /// 选项类别名，用于错误信息
    const KIND: &'static str;

    /// 有序解析表
    const TABLE: &'static [ChoiceEntry<Self>];

    /// 忽略大小写解析
    fn resolve(input: &str) -> Option<Self> {
        let folded = input.to_ascii_lowercase();
        Self::TABLE
            .iter()
            .find(|entry| {
                entry.canonical == folded || entry.synonyms.iter().any(|s| *s == folded)
            })
            .map(|entry| entry.variant)
    }

    /// 规范名称；不在表中的变体（如 `None`）返回 `"none"`
    fn canonical(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|entry| entry.variant == self)
            .map(|entry| entry.canonical)
            .unwrap_or("none")
    }

    /// 可接受的规范名称列表
    fn expected() -> String {
        Self::TABLE
            .iter()
            .map(|entry| entry.canonical)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// 解析，失败时给出带键名的配置错误
    fn parse_for(key: &str, input: &str) -> ConfigResult<Self> {
        Self::resolve(input).ok_or_else(|| ConfigError::InvalidChoice {
            key: key.to_string(),
            value: input.to_string(),
            expected: Self::expected(),
        })
    }
}

/// 从表中读取选项；键缺失时使用 `default` 文本（`None` 表示必填）
pub fn read_choice<T: Choice>(
    table: &TableRef<'_>,
    key: &str,
    default: Option<&str>,
) -> ConfigResult<T> {
    let qualified = table.qualify(key);
    let raw = match table.get_str(key)? {
        Some(raw) => raw,
        None => default.ok_or_else(|| ConfigError::Missing(qualified.clone()))?,
    };
    T::parse_for(&qualified, raw)
}

/// 选项文本解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceParseError {
    kind: &'static str,
    value: String,
    expected: String,
}

impl fmt::Display for ChoiceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "无效的{}: '{}', 期望 {}",
            self.kind, self.value, self.expected
        )
    }
}

impl std::error::Error for ChoiceParseError {}

macro_rules! impl_choice_traits {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = ChoiceParseError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as Choice>::resolve(s).ok_or_else(|| ChoiceParseError {
                        kind: <$ty as Choice>::KIND,
                        value: s.to_string(),
                        expected: <$ty as Choice>::expected(),
                    })
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.canonical())
                }
            }
        )*
    };
}

const fn entry<T>(
    canonical: &'static str,
    synonyms: &'static [&'static str],
    variant: T,
) -> ChoiceEntry<T> {
    ChoiceEntry {
        canonical,
        synonyms,
        variant,
    }
}

/// 材料本构库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MechType {
    /// 用户材料子程序
    #[default]
    Umat,
    /// ExaCMech 晶体塑性库
    ExaCMech,
}

impl Choice for MechType {
    const KIND: &'static str = "材料库";
    const TABLE: &'static [ChoiceEntry<Self>] = &[
        entry("umat", &[], Self::Umat),
        entry("exacmech", &["ecmech"], Self::ExaCMech),
    ];
}

/// 晶体对称性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum XtalType {
    /// 面心立方
    Fcc,
    /// 体心立方
    Bcc,
    /// 密排六方
    Hcp,
    /// 未设置
    #[default]
    None,
}

impl Choice for XtalType {
    const KIND: &'static str = "晶体对称性";
    const TABLE: &'static [ChoiceEntry<Self>] = &[
        entry("fcc", &[], Self::Fcc),
        entry("bcc", &[], Self::Bcc),
        entry("hcp", &[], Self::Hcp),
    ];
}

/// 滑移动力学 / 硬化律
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlipType {
    /// MTS 型滑移动力学 + 位错密度硬化
    MtsDd,
    /// 幂律滑移 + 线性 Voce 硬化
    PowerVoce,
    /// 幂律滑移 + 非线性 Voce 硬化
    PowerVoceNl,
    /// 未设置
    #[default]
    None,
}

impl SlipType {
    /// 是否属于 Voce 硬化族
    pub fn is_voce(&self) -> bool {
        matches!(self, Self::PowerVoce | Self::PowerVoceNl)
    }
}

impl Choice for SlipType {
    const KIND: &'static str = "滑移/硬化律";
    const TABLE: &'static [ChoiceEntry<Self>] = &[
        entry("mtsdd", &["mts"], Self::MtsDd),
        entry("powervoce", &[], Self::PowerVoce),
        entry("powervocenl", &[], Self::PowerVoceNl),
    ];
}

/// 晶粒取向表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OriType {
    /// 欧拉角
    Euler,
    /// 四元数
    Quaternion,
    /// 自定义
    Custom,
    /// 未设置
    #[default]
    None,
}

impl Choice for OriType {
    const KIND: &'static str = "取向类型";
    const TABLE: &'static [ChoiceEntry<Self>] = &[
        entry("euler", &[], Self::Euler),
        entry("quaternion", &["quat"], Self::Quaternion),
        entry("custom", &[], Self::Custom),
    ];
}

/// 网格来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshType {
    /// Cubit 网格文件
    Cubit,
    /// 程序化生成的长方体网格
    Auto,
    /// 其他格式网格文件
    #[default]
    Other,
}

impl Choice for MeshType {
    const KIND: &'static str = "网格类型";
    const TABLE: &'static [ChoiceEntry<Self>] = &[
        entry("cubit", &[], Self::Cubit),
        entry("auto", &["procedural"], Self::Auto),
        entry("other", &["file"], Self::Other),
    ];
}

/// 矩阵组装方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Assembly {
    /// 全组装
    #[default]
    Full,
    /// 部分组装
    Partial,
    /// 单元组装
    Element,
}

impl Choice for Assembly {
    const KIND: &'static str = "组装方式";
    const TABLE: &'static [ChoiceEntry<Self>] = &[
        entry("full", &[], Self::Full),
        entry("pa", &["partial"], Self::Partial),
        entry("ea", &["element"], Self::Element),
    ];
}

/// 运行时执行目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RtModel {
    /// 串行 CPU
    #[default]
    Cpu,
    /// CUDA GPU
    Cuda,
    /// OpenMP 共享内存并行
    OpenMp,
}

impl Choice for RtModel {
    const KIND: &'static str = "运行时模型";
    const TABLE: &'static [ChoiceEntry<Self>] = &[
        entry("cpu", &[], Self::Cpu),
        entry("cuda", &["gpu"], Self::Cuda),
        entry("openmp", &["omp"], Self::OpenMp),
    ];
}

/// 非线性求解器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NlSolver {
    /// Newton-Raphson
    #[default]
    Nr,
    /// 带线搜索的 Newton-Raphson
    NrLs,
}

impl Choice for NlSolver {
    const KIND: &'static str = "非线性求解器";
    const TABLE: &'static [ChoiceEntry<Self>] = &[
        entry("nr", &["newton"], Self::Nr),
        entry("nrls", &[], Self::NrLs),
    ];
}

/// Krylov 线性求解器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KrylovSolver {
    /// GMRES
    #[default]
    Gmres,
    /// 预条件共轭梯度
    Pcg,
    /// MINRES
    Minres,
}

impl Choice for KrylovSolver {
    const KIND: &'static str = "线性求解器";
    const TABLE: &'static [ChoiceEntry<Self>] = &[
        entry("gmres", &[], Self::Gmres),
        entry("pcg", &[], Self::Pcg),
        entry("minres", &[], Self::Minres),
    ];
}

/// 积分格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationType {
    /// 完全积分
    #[default]
    Full,
    /// B-bar 缩减积分
    BBar,
}

impl Choice for IntegrationType {
    const KIND: &'static str = "积分格式";
    const TABLE: &'static [ChoiceEntry<Self>] = &[
        entry("full", &[], Self::Full),
        entry("bbar", &["reduced"], Self::BBar),
    ];
}

impl_choice_traits!(
    MechType,
    XtalType,
    SlipType,
    OriType,
    MeshType,
    Assembly,
    RtModel,
    NlSolver,
    KrylovSolver,
    IntegrationType,
);
