// crates/xp_config/src/probe.rs

//! 外部协作接口
//!
//! 验证过程只依赖两个外部查询：引用文件是否可访问，以及当前构建是否
//! 启用了某个可选后端。两者都以 trait 表示，便于在测试中替换。

use std::fmt;
use std::path::Path;

/// 文件可访问性探测
pub trait FileProbe {
    /// 文件是否存在且可读
    fn is_reachable(&self, path: &Path) -> bool;
}

/// 基于文件系统的探测（能否以只读方式打开）
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn is_reachable(&self, path: &Path) -> bool {
        std::fs::File::open(path).is_ok()
    }
}

impl<F> FileProbe for F
where
    F: Fn(&Path) -> bool,
{
    fn is_reachable(&self, path: &Path) -> bool {
        self(path)
    }
}

/// 可选构建能力
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Conduit 输出后端
    Conduit,
    /// ADIOS2 输出后端
    Adios2,
    /// OpenMP 共享内存并行
    OpenMp,
    /// CUDA GPU 执行
    Cuda,
}

impl Capability {
    /// 全部能力（固定顺序）
    pub const ALL: [Capability; 4] = [Self::Conduit, Self::Adios2, Self::OpenMp, Self::Cuda];

    /// 能力名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Conduit => "conduit",
            Self::Adios2 => "adios2",
            Self::OpenMp => "openmp",
            Self::Cuda => "cuda",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 构建能力查询
pub trait BuildCapabilities {
    /// 是否启用了某项能力
    fn supports(&self, capability: Capability) -> bool;
}

/// 一组固定的构建能力
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Conduit 输出
    pub conduit: bool,
    /// ADIOS2 输出
    pub adios2: bool,
    /// OpenMP
    pub openmp: bool,
    /// CUDA
    pub cuda: bool,
}

impl Capabilities {
    /// 由 Cargo feature 决定的能力
    pub fn compiled() -> Self {
        Self {
            conduit: cfg!(feature = "conduit"),
            adios2: cfg!(feature = "adios2"),
            openmp: cfg!(feature = "openmp"),
            cuda: cfg!(feature = "cuda"),
        }
    }

    /// 全部启用
    pub fn all() -> Self {
        Self {
            conduit: true,
            adios2: true,
            openmp: true,
            cuda: true,
        }
    }

    /// 全部关闭（仅 CPU）
    pub fn none() -> Self {
        Self::default()
    }
}

impl BuildCapabilities for Capabilities {
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Conduit => self.conduit,
            Capability::Adios2 => self.adios2,
            Capability::OpenMp => self.openmp,
            Capability::Cuda => self.cuda,
        }
    }
}
