// crates/xp_config/src/context.rs

//! 验证上下文
//!
//! 显式持有配置树与外部协作接口，按引用传给每个 section；
//! 同时收集非致命的提示信息。

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::probe::{BuildCapabilities, Capability, FileProbe};
use crate::tree::ConfigTree;

/// 非致命提示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    /// 相关配置键
    pub key: String,
    /// 提示内容
    pub message: String,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// 一次验证过程的上下文
pub struct ValidationContext<'a> {
    tree: &'a ConfigTree,
    files: &'a dyn FileProbe,
    build: &'a dyn BuildCapabilities,
    advisories: Vec<Advisory>,
}

impl<'a> ValidationContext<'a> {
    /// 创建上下文
    pub fn new(
        tree: &'a ConfigTree,
        files: &'a dyn FileProbe,
        build: &'a dyn BuildCapabilities,
    ) -> Self {
        Self {
            tree,
            files,
            build,
            advisories: Vec::new(),
        }
    }

    /// 配置树
    pub fn tree(&self) -> &'a ConfigTree {
        self.tree
    }

    /// 构建能力
    pub fn supports(&self, capability: Capability) -> bool {
        self.build.supports(capability)
    }

    /// 要求文件可访问
    pub fn require_file(&self, key: &str, path: &Path) -> ConfigResult<()> {
        if self.files.is_reachable(path) {
            Ok(())
        } else {
            Err(ConfigError::FileNotFound {
                key: key.to_string(),
                path: path.to_path_buf(),
            })
        }
    }

    /// 要求构建能力；缺失时把该取值视为不可用
    pub fn require_capability(
        &self,
        key: &str,
        value: &str,
        capability: Capability,
    ) -> ConfigResult<()> {
        if self.supports(capability) {
            Ok(())
        } else {
            Err(ConfigError::Unsupported {
                key: key.to_string(),
                value: value.to_string(),
                capability: capability.name(),
            })
        }
    }

    /// 记录一条提示
    pub fn advise(&mut self, key: impl Into<String>, message: impl Into<String>) {
        let advisory = Advisory {
            key: key.into(),
            message: message.into(),
        };
        tracing::info!("{}", advisory);
        self.advisories.push(advisory);
    }

    /// 已记录的提示
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// 取出全部提示
    pub fn into_advisories(self) -> Vec<Advisory> {
        self.advisories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Capabilities;

    #[test]
    fn test_require_file_and_capability() {
        let tree = ConfigTree::default();
        let files = |p: &Path| p.ends_with("props.txt");
        let caps = Capabilities {
            openmp: true,
            ..Capabilities::none()
        };
        let ctx = ValidationContext::new(&tree, &files, &caps);

        assert!(ctx.require_file("k", Path::new("props.txt")).is_ok());
        assert!(matches!(
            ctx.require_file("k", Path::new("state.txt")),
            Err(ConfigError::FileNotFound { .. })
        ));
        assert!(ctx.require_capability("k", "omp", Capability::OpenMp).is_ok());
        let err = ctx.require_capability("k", "gpu", Capability::Cuda).unwrap_err();
        assert!(err.to_string().contains("cuda"));
    }

    #[test]
    fn test_advisories_in_order() {
        let tree = ConfigTree::default();
        let files = |_: &Path| true;
        let caps = Capabilities::none();
        let mut ctx = ValidationContext::new(&tree, &files, &caps);
        ctx.advise("Time", "a");
        ctx.advise("Solvers.integ_model", "b");
        assert_eq!(ctx.advisories().len(), 2);

        let advisories = ctx.into_advisories();
        assert_eq!(advisories[1].to_string(), "Solvers.integ_model: b");
    }
}
