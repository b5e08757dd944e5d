// crates/xp_config/src/parser.rs

//! 选项解析入口
//!
//! 按固定顺序运行全部 section 验证器。任一 section 出错立即终止，
//! 调用方拿不到部分填充的选项。

use serde::Serialize;
use std::path::Path;

use crate::context::{Advisory, ValidationContext};
use crate::error::ConfigResult;
use crate::options::ExaOptions;
use crate::probe::{BuildCapabilities, Capabilities, FileProbe, FsProbe};
use crate::sections::SECTIONS;
use crate::tree::ConfigTree;

/// 验证结果：选项 + 非致命提示
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedOptions {
    /// 验证通过的选项
    pub options: ExaOptions,
    /// 验证期间记录的提示
    pub advisories: Vec<Advisory>,
}

impl ParsedOptions {
    /// 是否没有任何提示
    pub fn is_clean(&self) -> bool {
        self.advisories.is_empty()
    }
}

/// 选项解析器
///
/// # 示例
///
/// ```rust
/// use xp_config::{Capabilities, ConfigTree, OptionParser};
/// use std::path::Path;
///
/// let tree = ConfigTree::from_toml_str(r#"
///     [Properties.Matl_Props]
///     num_props = 1
///     [Properties.State_Vars]
///     num_vars = 1
///     [BCs]
///     essential_ids = [1]
///     essential_comps = [0]
///     essential_vals = [0.0]
///     [Model]
///     mech_type = "umat"
/// "#).unwrap();
///
/// let files = |_: &Path| true;
/// let caps = Capabilities::none();
/// let parsed = OptionParser::new(&files, &caps).parse(&tree).unwrap();
/// assert_eq!(parsed.options.bcs.update_steps, vec![1]);
/// ```
pub struct OptionParser<'a> {
    files: &'a dyn FileProbe,
    build: &'a dyn BuildCapabilities,
}

impl<'a> OptionParser<'a> {
    /// 指定文件探测与构建能力
    pub fn new(files: &'a dyn FileProbe, build: &'a dyn BuildCapabilities) -> Self {
        Self { files, build }
    }

    /// 验证一棵配置树
    pub fn parse(&self, tree: &ConfigTree) -> ConfigResult<ParsedOptions> {
        let mut ctx = ValidationContext::new(tree, self.files, self.build);
        let mut options = ExaOptions::default();

        for section in SECTIONS {
            let _span = tracing::debug_span!("section", name = section.name()).entered();
            section.validate(&mut ctx, &mut options)?;
        }

        let advisories = ctx.into_advisories();
        tracing::info!(advisories = advisories.len(), "配置验证完成");
        Ok(ParsedOptions {
            options,
            advisories,
        })
    }
}

/// 使用真实文件系统与编译期能力验证一棵配置树
pub fn parse_options(tree: &ConfigTree) -> ConfigResult<ParsedOptions> {
    let caps = Capabilities::compiled();
    OptionParser::new(&FsProbe, &caps).parse(tree)
}

/// 加载并验证配置文件
///
/// 引用文件的相对路径按当前工作目录解析。
pub fn parse_file<P: AsRef<Path>>(path: P) -> ConfigResult<ParsedOptions> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "加载配置文件");
    let tree = ConfigTree::from_file(path)?;
    parse_options(&tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::MechType;
    use crate::error::ConfigError;

    const MINIMAL: &str = r#"
        [Properties.Matl_Props]
        num_props = 1
        [Properties.State_Vars]
        num_vars = 1
        [BCs]
        essential_ids = [1]
        essential_comps = [0]
        essential_vals = [0.0]
        [Model]
        mech_type = "umat"
    "#;

    fn parse(doc: &str) -> ConfigResult<ParsedOptions> {
        let tree = ConfigTree::from_toml_str(doc)?;
        let files = |_: &Path| true;
        OptionParser::new(&files, &Capabilities::none()).parse(&tree)
    }

    #[test]
    fn test_minimal_document() {
        let parsed = parse(MINIMAL).unwrap();
        assert!(parsed.is_clean());
        assert_eq!(parsed.options.model.mech_type, MechType::Umat);
        assert_eq!(parsed.options.properties.temperature_k, 298.0);
    }

    #[test]
    fn test_first_error_aborts() {
        // Properties 缺失时不会继续检查 BCs
        let err = parse("[BCs]\nessential_ids = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ref k) if k == "Properties"));
    }

    #[test]
    fn test_advisories_collected() {
        let doc = format!("{MINIMAL}\n[Time.Fixed]\ndt = 0.1\n[Time.Custom]\nnsteps = 2\n");
        let parsed = parse(&doc).unwrap();
        assert!(!parsed.is_clean());
        assert_eq!(parsed.advisories[0].key, "Time");
    }
}
