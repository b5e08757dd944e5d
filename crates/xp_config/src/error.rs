// crates/xp_config/src/error.rs

//! 配置层错误类型
//!
//! 所有变体都属于同一类错误：配置错误。任何一个变体出现都意味着
//! 本次验证立即终止，不会有部分结果交给下游求解器。

use std::path::PathBuf;

/// 配置层结果类型
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 缺失配置
    #[error("缺失配置: {0}")]
    Missing(String),

    /// 类型不符
    #[error("类型错误 '{key}': 期望 {expected}, 实际 {found}")]
    InvalidType {
        /// 配置键
        key: String,
        /// 期望类型
        expected: &'static str,
        /// 实际类型
        found: &'static str,
    },

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 枚举选项无法识别
    #[error("无效选项 '{key}': '{value}', 可选值: {expected}")]
    InvalidChoice {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 可接受的规范名称
        expected: String,
    },

    /// 数组为空
    #[error("数组为空: {0}")]
    EmptyArray(String),

    /// 数组长度不符
    #[error("长度不符 '{key}': 期望 {expected}, 实际 {actual}")]
    LengthMismatch {
        /// 配置键
        key: String,
        /// 期望长度
        expected: usize,
        /// 实际长度
        actual: usize,
    },

    /// 数量与材料模型要求不符
    #[error("'{key}' 需要 {required} 个值 ({context}), 实际 {actual}")]
    CountMismatch {
        /// 配置键
        key: String,
        /// 要求的数量
        required: usize,
        /// 实际数量
        actual: usize,
        /// 约束来源
        context: String,
    },

    /// 引用文件不可访问
    #[error("文件不存在 '{key}': {}", .path.display())]
    FileNotFound {
        /// 配置键
        key: String,
        /// 文件路径
        path: PathBuf,
    },

    /// 选项之间互不兼容
    #[error("选项冲突 '{key}': {reason}")]
    Incompatible {
        /// 配置键
        key: String,
        /// 原因
        reason: String,
    },

    /// 当前构建不支持
    #[error("'{key}' = '{value}' 不可用: 当前构建未启用 {capability}")]
    Unsupported {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 缺失的构建能力
        capability: &'static str,
    },
}

impl ConfigError {
    /// 构造 `InvalidValue`
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// 构造 `Incompatible`
    pub fn incompatible(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Incompatible {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// 出错的配置键（IO/解析错误没有键）
    pub fn key(&self) -> Option<&str> {
        let key = match self {
            Self::Io(_) | Self::Parse(_) => return None,
            Self::Missing(key) | Self::EmptyArray(key) => key,
            Self::InvalidType { key, .. }
            | Self::InvalidValue { key, .. }
            | Self::InvalidChoice { key, .. }
            | Self::LengthMismatch { key, .. }
            | Self::CountMismatch { key, .. }
            | Self::FileNotFound { key, .. }
            | Self::Incompatible { key, .. }
            | Self::Unsupported { key, .. } => key,
        };
        Some(key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid_value("Properties.temperature", -1.0, "必须为正");
        assert!(err.to_string().contains("Properties.temperature"));
        assert_eq!(err.key(), Some("Properties.temperature"));
    }

    #[test]
    fn test_count_mismatch_names_required() {
        let err = ConfigError::CountMismatch {
            key: "Properties.Matl_Props.num_props".to_string(),
            required: 17,
            actual: 16,
            context: "FCC + PowerVoce".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("17"));
        assert!(msg.contains("num_props"));
    }

    #[test]
    fn test_parse_error_has_no_key() {
        assert!(ConfigError::Parse("bad".into()).key().is_none());
    }
}
