// crates/xp_config/src/tree.rs

//! 配置树访问器
//!
//! 对已解析的 TOML 文档提供按点分路径的只读查找。所有取值函数返回
//! `ConfigResult<Option<T>>`：键不存在时为 `Ok(None)`，由调用方决定默认值；
//! 键存在但类型不符时返回 [`ConfigError::InvalidType`]，而不是悄悄回退到默认值。
//!
//! 类型转换规则：
//! - 整数可以当作浮点数读取
//! - 计数类取值（`get_usize`）拒绝负数
//! - 数组元素逐个检查类型，错误信息带上元素下标

use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::{ConfigError, ConfigResult};

/// 已解析的配置文档
///
/// 验证期间以不可变引用传给每个 section，验证结束后不再修改。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTree {
    root: Table,
}

impl ConfigTree {
    /// 由已解析的表构建
    pub fn new(root: Table) -> Self {
        Self { root }
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let root: Table = content
            .parse()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;
        Ok(Self { root })
    }

    /// 从文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// 根表视图
    pub fn root(&self) -> TableRef<'_> {
        TableRef {
            prefix: String::new(),
            table: &self.root,
        }
    }

    /// 按点分路径查找原始值，例如 `"Properties.Matl_Props.floc"`
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        self.root().lookup(path)
    }

    /// 按点分路径取子表
    pub fn table(&self, path: &str) -> ConfigResult<Option<TableRef<'_>>> {
        self.root().table(path)
    }

    /// 取必需的子表
    pub fn require_table(&self, path: &str) -> ConfigResult<TableRef<'_>> {
        self.root().require_table(path)
    }
}

/// 子表视图，记录从根开始的完整路径用于错误信息
#[derive(Debug, Clone)]
pub struct TableRef<'a> {
    prefix: String,
    table: &'a Table,
}

impl<'a> TableRef<'a> {
    /// 视图的完整路径（根为空串）
    pub fn path(&self) -> &str {
        &self.prefix
    }

    /// 拼接完整键名
    pub fn qualify(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }

    /// 是否包含某个键
    pub fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    /// 按相对点分路径查找原始值
    pub fn lookup(&self, path: &str) -> Option<&'a Value> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.table.get(first)?;
        for part in parts {
            current = current.as_table()?.get(part)?;
        }
        Some(current)
    }

    /// 取子表；键存在但不是表时报错
    pub fn table(&self, path: &str) -> ConfigResult<Option<TableRef<'a>>> {
        match self.lookup(path) {
            None => Ok(None),
            Some(Value::Table(table)) => Ok(Some(TableRef {
                prefix: self.qualify(path),
                table,
            })),
            Some(other) => Err(self.type_error(path, "table", other)),
        }
    }

    /// 取必需的子表
    pub fn require_table(&self, path: &str) -> ConfigResult<TableRef<'a>> {
        self.table(path)?
            .ok_or_else(|| ConfigError::Missing(self.qualify(path)))
    }

    /// 读取布尔值
    pub fn get_bool(&self, path: &str) -> ConfigResult<Option<bool>> {
        match self.lookup(path) {
            None => Ok(None),
            Some(Value::Boolean(b)) => Ok(Some(*b)),
            Some(other) => Err(self.type_error(path, "boolean", other)),
        }
    }

    /// 读取整数
    pub fn get_i64(&self, path: &str) -> ConfigResult<Option<i64>> {
        match self.lookup(path) {
            None => Ok(None),
            Some(value) => integer_of(value)
                .map(Some)
                .ok_or_else(|| self.type_error(path, "integer", value)),
        }
    }

    /// 读取非负计数
    pub fn get_usize(&self, path: &str) -> ConfigResult<Option<usize>> {
        match self.get_i64(path)? {
            None => Ok(None),
            Some(v) => usize::try_from(v)
                .map(Some)
                .map_err(|_| ConfigError::invalid_value(self.qualify(path), v, "不能为负数")),
        }
    }

    /// 读取浮点数（整数自动转换）
    pub fn get_f64(&self, path: &str) -> ConfigResult<Option<f64>> {
        match self.lookup(path) {
            None => Ok(None),
            Some(value) => float_of(value)
                .map(Some)
                .ok_or_else(|| self.type_error(path, "float", value)),
        }
    }

    /// 读取字符串
    pub fn get_str(&self, path: &str) -> ConfigResult<Option<&'a str>> {
        match self.lookup(path) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.type_error(path, "string", other)),
        }
    }

    /// 读取路径
    pub fn get_path(&self, path: &str) -> ConfigResult<Option<PathBuf>> {
        Ok(self.get_str(path)?.map(PathBuf::from))
    }

    /// 读取整数数组
    pub fn get_i64_array(&self, path: &str) -> ConfigResult<Option<Vec<i64>>> {
        match self.get_array(path)? {
            None => Ok(None),
            Some(items) => self.collect_items(path, items, "integer", integer_of).map(Some),
        }
    }

    /// 读取浮点数组（整数元素自动转换）
    pub fn get_f64_array(&self, path: &str) -> ConfigResult<Option<Vec<f64>>> {
        match self.get_array(path)? {
            None => Ok(None),
            Some(items) => self.collect_items(path, items, "float", float_of).map(Some),
        }
    }

    /// 读取嵌套整数数组（数组的数组）
    pub fn get_nested_i64_array(&self, path: &str) -> ConfigResult<Option<Vec<Vec<i64>>>> {
        self.get_nested(path, "integer", integer_of)
    }

    /// 读取嵌套浮点数组
    pub fn get_nested_f64_array(&self, path: &str) -> ConfigResult<Option<Vec<Vec<f64>>>> {
        self.get_nested(path, "float", float_of)
    }

    fn get_array(&self, path: &str) -> ConfigResult<Option<&'a [Value]>> {
        match self.lookup(path) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items.as_slice())),
            Some(other) => Err(self.type_error(path, "array", other)),
        }
    }

    fn get_nested<T>(
        &self,
        path: &str,
        expected: &'static str,
        convert: fn(&Value) -> Option<T>,
    ) -> ConfigResult<Option<Vec<Vec<T>>>> {
        let Some(outer) = self.get_array(path)? else {
            return Ok(None);
        };
        outer
            .iter()
            .enumerate()
            .map(|(i, inner)| {
                let element_path = format!("{path}[{i}]");
                match inner {
                    Value::Array(items) => {
                        self.collect_items(&element_path, items, expected, convert)
                    }
                    other => Err(self.type_error(&element_path, "array", other)),
                }
            })
            .collect::<ConfigResult<Vec<_>>>()
            .map(Some)
    }

    fn collect_items<T>(
        &self,
        path: &str,
        items: &[Value],
        expected: &'static str,
        convert: fn(&Value) -> Option<T>,
    ) -> ConfigResult<Vec<T>> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                convert(item).ok_or_else(|| self.type_error(&format!("{path}[{i}]"), expected, item))
            })
            .collect()
    }

    fn type_error(&self, path: &str, expected: &'static str, found: &Value) -> ConfigError {
        ConfigError::InvalidType {
            key: self.qualify(path),
            expected,
            found: found.type_str(),
        }
    }
}

fn integer_of(value: &Value) -> Option<i64> {
    value.as_integer()
}

fn float_of(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        [Properties]
        temperature = 300
        [Properties.Matl_Props]
        floc = "props.txt"
        num_props = -3
        [BCs]
        essential_ids = [[1, 2], [3]]
        essential_vals = [[0.0, 1], "oops"]
    "#;

    fn tree() -> ConfigTree {
        ConfigTree::from_toml_str(DOC).unwrap()
    }

    #[test]
    fn test_dotted_lookup() {
        let tree = tree();
        assert!(tree.lookup("Properties.Matl_Props.floc").is_some());
        assert!(tree.lookup("Properties.Missing.floc").is_none());
        assert!(tree.lookup("Properties.temperature.deeper").is_none());
    }

    #[test]
    fn test_integer_coerces_to_float() {
        let tree = tree();
        let props = tree.require_table("Properties").unwrap();
        assert_eq!(props.get_f64("temperature").unwrap(), Some(300.0));
    }

    #[test]
    fn test_negative_count_rejected() {
        let tree = tree();
        let matl = tree.require_table("Properties.Matl_Props").unwrap();
        assert_eq!(matl.path(), "Properties.Matl_Props");
        let err = matl.get_usize("num_props").unwrap_err();
        assert_eq!(err.key(), Some("Properties.Matl_Props.num_props"));
    }

    #[test]
    fn test_type_mismatch_is_error() {
        let tree = tree();
        let matl = tree.require_table("Properties.Matl_Props").unwrap();
        assert!(matches!(
            matl.get_f64("floc"),
            Err(ConfigError::InvalidType { expected: "float", .. })
        ));
        assert!(tree.table("Properties.temperature").is_err());
    }

    #[test]
    fn test_nested_arrays() {
        let tree = tree();
        let bcs = tree.require_table("BCs").unwrap();
        let ids = bcs.get_nested_i64_array("essential_ids").unwrap().unwrap();
        assert_eq!(ids, vec![vec![1, 2], vec![3]]);

        let err = bcs.get_nested_f64_array("essential_vals").unwrap_err();
        assert_eq!(err.key(), Some("BCs.essential_vals[1]"));
    }

    #[test]
    fn test_missing_table() {
        let tree = tree();
        assert!(tree.table("Mesh").unwrap().is_none());
        assert!(matches!(
            tree.require_table("Mesh"),
            Err(ConfigError::Missing(key)) if key == "Mesh"
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            ConfigTree::from_toml_str("[Properties\n"),
            Err(ConfigError::Parse(_))
        ));
    }
}
