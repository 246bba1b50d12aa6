//! 文件名安全验证模块
//!
//! 所有来自请求的文件名在拼接到基础目录之前都必须通过这里的检查，
//! 防止路径穿越、绝对路径和驱动器字母等方式逃出基础目录。

use std::path::{Component, Path};

use crate::error::{AppError, Result};

/// 文件名验证结果
#[derive(Debug, Clone, PartialEq)]
pub enum PathValidationResult {
    /// 文件名安全
    Valid(String),
    /// 文件名不安全,返回原因
    Unsafe(String),
}

/// 验证单个文件名
///
/// # Arguments
///
/// * `name` - 请求中提交的文件名(不允许包含目录)
///
/// # Examples
///
/// ```
/// use filedeck::utils::path_security::{validate_file_name, PathValidationResult};
///
/// assert!(matches!(validate_file_name("notes.txt"), PathValidationResult::Valid(_)));
/// assert!(matches!(validate_file_name("../etc/passwd"), PathValidationResult::Unsafe(_)));
/// ```
pub fn validate_file_name(name: &str) -> PathValidationResult {
    // 检查空字符串
    if name.is_empty() {
        return PathValidationResult::Unsafe("file name is empty".to_string());
    }

    // 检查只有空格
    if name.trim().is_empty() {
        return PathValidationResult::Unsafe("file name contains only whitespace".to_string());
    }

    if name.contains('\0') {
        return PathValidationResult::Unsafe("file name contains a NUL byte".to_string());
    }

    // 检查路径分隔符(两种平台的都拒绝)
    if name.contains('/') || name.contains('\\') {
        return PathValidationResult::Unsafe("file name contains a path separator".to_string());
    }

    // 检查父目录(`a..b` 这类普通名称允许)
    if name == ".." {
        return PathValidationResult::Unsafe("file name is the parent directory (..)".to_string());
    }

    // 检查当前目录
    if name == "." {
        return PathValidationResult::Unsafe("file name is the current directory (.)".to_string());
    }

    // Windows: 检查驱动器字母
    let mut chars = name.chars();
    if let (Some(first), Some(':')) = (chars.next(), chars.next()) {
        if first.is_ascii_alphabetic() {
            return PathValidationResult::Unsafe(
                "file name must not carry a drive letter".to_string(),
            );
        }
    }

    // 最终兜底: 必须恰好是一个普通路径组件
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => PathValidationResult::Valid(name.to_string()),
        _ => PathValidationResult::Unsafe("file name is not a single path component".to_string()),
    }
}

/// 验证文件名,不安全时返回 [`AppError::InvalidName`]
pub fn ensure_safe_file_name(name: &str) -> Result<&str> {
    match validate_file_name(name) {
        PathValidationResult::Valid(_) => Ok(name),
        PathValidationResult::Unsafe(reason) => Err(AppError::invalid_name(reason)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("notes.txt")]
    #[case("README")]
    #[case(".hidden")]
    #[case("with space.md")]
    #[case("日志.log")]
    #[case("a.b.c")]
    #[case("a..b")]
    #[case("v1..2.txt")]
    #[case("...")]
    fn test_validate_normal_names(#[case] name: &str) {
        assert_eq!(
            validate_file_name(name),
            PathValidationResult::Valid(name.to_string())
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(".")]
    #[case("..")]
    #[case("../etc/passwd")]
    #[case("../../etc/passwd")]
    #[case("/etc/passwd")]
    #[case("sub/file.txt")]
    #[case("..\\windows\\system32")]
    #[case("C:secret")]
    #[case("nul\0byte")]
    fn test_validate_unsafe_names(#[case] name: &str) {
        assert!(
            matches!(validate_file_name(name), PathValidationResult::Unsafe(_)),
            "expected {:?} to be rejected",
            name
        );
    }

    #[test]
    fn test_ensure_safe_file_name_maps_to_invalid_name() {
        let err = ensure_safe_file_name("../x").unwrap_err();
        assert!(matches!(err, AppError::InvalidName(_)));
        assert_eq!(ensure_safe_file_name("x.txt").unwrap(), "x.txt");
    }

    proptest! {
        #[test]
        fn prop_separator_names_rejected(
            prefix in "[a-zA-Z0-9_-]{0,10}",
            sep in prop_oneof![Just("/"), Just("\\"), Just("/../"), Just("\\..\\")],
            suffix in "[a-zA-Z0-9_.-]{0,10}",
        ) {
            let name = format!("{}{}{}", prefix, sep, suffix);
            prop_assert!(ensure_safe_file_name(&name).is_err(), "accepted {:?}", name);
        }

        #[test]
        fn prop_plain_names_accepted(name in "[a-zA-Z0-9_-][a-zA-Z0-9_ -]{0,30}(\\.[a-z]{1,4})?") {
            prop_assert!(ensure_safe_file_name(&name).is_ok(), "rejected {:?}", name);
        }

        #[test]
        fn prop_inner_dots_accepted(
            prefix in "[a-zA-Z0-9_-]{1,10}",
            dots in "\\.{2,4}",
            suffix in "[a-zA-Z0-9_-]{1,10}",
        ) {
            let name = format!("{}{}{}", prefix, dots, suffix);
            prop_assert!(ensure_safe_file_name(&name).is_ok(), "rejected {:?}", name);
        }
    }
}
