//! 表单请求体
//!
//! 字段名与页面表单保持一致(`newFilename` 为驼峰命名)。缺失的字段按空字符串处理,
//! 交给文件名验证返回 400,而不是表单解析错误。

use serde::Deserialize;

/// `POST /create`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFileForm {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub content: String,
}

/// `POST /update/{filename}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenameFileForm {
    #[serde(default, rename = "newFilename")]
    pub new_filename: String,
}
