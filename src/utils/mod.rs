//! 通用工具函数模块
//!
//! 目前只有文件名安全验证。

pub mod path_security;

pub use path_security::*;
