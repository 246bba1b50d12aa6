//! 基础设施层 - 技术实现
//!
//! 目前只包含分层配置加载

pub mod config;
