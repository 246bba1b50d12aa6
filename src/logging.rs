//! 日志初始化
//!
//! `RUST_LOG` 优先；未设置时使用配置中的级别。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, Result};
use crate::infrastructure::config::LoggingConfig;

/// 构建过滤器
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// 安装全局 tracing subscriber,只能调用一次
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    let result = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    result.map_err(|e| AppError::Internal(format!("failed to install tracing subscriber: {}", e)))
}
