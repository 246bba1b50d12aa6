//! Filedeck - 主入口
//!
//! 负责：
//! - 加载配置(可选的第一个命令行参数为配置文件路径)
//! - 初始化日志系统
//! - 启动 HTTP 服务

use std::path::PathBuf;

use filedeck::infrastructure::config::AppConfig;
use filedeck::logging;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).map_err(filedeck::AppError::from)?;

    logging::init_tracing(&config.logging)?;

    info!("🚀 Filedeck v{} - 启动中...", env!("CARGO_PKG_VERSION"));
    info!(
        data_dir = %config.storage.data_dir,
        public_dir = %config.storage.public_dir,
        "Configuration loaded"
    );

    filedeck::serve(config).await?;
    Ok(())
}
