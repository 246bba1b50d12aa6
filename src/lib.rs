//! Filedeck - 纯文本文件目录的 Web 管理界面
//!
//! 列出、查看、新建、重命名、删除同一基础目录下的文本文件。

pub mod commands;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod models;
pub mod storage;
pub mod utils;
pub mod views;

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

pub use commands::build_router;
pub use error::{AppError, Result};
pub use infrastructure::config::AppConfig;
pub use models::AppState;

/// 按配置构建应用：确保基础目录存在、编译模板、组装路由
pub async fn build_app(config: &AppConfig) -> Result<Router> {
    let state = AppState::from_config(config)?;
    state.store.ensure_base_dir().await?;
    Ok(build_router(state))
}

/// 绑定端口并运行服务,直到收到 Ctrl+C
pub async fn serve(config: AppConfig) -> Result<()> {
    let app = build_app(&config).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    let local_addr: SocketAddr = listener.local_addr()?;
    info!(address = %local_addr, "Server is running on port {}", local_addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
