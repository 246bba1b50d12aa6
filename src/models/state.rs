//! 应用状态管理
//!
//! 所有请求共享同一份只读状态,请求之间没有可变的共享数据。

use std::path::PathBuf;

use crate::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::storage::FileStore;
use crate::views::Views;

/// 路由共享状态
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: FileStore,
    pub views: Views,
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(store: FileStore, views: Views, public_dir: PathBuf) -> Self {
        Self {
            store,
            views,
            public_dir,
        }
    }

    /// 根据配置构建状态,模板在这里编译
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            FileStore::new(config.data_dir()),
            Views::new()?,
            config.public_dir(),
        ))
    }
}
