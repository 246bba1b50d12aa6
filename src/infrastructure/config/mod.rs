//! 配置管理基础设施层
//!
//! 分层加载顺序(后者覆盖前者)：
//! - 内置默认值
//! - 可选的 TOML 配置文件
//! - `FILEDECK__SECTION__KEY` 环境变量
//! - `PORT` 环境变量(仅覆盖 `server.port`)

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::Validate;

/// 未指定配置文件时尝试加载的默认文件名
pub const DEFAULT_CONFIG_FILE: &str = "filedeck.toml";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "FILEDECK";

/// 配置错误类型
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("配置验证失败: {0}")]
    #[diagnostic(code(config::validation))]
    Validation(#[from] validator::ValidationErrors),

    #[error("配置文件不存在: {}", .0.display())]
    #[diagnostic(code(config::file_not_found))]
    FileNotFound(PathBuf),

    #[error("配置加载失败: {0}")]
    #[diagnostic(
        code(config::load),
        help("Check the TOML syntax and that numeric values such as PORT are valid")
    )]
    Load(#[from] ::config::ConfigError),
}

/// 全局配置根结构
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,

    #[validate(nested)]
    pub storage: StorageConfig,

    #[validate(nested)]
    pub logging: LoggingConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1, max = 100))]
    pub host: String,

    #[validate(range(min = 1, max = 65535))]
    pub port: u16,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StorageConfig {
    /// 存放文本文件的基础目录
    #[validate(length(min = 1, max = 500))]
    pub data_dir: String,

    /// 静态资源目录,未匹配的 GET 请求会先在这里查找
    #[validate(length(min = 1, max = 500))]
    pub public_dir: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// 未设置 RUST_LOG 时使用的过滤规则
    #[validate(length(min = 1, max = 100))]
    pub level: String,

    /// 输出 JSON 格式日志
    pub json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            public_dir: "./public".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// 从默认值、配置文件和环境变量加载并验证配置
    ///
    /// `path` 为 `None` 时尝试当前目录下的 `filedeck.toml`,不存在也不报错；
    /// 显式指定的文件必须存在。
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_port(path, std::env::var("PORT").ok())
    }

    /// 同 [`AppConfig::load`],端口覆盖值由调用方传入
    pub fn load_with_port(path: Option<&Path>, port: Option<String>) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let mut builder = ::config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("storage.data_dir", defaults.storage.data_dir)?
            .set_default("storage.public_dir", defaults.storage.public_dir)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.json", defaults.logging.json)?;

        builder = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.to_path_buf()));
                }
                builder.add_source(::config::File::from(path).required(true))
            }
            None => builder
                .add_source(::config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let loaded: AppConfig = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", port)?
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    pub fn public_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.public_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.data_dir, "./data");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
[server]
port = 8080

[storage]
data_dir = "/srv/texts"
"#,
        );

        let config = AppConfig::load_with_port(Some(file.path()), None).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.data_dir, "/srv/texts");
        assert_eq!(config.storage.public_dir, "./public");
    }

    #[test]
    fn test_port_override_wins() {
        let file = toml_file("[server]\nport = 8080\n");
        let config =
            AppConfig::load_with_port(Some(file.path()), Some("4321".to_string())).unwrap();
        assert_eq!(config.server.port, 4321);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let file = toml_file("[server]\nport = 0\n");
        let err = AppConfig::load_with_port(Some(file.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = AppConfig::load_with_port(Some(file.path()), Some("not-a-port".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = AppConfig::load_with_port(Some(Path::new("/definitely/not/here.toml")), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
