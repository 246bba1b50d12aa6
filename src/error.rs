use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use miette::Diagnostic;
use thiserror::Error;
use tracing::error;

use crate::infrastructure::config::ConfigError;

/// 所有 5xx 响应统一使用的正文，不向客户端暴露内部原因
pub const INTERNAL_ERROR_BODY: &str =
    "Internal Server Error: Something went wrong. Please try again later.";

/**
 * 应用错误类型 - 使用 miette 提供用户友好的错误诊断
 *
 * 4xx 变体的 Display 文本直接作为响应正文；
 * 5xx 变体只写入服务端日志，客户端看到固定的通用消息。
 */
#[derive(Error, Debug, Diagnostic)]
pub enum AppError {
    #[error("Invalid file name: {0}")]
    #[diagnostic(
        code(app::invalid_name),
        help("File names must be a single path component without separators or '..'")
    )]
    InvalidName(String),

    #[error("{0}")]
    #[diagnostic(code(app::already_exists))]
    AlreadyExists(String),

    #[error("{0}")]
    #[diagnostic(code(app::not_found))]
    NotFound(String),

    #[error("Failed to read the files directory.")]
    #[diagnostic(code(app::directory_read_error))]
    DirectoryRead(#[source] std::io::Error),

    #[error("Failed to read the file content.")]
    #[diagnostic(code(app::read_error))]
    Read(#[source] std::io::Error),

    #[error("Failed to create the file. Please try again later.")]
    #[diagnostic(code(app::write_error))]
    Write(#[source] std::io::Error),

    #[error("Failed to rename the file.")]
    #[diagnostic(code(app::rename_error))]
    Rename(#[source] std::io::Error),

    #[error("Failed to delete the file.")]
    #[diagnostic(code(app::delete_error))]
    Delete(#[source] std::io::Error),

    #[error("Failed to render the page.")]
    #[diagnostic(code(app::template_error))]
    Template(#[from] minijinja::Error),

    #[error(transparent)]
    #[diagnostic(code(app::config_error))]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    #[diagnostic(code(app::io_error))]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(app::internal_error))]
    Internal(String),
}

impl AppError {
    /**
     * 创建未找到错误
     */
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    /**
     * 创建已存在错误
     */
    pub fn already_exists(message: impl Into<String>) -> Self {
        AppError::AlreadyExists(message.into())
    }

    /**
     * 创建文件名无效错误
     */
    pub fn invalid_name(message: impl Into<String>) -> Self {
        AppError::InvalidName(message.into())
    }

    /// HTTP status for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidName(_) => StatusCode::BAD_REQUEST,
            AppError::AlreadyExists(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The error message followed by every `source()` below it.
    pub fn chain(&self) -> Vec<String> {
        let mut chain = vec![self.to_string()];
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        chain
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                error = %self,
                chain = ?self.chain(),
                debug = ?self,
                "Unhandled error while serving request"
            );
            return (status, INTERNAL_ERROR_BODY).into_response();
        }

        (status, self.to_string()).into_response()
    }
}

/**
 * 统一结果类型
 */
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::io;

    #[test]
    fn test_error_creation() {
        let error = AppError::not_found("File not found: a.txt");
        assert!(matches!(error, AppError::NotFound(_)));

        let error = AppError::invalid_name("contains '/'");
        assert!(matches!(error, AppError::InvalidName(_)));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::invalid_name("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::already_exists("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::not_found("x").status_code(), StatusCode::NOT_FOUND);

        let io_err = || io::Error::new(io::ErrorKind::Other, "disk on fire");
        for err in [
            AppError::DirectoryRead(io_err()),
            AppError::Read(io_err()),
            AppError::Write(io_err()),
            AppError::Rename(io_err()),
            AppError::Delete(io_err()),
            AppError::Io(io_err()),
        ] {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_chain_includes_source() {
        let err = AppError::Rename(io::Error::new(io::ErrorKind::Other, "cross-device link"));
        let chain = err.chain();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0], "Failed to rename the file.");
        assert!(chain[1].contains("cross-device link"));
    }

    #[tokio::test]
    async fn test_client_errors_expose_message() {
        let response = AppError::already_exists("File already exists!").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"File already exists!");
    }

    #[tokio::test]
    async fn test_server_errors_hide_cause() {
        let err = AppError::Read(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "secret path /srv/data",
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], INTERNAL_ERROR_BODY.as_bytes());
    }
}
