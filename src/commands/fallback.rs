//! 错误边界
//!
//! 在所有路由之后注册：未匹配的路由返回 404,处理器 panic 返回通用 500。
//! 处理器返回的 [`AppError`](crate::error::AppError) 由其 `IntoResponse` 实现处理。

use std::any::Any;

use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::error::INTERNAL_ERROR_BODY;

pub const NOT_FOUND_BODY: &str = "Error 404: Page not found";

/// 未匹配路由
pub async fn not_found(uri: Uri) -> Response {
    warn!(path = %uri.path(), "No route matched");
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}

/// 处理器 panic 时的兜底响应
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };

    error!(panic = message, "Request handler panicked");
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
}
