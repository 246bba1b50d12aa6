//! 路由前置检查

use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::{AppError, Result};
use crate::models::AppState;

/// 文件不存在时直接返回 404,不进入读取处理器
///
/// 名称不合法时同样在这里返回 400。
pub async fn require_existing_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    request: Request,
    next: Next,
) -> Result<Response> {
    if !state.store.file_exists(&filename).await? {
        return Err(AppError::not_found(format!("File not found: {}", filename)));
    }

    Ok(next.run(request).await)
}
