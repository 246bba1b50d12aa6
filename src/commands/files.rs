//! 文件管理路由处理器
//!
//! 每个处理器只做一次存储调用:
//! - 成功时渲染页面或重定向回首页
//! - 失败时把 [`AppError`] 交给错误边界转换为状态码

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use tracing::debug;

use crate::error::Result;
use crate::models::{AppState, CreateFileForm, RenameFileForm};

/// 变更操作成功后统一 302 回到首页
fn redirect_home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

/// `GET /` - 文件列表
pub async fn list_files(State(state): State<AppState>) -> Result<Html<String>> {
    let files = state.store.list_files().await?;
    Ok(Html(state.views.index(&files)?))
}

/// `GET /files/{filename}` - 文件内容
pub async fn show_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Html<String>> {
    let content = state.store.read_file(&filename).await?;
    Ok(Html(state.views.detail(&filename, &content)?))
}

/// `GET /create` - 新建表单
pub async fn create_form(State(state): State<AppState>) -> Result<Html<String>> {
    Ok(Html(state.views.create()?))
}

/// `POST /create` - 新建文件(名称已存在时返回 403,不覆盖)
pub async fn create_file(
    State(state): State<AppState>,
    Form(form): Form<CreateFileForm>,
) -> Result<Response> {
    debug!(file = %form.filename, "Create requested");
    state
        .store
        .create_file(&form.filename, &form.content)
        .await?;
    Ok(redirect_home())
}

/// `POST /update/{filename}` - 重命名
pub async fn rename_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Form(form): Form<RenameFileForm>,
) -> Result<Response> {
    debug!(from = %filename, to = %form.new_filename, "Rename requested");
    state
        .store
        .rename_file(&filename, &form.new_filename)
        .await?;
    Ok(redirect_home())
}

/// `POST /delete/{filename}` - 删除
pub async fn delete_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    debug!(file = %filename, "Delete requested");
    state.store.delete_file(&filename).await?;
    Ok(redirect_home())
}
