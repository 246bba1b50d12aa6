//! HTTP 路由层
//!
//! 启动时构建一次、之后不再修改的路由表：
//! - `GET  /`                   文件列表
//! - `GET  /files/{filename}`   文件内容(先经过存在性检查)
//! - `GET  /create`             新建表单
//! - `POST /create`             新建文件
//! - `POST /update/{filename}`  重命名
//! - `POST /delete/{filename}`  删除
//!
//! 未匹配的请求先查找静态资源目录,再落到 404 处理器。

pub mod fallback;
pub mod files;
pub mod guards;

use axum::handler::HandlerWithoutStateExt;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::models::AppState;

/// 组装完整路由
///
/// 注册顺序固定：业务路由 → 静态资源与 404 兜底 → panic 兜底 → 请求追踪。
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(fallback::not_found.into_service());

    let show_file = get(files::show_file)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guards::require_existing_file,
        ))
        .fallback(fallback::not_found);

    let router = Router::new()
        .route("/", get(files::list_files).fallback(fallback::not_found))
        .route("/files/:filename", show_file)
        .route(
            "/create",
            get(files::create_form)
                .post(files::create_file)
                .fallback(fallback::not_found),
        )
        .route(
            "/update/:filename",
            post(files::rename_file).fallback(fallback::not_found),
        )
        .route(
            "/delete/:filename",
            post(files::delete_file).fallback(fallback::not_found),
        )
        .fallback_service(static_files);

    with_error_boundary(router).with_state(state)
}

/// 外层中间件：panic 兜底与请求追踪
pub fn with_error_boundary<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(fallback::handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
