use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::mw_ctx::CtxState;
use crate::routes::post_page;

pub fn main_router(ctx_state: &Arc<CtxState>) -> Router {
    Router::new()
        .route("/hc", get(get_hc))
        .nest_service("/assets", ServeDir::new(&ctx_state.assets_dir))
        .merge(post_page::routes())
        .with_state(ctx_state.clone())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

async fn get_hc() -> Response {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    (StatusCode::OK, format!("v{}", VERSION)).into_response()
}
