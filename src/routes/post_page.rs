use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::entities::session::Session;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{CtxError, CtxResult};
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::extractor_utils::JsonOrFormValidated;
use crate::models::view::post_page::PostPageShell;
use crate::services::post_thread_service::{CommentInput, PostThreadService};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/post/:post_id", get(get_post_page))
        .route("/post/:post_id/thread", get(get_post_thread))
        .route("/post/:post_id/comments", post(create_comment))
        .route("/api/session", get(get_session))
}

fn thread_service(state: &CtxState) -> PostThreadService<'_> {
    PostThreadService::new(state.content_api.as_ref(), &state.post_cache, &state.avatars)
}

async fn get_post_page(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path(post_id): Path<String>,
) -> CtxResult<Html<String>> {
    if ctx.is_htmx {
        return ctx.to_htmx_or_json(PostPageShell::new(&post_id));
    }
    let thread = thread_service(&state)
        .read_thread(&post_id, ctx.session())
        .await;
    ctx.to_htmx_or_json(thread)
}

async fn get_post_thread(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path(post_id): Path<String>,
) -> CtxResult<Html<String>> {
    let thread = thread_service(&state)
        .read_thread(&post_id, ctx.session())
        .await;
    ctx.to_htmx_or_json(thread)
}

async fn create_comment(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path(post_id): Path<String>,
    JsonOrFormValidated(body): JsonOrFormValidated<CommentInput>,
) -> CtxResult<Html<String>> {
    let session = ctx.require_session()?;
    let submitted = thread_service(&state)
        .submit_comment(&post_id, session, body)
        .await
        .map_err(CtxError::from(&ctx))?;
    ctx.to_htmx_or_json(submitted)
}

async fn get_session(ctx: Ctx) -> Json<Option<Session>> {
    Json(ctx.session().cloned())
}
