use std::fmt::{Display, Write};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
    response::Html,
};
use axum_extra::extract::cookie::CookieJar;
use axum_htmx::HxRequest;
use serde::Serialize;
use uuid::Uuid;

use super::error::{AppError, CtxError, CtxResult};
use crate::entities::session::Session;
use crate::middleware::mw_ctx::CtxState;

#[derive(Clone, Debug)]
pub struct Ctx {
    session: Option<Session>,
    req_id: Uuid,
    pub is_htmx: bool,
}

impl Ctx {
    pub fn new(session: Option<Session>, req_id: Uuid, is_htmx: bool) -> Self {
        Self {
            session,
            req_id,
            is_htmx,
        }
    }

    pub fn req_id(&self) -> Uuid {
        self.req_id
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn require_session(&self) -> CtxResult<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| self.to_ctx_error(AppError::AuthFailNoSession))
    }

    /// Renders `object` as html or json depending on what the client accepts.
    pub fn to_htmx_or_json<T: Display + Serialize>(&self, object: T) -> CtxResult<Html<String>> {
        let rendered_string = match self.is_htmx {
            true => {
                let mut out = String::new();
                write!(out, "{object}").map_err(|_| {
                    self.to_ctx_error(AppError::Generic {
                        description: "Render template error".to_string(),
                    })
                })?;
                out
            }
            false => serde_json::to_string(&object).map_err(|_| {
                self.to_ctx_error(AppError::Generic {
                    description: "Render json error".to_string(),
                })
            })?,
        };
        Ok(Html(rendered_string))
    }

    pub fn to_ctx_error(&self, error: AppError) -> CtxError {
        CtxError {
            req_id: self.req_id,
            is_htmx: self.is_htmx,
            error,
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for Ctx {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state): State<Arc<CtxState>> = State::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let cookies = CookieJar::from_headers(&parts.headers);

        let HxRequest(is_hx_request) = HxRequest::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;

        let prefers_html = if !is_hx_request {
            match parts.headers.get("accept").and_then(|v| v.to_str().ok()) {
                Some(accept) if accept.contains("application/json") => false,
                Some(accept) if accept.contains("text/plain") => true,
                Some(accept) if accept.contains("text/html") => true,
                _ => true,
            }
        } else {
            true
        };

        let session = match cookies.get(&app_state.session_cookie_name) {
            Some(cookie) => match app_state.jwt.decode_session(cookie.value()) {
                Ok(session) => Some(session),
                Err(err) => {
                    tracing::debug!(error = %err, "ignoring session cookie");
                    None
                }
            },
            None => None,
        };

        Ok(Ctx::new(session, Uuid::new_v4(), prefers_html))
    }
}
