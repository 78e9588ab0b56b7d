use std::fmt;

use axum::{http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::ctx::Ctx;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CtxError {
    pub error: AppError,
    pub req_id: Uuid,
    pub is_htmx: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    Generic { description: String },
    AuthFailNoSession,
    AuthFailJwtInvalid { source: String },
    ContentApi { source: String },
    Serde { source: String },
}

/// Error carrying the request id and the response flavour the client asked for.
pub type CtxResult<T> = core::result::Result<T, CtxError>;
/// Any error raised before a response is composed.
pub type AppResult<T> = core::result::Result<T, AppError>;

impl std::error::Error for AppError {}

impl CtxError {
    pub fn from<T: Into<AppError>>(ctx: &Ctx) -> impl FnOnce(T) -> CtxError + '_ {
        |err| CtxError {
            req_id: ctx.req_id(),
            error: err.into(),
            is_htmx: ctx.is_htmx,
        }
    }
}

impl From<AppError> for CtxError {
    fn from(value: AppError) -> Self {
        CtxError {
            req_id: Uuid::new_v4(),
            error: value,
            is_htmx: false,
        }
    }
}

const INTERNAL: &str = "Internal error";

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic { description } => write!(f, "{description}"),
            Self::AuthFailNoSession => write!(f, "Please sign in to comment"),
            Self::AuthFailJwtInvalid { .. } => write!(f, "The provided session is not valid"),
            Self::ContentApi { .. } => write!(f, "Content service unavailable"),
            Self::Serde { source } => write!(f, "Serde error - {source}"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponseBody {
    error: String,
    req_id: String,
}

impl ErrorResponseBody {
    pub fn new(error: String, req_id: Option<String>) -> Self {
        ErrorResponseBody {
            error,
            req_id: req_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }

    pub fn get_err(&self) -> String {
        self.error.clone()
    }
}

impl From<ErrorResponseBody> for String {
    fn from(value: ErrorResponseBody) -> Self {
        serde_json::to_string(&value).unwrap_or_else(|_| INTERNAL.to_string())
    }
}

impl IntoResponse for CtxError {
    fn into_response(self) -> axum::response::Response {
        tracing::warn!(req_id = %self.req_id, error = ?self.error, "->> {:<12} - into_response", "ERROR");
        let status_code = match self.error {
            AppError::AuthFailNoSession | AppError::AuthFailJwtInvalid { .. } => {
                StatusCode::FORBIDDEN
            }
            AppError::ContentApi { .. } => StatusCode::BAD_GATEWAY,
            AppError::Generic { .. } | AppError::Serde { .. } => StatusCode::BAD_REQUEST,
        };
        let err = self.error.clone();
        let body = get_error_body(&self);
        let mut response = (status_code, body).into_response();
        // the real error travels along for the trace layer
        response.extensions_mut().insert(err);
        response
    }
}

fn get_error_body(err: &CtxError) -> String {
    match err.is_htmx {
        true => to_err_html(err.error.to_string()),
        false => ErrorResponseBody::new(err.error.to_string(), Some(err.req_id.to_string())).into(),
    }
}

pub fn to_err_html(err_str: String) -> String {
    let mut ret_html = "<div class=\"error\">".to_string();
    if err_str.contains('\n') {
        ret_html += "<ul>";
        for line in err_str.split('\n') {
            ret_html += format!("<li>{line}</li>").as_str();
        }
        ret_html += "</ul>"
    } else {
        ret_html += err_str.as_str();
    }
    ret_html += "</div>";
    ret_html
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde {
            source: value.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(value: reqwest::Error) -> Self {
        Self::ContentApi {
            source: value.to_string(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        Self::AuthFailJwtInvalid {
            source: value.to_string(),
        }
    }
}

impl From<CtxError> for AppError {
    fn from(value: CtxError) -> Self {
        value.error
    }
}
