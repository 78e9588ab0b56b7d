use serde::Serialize;
use strum::Display;

pub const POSTING_COMMENT: &str = "Posting your comment...";
pub const COMMENT_POSTED: &str = "Comment Successfully Posted!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ToastLevel {
    Loading,
    Success,
}

/// A transient notification. A later toast with the same id replaces an earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: String,
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn loading(id: &str) -> Self {
        Toast {
            id: id.to_string(),
            level: ToastLevel::Loading,
            message: POSTING_COMMENT.to_string(),
        }
    }

    pub fn success(id: &str) -> Self {
        Toast {
            id: id.to_string(),
            level: ToastLevel::Success,
            message: COMMENT_POSTED.to_string(),
        }
    }
}
