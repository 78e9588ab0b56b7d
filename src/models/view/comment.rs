use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::comment::Comment;
use crate::utils::avatar::AvatarUrl;
use crate::utils::time_ago::relative_label;

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: String,
    pub username: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub time_ago: String,
    pub avatar_url: String,
}

impl CommentView {
    pub fn new(comment: &Comment, avatars: &AvatarUrl, now: DateTime<Utc>) -> Self {
        let created_at = comment.created_at_instant();
        CommentView {
            id: comment.id.clone(),
            username: comment.username.clone(),
            text: comment.text.clone(),
            created_at,
            time_ago: created_at
                .map(|instant| relative_label(instant, now))
                .unwrap_or_default(),
            avatar_url: avatars.for_seed(&comment.username),
        }
    }
}

/// Comment views ordered by creation time, newest first.
///
/// The sort is stable so equal timestamps keep query order; comments whose
/// timestamp does not parse go last.
pub fn sort_newest_first(
    comments: &[Comment],
    avatars: &AvatarUrl,
    now: DateTime<Utc>,
) -> Vec<CommentView> {
    let mut views: Vec<CommentView> = comments
        .iter()
        .map(|comment| CommentView::new(comment, avatars, now))
        .collect();
    views.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    views
}
