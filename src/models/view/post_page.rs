use std::fmt;

use askama::Template;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::post::Post;
use crate::entities::session::Session;
use crate::models::view::comment::{sort_newest_first, CommentView};
use crate::models::view::post::PostCardView;
use crate::models::view::toast::Toast;
use crate::utils::avatar::AvatarUrl;

pub const LOADER_SIZE: u32 = 100;
pub const SIGNED_IN_PLACEHOLDER: &str = "What are your thoughts?";
pub const SIGNED_OUT_PLACEHOLDER: &str = "Please sign in to comment";

/// Document wrapping the thread; the thread itself arrives through the loader.
#[derive(Template, Serialize, Debug)]
#[template(path = "post_page/shell.html")]
pub struct PostPageShell {
    pub post_id: String,
    pub loader: LoaderView,
}

impl PostPageShell {
    pub fn new(post_id: &str) -> Self {
        PostPageShell {
            post_id: post_id.to_string(),
            loader: LoaderView::loading_from(format!("/post/{post_id}/thread")),
        }
    }
}

#[derive(Template, Serialize, Debug, Clone)]
#[template(path = "post_page/loader.html")]
pub struct LoaderView {
    pub size: u32,
    #[serde(skip_serializing)]
    pub load_from: Option<String>,
}

impl LoaderView {
    pub fn new() -> Self {
        LoaderView {
            size: LOADER_SIZE,
            load_from: None,
        }
    }

    pub fn loading_from(url: String) -> Self {
        LoaderView {
            size: LOADER_SIZE,
            load_from: Some(url),
        }
    }
}

impl Default for LoaderView {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CommentFormView {
    pub action: String,
    pub enabled: bool,
    pub placeholder: String,
    pub comment_as: String,
    pub comment: String,
    /// Shown while the submission is in flight; its id is posted back so the
    /// success toast can replace it.
    pub pending_toast: Toast,
}

impl CommentFormView {
    /// An empty form; disabled without a session.
    pub fn new(post_id: &str, session: Option<&Session>) -> Self {
        CommentFormView {
            action: format!("/post/{post_id}/comments"),
            enabled: session.is_some(),
            placeholder: match session {
                Some(_) => SIGNED_IN_PLACEHOLDER,
                None => SIGNED_OUT_PLACEHOLDER,
            }
            .to_string(),
            comment_as: session
                .map(|session| session.display_name().to_string())
                .unwrap_or_default(),
            comment: String::new(),
            pending_toast: Toast::loading(&Uuid::new_v4().to_string()),
        }
    }
}

#[derive(Template, Serialize, Debug, Clone)]
#[template(path = "post_page/thread.html")]
pub struct PostThreadView {
    pub post: PostCardView,
    pub comment_form: CommentFormView,
    pub comments: Vec<CommentView>,
}

impl PostThreadView {
    pub fn new(
        post: &Post,
        session: Option<&Session>,
        avatars: &AvatarUrl,
        now: DateTime<Utc>,
    ) -> Self {
        PostThreadView {
            post: PostCardView::new(post, avatars, now),
            comment_form: CommentFormView::new(&post.id, session),
            comments: sort_newest_first(&post.comments, avatars, now),
        }
    }
}

/// What the thread region shows: the loader until the post resolves.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ThreadState {
    Loading(LoaderView),
    Ready(PostThreadView),
}

impl ThreadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ThreadState::Loading(_))
    }
}

impl fmt::Display for ThreadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadState::Loading(loader) => write!(f, "{loader}"),
            ThreadState::Ready(thread) => write!(f, "{thread}"),
        }
    }
}

/// Response to a successful submission: the refetched thread plus the toast
/// replacing the in-progress one.
#[derive(Template, Serialize, Debug, Clone)]
#[template(path = "post_page/comment_submitted.html")]
pub struct CommentSubmittedView {
    pub thread: ThreadState,
    pub toast: Toast,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::view::toast::{ToastLevel, POSTING_COMMENT};
    use chrono::TimeZone;

    fn post() -> Post {
        serde_json::from_value(serde_json::json!({
            "id": "p1",
            "title": "A <b>bold</b> title",
            "body": "body",
            "username": "ferris",
            "created_at": "2023-01-01T00:00:00Z",
            "subreddit": [{ "id": 1, "topic": "rust" }],
            "comments": [
                { "id": "c1", "username": "old", "text": "oldest-comment-text", "created_at": "2023-01-01T00:00:00Z" },
                { "id": "c2", "username": "new", "text": "newest-comment-text", "created_at": "2023-01-02T00:00:00Z" }
            ]
        }))
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 3, 0, 0, 0).unwrap()
    }

    #[test]
    fn signed_out_form_is_disabled() {
        let form = CommentFormView::new("p1", None);
        assert!(!form.enabled);
        assert_eq!(form.placeholder, SIGNED_OUT_PLACEHOLDER);
        assert_eq!(form.comment_as, "");
        assert_eq!(form.comment, "");
    }

    #[test]
    fn signed_in_form_is_enabled() {
        let session = Session {
            user_id: "u1".to_string(),
            name: Some("alice".to_string()),
        };
        let form = CommentFormView::new("p1", Some(&session));
        assert!(form.enabled);
        assert_eq!(form.placeholder, SIGNED_IN_PLACEHOLDER);
        assert_eq!(form.comment_as, "alice");
        assert_eq!(form.action, "/post/p1/comments");
        assert_eq!(form.pending_toast.level, ToastLevel::Loading);
        assert_eq!(form.pending_toast.message, POSTING_COMMENT);
    }

    #[test]
    fn form_renders_in_progress_toast_matching_posted_toast_id() {
        let session = Session {
            user_id: "u1".to_string(),
            name: Some("alice".to_string()),
        };
        let thread = PostThreadView::new(&post(), Some(&session), &AvatarUrl::default(), now());
        let toast_id = thread.comment_form.pending_toast.id.clone();
        let html = thread.render().unwrap();

        assert!(html.contains(&format!(
            "<input type=\"hidden\" name=\"toast_id\" value=\"{toast_id}\">"
        )));
        assert!(html.contains(&format!("hx-indicator=\"#toast-{toast_id}\"")));
        assert!(html.contains(&format!(
            "<div id=\"toast-{toast_id}\" class=\"toast toast-loading htmx-indicator\">{POSTING_COMMENT}</div>"
        )));
    }

    #[test]
    fn thread_renders_newest_comment_first_and_escapes_content() {
        let html = PostThreadView::new(&post(), None, &AvatarUrl::default(), now())
            .render()
            .unwrap();

        let newest = html.find("newest-comment-text").unwrap();
        let oldest = html.find("oldest-comment-text").unwrap();
        assert!(newest < oldest);
        assert!(html.contains("A &lt;b&gt;bold"));
        assert!(!html.contains("<b>bold"));
        assert!(html.contains(SIGNED_OUT_PLACEHOLDER));
        assert!(html.contains("disabled"));
        assert!(html.contains("r/rust"));
    }

    #[test]
    fn loading_state_renders_only_the_loader() {
        let html = ThreadState::Loading(LoaderView::new()).to_string();
        assert!(html.contains("loader"));
        assert!(!html.contains("Comment"));
        assert!(!html.contains("<form"));
    }

    #[test]
    fn thread_state_serializes_with_state_tag() {
        let value = serde_json::to_value(ThreadState::Loading(LoaderView::new())).unwrap();
        assert_eq!(value, serde_json::json!({ "state": "loading", "size": 100 }));
    }
}
