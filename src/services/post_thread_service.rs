use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::entities::comment::NewComment;
use crate::entities::post::Post;
use crate::entities::session::Session;
use crate::interfaces::content_api::ContentApiInterface;
use crate::middleware::error::AppResult;
use crate::models::view::post_page::{CommentSubmittedView, LoaderView, PostThreadView, ThreadState};
use crate::models::view::toast::Toast;
use crate::utils::avatar::AvatarUrl;
use crate::utils::query_cache::PostQueryCache;

#[derive(Debug, Deserialize, Validate)]
pub struct CommentInput {
    pub comment: String,
    /// Id of the in-progress toast the client is showing.
    pub toast_id: Option<String>,
}

pub struct PostThreadService<'a> {
    content_api: &'a (dyn ContentApiInterface + Send + Sync),
    post_cache: &'a PostQueryCache,
    avatars: &'a AvatarUrl,
}

impl<'a> PostThreadService<'a> {
    pub fn new(
        content_api: &'a (dyn ContentApiInterface + Send + Sync),
        post_cache: &'a PostQueryCache,
        avatars: &'a AvatarUrl,
    ) -> Self {
        Self {
            content_api,
            post_cache,
            avatars,
        }
    }

    /// Reads the post through the cache. Until it resolves, and whenever the
    /// read fails, the thread is only the loading indicator.
    pub async fn read_thread(&self, post_id: &str, session: Option<&Session>) -> ThreadState {
        let read = self.post_cache.get_or_fetch(post_id, self.content_api).await;
        self.to_thread_state(post_id, read, session)
    }

    /// Writes the comment, then invalidates and re-executes the post read.
    ///
    /// A failed write is returned as is; no failure toast exists, so the
    /// client's in-progress toast is never replaced in that case.
    pub async fn submit_comment(
        &self,
        post_id: &str,
        session: &Session,
        input: CommentInput,
    ) -> AppResult<CommentSubmittedView> {
        let toast_id = input
            .toast_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        debug!(post_id, toast_id = %toast_id, "posting comment");

        let new_comment = NewComment {
            text: input.comment,
            post_id: post_id.to_string(),
            username: session.name.clone(),
        };
        let created = self.content_api.add_comment(&new_comment).await?;
        info!(post_id, comment_id = %created.id, "comment posted");

        let read = self.post_cache.refetch(post_id, self.content_api).await;
        Ok(CommentSubmittedView {
            thread: self.to_thread_state(post_id, read, Some(session)),
            toast: Toast::success(&toast_id),
        })
    }

    fn to_thread_state(
        &self,
        post_id: &str,
        read: AppResult<Option<Arc<Post>>>,
        session: Option<&Session>,
    ) -> ThreadState {
        match read {
            Ok(Some(post)) => {
                ThreadState::Ready(PostThreadView::new(&post, session, self.avatars, Utc::now()))
            }
            Ok(None) => {
                debug!(post_id, "post not resolved");
                ThreadState::Loading(LoaderView::new())
            }
            Err(err) => {
                warn!(post_id, error = %err, "post read failed");
                ThreadState::Loading(LoaderView::new())
            }
        }
    }
}
