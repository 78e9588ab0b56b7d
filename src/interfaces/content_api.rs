use async_trait::async_trait;

use crate::entities::comment::{Comment, NewComment};
use crate::entities::post::Post;
use crate::middleware::error::AppResult;

/// Read and write operations against the external content schema.
#[async_trait]
pub trait ContentApiInterface {
    async fn get_post_by_post_id(&self, post_id: &str) -> AppResult<Option<Post>>;
    async fn add_comment(&self, comment: &NewComment) -> AppResult<Comment>;
}
