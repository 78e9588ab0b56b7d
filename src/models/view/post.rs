use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::post::Post;
use crate::utils::avatar::AvatarUrl;
use crate::utils::time_ago::relative_label;

#[derive(Debug, Clone, Serialize)]
pub struct PostCardView {
    pub id: String,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub username: String,
    pub topic: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub time_ago: String,
    pub vote_score: i64,
    pub comments_count: usize,
    pub avatar_url: String,
}

impl PostCardView {
    pub fn new(post: &Post, avatars: &AvatarUrl, now: DateTime<Utc>) -> Self {
        let created_at = post.created_at_instant();
        let topic = post.topic().map(str::to_string);
        PostCardView {
            id: post.id.clone(),
            title: post.title.clone(),
            body: post.body.clone(),
            image: post.image.clone().filter(|image| !image.is_empty()),
            username: post.username.clone(),
            avatar_url: avatars.for_seed(topic.as_deref().unwrap_or_default()),
            topic,
            created_at,
            time_ago: created_at
                .map(|instant| relative_label(instant, now))
                .unwrap_or_default(),
            vote_score: post.vote_score(),
            comments_count: post.comments.len(),
        }
    }
}
