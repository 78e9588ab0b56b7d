use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::comment::Comment;
use crate::utils::time_ago::parse_created_at;
use crate::utils::validate_utils::{deserialize_id, deserialize_option_id, null_as_default};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "deserialize_option_id")]
    pub subreddit_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subreddit: Vec<Subreddit>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub votes: Vec<Vote>,
}

impl Post {
    pub fn created_at_instant(&self) -> Option<DateTime<Utc>> {
        parse_created_at(&self.created_at)
    }

    pub fn topic(&self) -> Option<&str> {
        self.subreddit
            .first()
            .map(|subreddit| subreddit.topic.as_str())
            .filter(|topic| !topic.is_empty())
    }

    /// Upvotes minus downvotes.
    pub fn vote_score(&self) -> i64 {
        self.votes
            .iter()
            .map(|vote| if vote.upvote { 1 } else { -1 })
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subreddit {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_option_id")]
    pub post_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvote: bool,
}
