use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time_ago::parse_created_at;
use crate::utils::validate_utils::{deserialize_id, deserialize_option_id, null_as_default};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_option_id")]
    pub post_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl Comment {
    pub fn created_at_instant(&self) -> Option<DateTime<Utc>> {
        parse_created_at(&self.created_at)
    }
}

/// Variables of the add-comment mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub text: String,
    pub post_id: String,
    pub username: Option<String>,
}
