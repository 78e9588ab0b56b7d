use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::entities::comment::{Comment, NewComment};
use crate::entities::post::Post;
use crate::interfaces::content_api::ContentApiInterface;
use crate::middleware::error::{AppError, AppResult};

pub const GET_POST_BY_POST_ID: &str = r#"
query getPostListByPostId($post_id: ID!) {
  getPostListByPostId(post_id: $post_id) {
    body
    created_at
    id
    image
    title
    subreddit_id
    username
    comments {
      created_at
      id
      post_id
      text
      username
    }
    subreddit {
      created_at
      id
      topic
    }
    votes {
      created_at
      id
      post_id
      upvote
      username
    }
  }
}
"#;

pub const ADD_COMMENT: &str = r#"
mutation insertComment($post_id: ID!, $username: String!, $text: String!) {
  insertComment(post_id: $post_id, text: $text, username: $username) {
    created_at
    id
    post_id
    text
    username
  }
}
"#;

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    #[serde(rename = "operationName")]
    pub operation_name: &'a str,
    pub variables: Value,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    pub fn into_data(self) -> AppResult<Option<T>> {
        if !self.errors.is_empty() {
            let messages = self
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("\n");
            return Err(AppError::ContentApi { source: messages });
        }
        Ok(self.data)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_first(self) -> Option<T> {
        match self {
            OneOrMany::One(item) => Some(item),
            OneOrMany::Many(items) => items.into_iter().next(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PostByIdData {
    #[serde(rename = "getPostListByPostId")]
    post: Option<OneOrMany<Post>>,
}

#[derive(Debug, Deserialize)]
struct InsertCommentData {
    #[serde(rename = "insertComment")]
    comment: Option<Comment>,
}

pub struct GraphQlContentApi {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GraphQlContentApi {
    pub fn new(endpoint: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: &GraphQlRequest<'_>) -> AppResult<Option<T>> {
        debug!(operation = request.operation_name, "->> graphql request");
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .json(request);
        if let Some(api_key) = &self.api_key {
            builder = builder.header(header::AUTHORIZATION, format!("Apikey {api_key}"));
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(operation = request.operation_name, %status, "graphql request failed");
            return Err(AppError::ContentApi {
                source: format!("{status}: {body}"),
            });
        }

        response.json::<GraphQlResponse<T>>().await?.into_data()
    }
}

pub fn post_by_id_request(post_id: &str) -> GraphQlRequest<'static> {
    GraphQlRequest {
        query: GET_POST_BY_POST_ID,
        operation_name: "getPostListByPostId",
        variables: json!({ "post_id": post_id }),
    }
}

pub fn add_comment_request(comment: &NewComment) -> GraphQlRequest<'static> {
    GraphQlRequest {
        query: ADD_COMMENT,
        operation_name: "insertComment",
        variables: json!({
            "text": comment.text,
            "post_id": comment.post_id,
            "username": comment.username,
        }),
    }
}

#[async_trait]
impl ContentApiInterface for GraphQlContentApi {
    async fn get_post_by_post_id(&self, post_id: &str) -> AppResult<Option<Post>> {
        let data: Option<PostByIdData> = self.execute(&post_by_id_request(post_id)).await?;
        Ok(data
            .and_then(|data| data.post)
            .and_then(OneOrMany::into_first))
    }

    async fn add_comment(&self, comment: &NewComment) -> AppResult<Comment> {
        let data: Option<InsertCommentData> = self.execute(&add_comment_request(comment)).await?;
        data.and_then(|data| data.comment)
            .ok_or_else(|| AppError::ContentApi {
                source: "insertComment returned no comment".to_string(),
            })
    }
}
