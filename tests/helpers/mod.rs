pub mod test_with_server;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use thread_page_server::config::AppConfig;
use thread_page_server::entities::comment::{Comment, NewComment};
use thread_page_server::entities::post::Post;
use thread_page_server::interfaces::content_api::ContentApiInterface;
use thread_page_server::middleware::error::{AppError, AppResult};
use thread_page_server::middleware::mw_ctx::{create_ctx_state_with_api, CtxState};
use thread_page_server::utils::jwt::JWT;

pub const SESSION_SECRET: &str = "test-session-secret";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Read(String),
    Write(NewComment),
}

/// In-memory content backend recording every call it receives.
#[derive(Default)]
pub struct MockContentApi {
    posts: Mutex<HashMap<String, Post>>,
    calls: Mutex<Vec<ApiCall>>,
    next_comment_id: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

#[allow(dead_code)]
impl MockContentApi {
    pub fn insert_post(&self, post: Post) {
        self.posts.lock().unwrap().insert(post.id.clone(), post);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<NewComment> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::Write(comment) => Some(comment),
                ApiCall::Read(_) => None,
            })
            .collect()
    }

    pub fn reads(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ApiCall::Read(_)))
            .count()
    }
}

#[async_trait]
impl ContentApiInterface for MockContentApi {
    async fn get_post_by_post_id(&self, post_id: &str) -> AppResult<Option<Post>> {
        self.calls
            .lock()
            .unwrap()
            .push(ApiCall::Read(post_id.to_string()));
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::ContentApi {
                source: "read failed".to_string(),
            });
        }
        Ok(self.posts.lock().unwrap().get(post_id).cloned())
    }

    async fn add_comment(&self, comment: &NewComment) -> AppResult<Comment> {
        self.calls
            .lock()
            .unwrap()
            .push(ApiCall::Write(comment.clone()));
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::ContentApi {
                source: "write failed".to_string(),
            });
        }
        let id = self.next_comment_id.fetch_add(1, Ordering::SeqCst);
        let created = Comment {
            id: format!("new-{id}"),
            post_id: Some(comment.post_id.clone()),
            username: comment.username.clone().unwrap_or_default(),
            text: comment.text.clone(),
            created_at: Utc::now().to_rfc3339(),
        };
        if let Some(post) = self.posts.lock().unwrap().get_mut(&comment.post_id) {
            post.comments.push(created.clone());
        }
        Ok(created)
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        graphql_endpoint: "http://localhost:5001/graphql".to_string(),
        graphql_api_key: None,
        session_secret: SESSION_SECRET.to_string(),
        session_cookie_name: "jwt".to_string(),
        avatar_url_template: "https://avatars.test/{seed}.svg".to_string(),
        query_cache_ttl_secs: 60,
        query_cache_max_entries: 1_000,
        assets_dir: "assets".to_string(),
        port: 0,
        is_development: true,
        sentry_project_link: None,
    }
}

pub fn create_test_server(api: Arc<MockContentApi>) -> (TestServer, Arc<CtxState>) {
    let config = test_config();
    let ctx_state = create_ctx_state_with_api(&config, api);
    let routes_all = thread_page_server::init::main_router(&ctx_state);
    let server = TestServer::new(routes_all).expect("Failed to create test server");
    (server, ctx_state)
}

#[allow(dead_code)]
pub fn session_cookie(name: Option<&str>) -> String {
    let jwt = JWT::new(SESSION_SECRET.to_string(), Duration::hours(1));
    let token = jwt
        .create_session("user-1", name)
        .expect("session token");
    format!("jwt={token}")
}

#[allow(dead_code)]
pub fn fake_post(post_id: &str, comments: &[(&str, &str, &str)]) -> Post {
    let comments: Vec<serde_json::Value> = comments
        .iter()
        .map(|(id, username, created_at)| {
            serde_json::json!({
                "id": id,
                "post_id": post_id,
                "username": username,
                "text": format!("comment {id}"),
                "created_at": created_at,
            })
        })
        .collect();
    serde_json::from_value(serde_json::json!({
        "id": post_id,
        "title": "Is Rust worth learning?",
        "body": "Asking for a friend",
        "username": "ferris",
        "created_at": "2023-01-01T00:00:00Z",
        "subreddit_id": 1,
        "subreddit": [{ "id": 1, "topic": "rust" }],
        "comments": comments,
        "votes": [{ "id": 1, "post_id": post_id, "username": "crab", "upvote": true }],
    }))
    .expect("valid post")
}
