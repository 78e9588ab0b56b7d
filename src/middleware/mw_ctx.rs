use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;

use crate::config::AppConfig;
use crate::interfaces::content_api::ContentApiInterface;
use crate::utils::avatar::AvatarUrl;
use crate::utils::graphql_client::GraphQlContentApi;
use crate::utils::jwt::JWT;
use crate::utils::query_cache::PostQueryCache;

pub struct CtxState {
    pub content_api: Arc<dyn ContentApiInterface + Send + Sync>,
    pub post_cache: PostQueryCache,
    pub jwt: JWT,
    pub session_cookie_name: String,
    pub avatars: AvatarUrl,
    pub assets_dir: String,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtxState")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("cached_posts", &self.post_cache.len())
            .finish_non_exhaustive()
    }
}

pub fn create_ctx_state(config: &AppConfig) -> Arc<CtxState> {
    let content_api = Arc::new(GraphQlContentApi::new(
        &config.graphql_endpoint,
        config.graphql_api_key.as_deref(),
    ));
    create_ctx_state_with_api(config, content_api)
}

pub fn create_ctx_state_with_api(
    config: &AppConfig,
    content_api: Arc<dyn ContentApiInterface + Send + Sync>,
) -> Arc<CtxState> {
    let ctx_state = CtxState {
        content_api,
        post_cache: PostQueryCache::with_limits(
            Duration::from_secs(config.query_cache_ttl_secs),
            config.query_cache_max_entries,
        ),
        // tokens are minted by the identity provider; the duration only matters for local ones
        jwt: JWT::new(config.session_secret.clone(), TimeDelta::days(1)),
        session_cookie_name: config.session_cookie_name.clone(),
        avatars: AvatarUrl::new(&config.avatar_url_template),
        assets_dir: config.assets_dir.clone(),
    };
    Arc::new(ctx_state)
}
