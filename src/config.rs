use crate::utils::avatar::DEFAULT_AVATAR_URL_TEMPLATE;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub graphql_endpoint: String,
    pub graphql_api_key: Option<String>,
    pub session_secret: String,
    pub session_cookie_name: String,
    pub avatar_url_template: String,
    pub query_cache_ttl_secs: u64,
    pub query_cache_max_entries: usize,
    pub assets_dir: String,
    pub port: u16,
    pub is_development: bool,
    pub sentry_project_link: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let graphql_endpoint =
            std::env::var("GRAPHQL_ENDPOINT").expect("Missing GRAPHQL_ENDPOINT in env");
        let graphql_api_key = std::env::var("GRAPHQL_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let session_secret =
            std::env::var("SESSION_SECRET").expect("Missing SESSION_SECRET in env");
        let session_cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or("jwt".to_string());

        let avatar_url_template = std::env::var("AVATAR_URL_TEMPLATE")
            .unwrap_or(DEFAULT_AVATAR_URL_TEMPLATE.to_string());

        let query_cache_ttl_secs = std::env::var("QUERY_CACHE_TTL_SECS").map_or(30, |t| {
            t.parse::<u64>()
                .expect("QUERY_CACHE_TTL_SECS must be number")
        });

        let query_cache_max_entries =
            std::env::var("QUERY_CACHE_MAX_ENTRIES").map_or(10_000, |n| {
                n.parse::<usize>()
                    .expect("QUERY_CACHE_MAX_ENTRIES must be number")
            });

        let assets_dir = std::env::var("ASSETS_DIR").unwrap_or("assets".to_string());

        let port = std::env::var("PORT")
            .unwrap_or("8080".to_string())
            .parse::<u16>()
            .expect("PORT should be number");

        let is_development = std::env::var("DEVELOPMENT")
            .map(|v| v.eq("true"))
            .unwrap_or(false);

        let sentry_project_link = std::env::var("SENTRY_PROJECT_LINK").ok();

        Self {
            graphql_endpoint,
            graphql_api_key,
            session_secret,
            session_cookie_name,
            avatar_url_template,
            query_cache_ttl_secs,
            query_cache_max_entries,
            assets_dir,
            port,
            is_development,
            sentry_project_link,
        }
    }

    pub fn environment(&self) -> &'static str {
        match self.is_development {
            true => "development",
            false => "production",
        }
    }
}
