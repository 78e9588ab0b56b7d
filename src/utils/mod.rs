pub mod avatar;
pub mod graphql_client;
pub mod jwt;
pub mod query_cache;
pub mod time_ago;
pub mod validate_utils;
