use std::net::{Ipv4Addr, SocketAddr};

use thread_page_server::config::AppConfig;
use thread_page_server::init;
use thread_page_server::middleware::mw_ctx;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let _sentry = config.sentry_project_link.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: Some(config.environment().into()),
                ..Default::default()
            },
        ))
    });

    info!(endpoint = %config.graphql_endpoint, development = config.is_development, "starting");

    let ctx_state = mw_ctx::create_ctx_state(&config);
    let routes_all = init::main_router(&ctx_state);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    info!("->> LISTENING on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, routes_all.into_make_service()).await
}
