use openlibrary_proxy::config::{log_filter, ProxyConfig, STARTUP_TARGET};
use openlibrary_proxy::routes::{create_router, search::Upstream};
use openlibrary_proxy::services::openlibrary::OpenLibraryClient;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref())?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ProxyConfig::from_env()?;
    let upstream: Upstream = Arc::new(OpenLibraryClient::new(&config)?);

    let app = create_router(upstream);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        target: STARTUP_TARGET,
        "Listening... {} (upstream {})", addr, config.search_url
    );

    axum::serve(listener, app).await?;
    Ok(())
}
