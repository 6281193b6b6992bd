use std::sync::Arc;

use anyhow::Context;
use marquee_core::embed::EmbedCatalog;
use marquee_metadata::tmdb::TmdbClient;
use marquee_server::config::ServerConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    info!(
        home_country = %config.home_country,
        timeout_secs = config.http_timeout.as_secs(),
        "configuration loaded"
    );

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .context("failed to build HTTP client")?;
    let tmdb = TmdbClient::with_client(config.tmdb_key.clone(), http);

    let embeds = match &config.embed_providers {
        Some(path) => {
            let catalog = EmbedCatalog::load(path)
                .with_context(|| format!("failed to load embed providers from {}", path.display()))?;
            info!(
                path = %path.display(),
                movie = catalog.movie.len(),
                tv = catalog.tv.len(),
                "embed providers loaded"
            );
            catalog
        }
        None => {
            warn!("MARQUEE_EMBED_PROVIDERS not set; no embed providers available");
            EmbedCatalog::default()
        }
    };

    let app_state =
        marquee_server::state::AppState::new(Arc::new(tmdb), embeds, config.home_country.clone());
    let app = marquee_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
