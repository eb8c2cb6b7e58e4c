use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use streamvision_api::config::Config;
use streamvision_api::services::providers::OpenAiProvider;
use streamvision_api::storage::MemStorage;
use streamvision_api::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // In-memory store seeded with the demo catalog; a persistent
    // CatalogStore implementation slots in here once one exists.
    let store = Arc::new(MemStorage::with_sample_data());
    let provider = Arc::new(OpenAiProvider::from_config(&config));
    let state = AppState::new(store, provider);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(host = %config.host, port = config.port, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
