mod app;
mod config;
mod error;
mod handlers;
mod models;
mod moniker;
mod routes;
mod state;
mod store;

use std::sync::Arc;

use anyhow::Context;
use config::{Config, StoreBackend};
use moniker::NicknameGenerator;
use state::AppState;
use store::{KvStore, MemoryStore, SpannerStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("moniker-kv starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store = build_store(&config).await?;
    let bind_addr = config.bind_addr();
    let ids = match config.moniker_seed {
        Some(seed) => NicknameGenerator::with_seed(seed),
        None => NicknameGenerator::new(),
    };
    let state = AppState::new(store, Arc::new(ids));
    let app = app::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("moniker-kv stopped");
    Ok(())
}

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn KvStore>> {
    match (config.store_backend, &config.spanner) {
        (StoreBackend::Spanner, Some(spanner_config)) => {
            let store = SpannerStore::from_config(spanner_config).await?;
            if let Err(e) = store.ping().await {
                tracing::warn!("Spanner is not answering yet: {:#}", e);
            }
            Ok(Arc::new(store))
        }
        (StoreBackend::Spanner, None) => {
            anyhow::bail!("Spanner backend selected without Spanner configuration")
        }
        (StoreBackend::Memory, _) => {
            tracing::warn!("Using in-memory store; records are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
