use crate::booter::Booter;
use crate::config::AppConfig;
use crate::core::gateway::UploadGateway;
use crate::server::router::build_router;
use crate::server::types::AppState;
use crate::storage::build_backend;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub mod booter;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Initialize app state from environment variables
async fn init_app_state(config: &AppConfig) -> Result<AppState, anyhow::Error> {
    let backend = build_backend(config.storage_type).await?;

    Ok(AppState {
        gateway: UploadGateway::new(backend, config.storage_timeout),
        storage_type: config.storage_type,
    })
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        storage = %config.storage_type,
        port = config.port,
        timeout = ?config.storage_timeout,
        "starting pixdrop"
    );

    let state = Arc::new(init_app_state(&config).await?);
    let router = build_router(state, config.request_timeout());

    Booter::new(config.port).await?.start(router).await
}
