// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::settings_service::SettingsService;
use crate::application::telemetry_store::TelemetryStore;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::synthetic_source::SyntheticSource;
use crate::presentation::app_state::AppState;
use crate::presentation::router::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create telemetry source (infrastructure layer)
    let source = Arc::new(SyntheticSource::new(
        config.generator.seed,
        config.generator.alert_count,
    ));

    // Create store and services (application layer)
    let store = Arc::new(TelemetryStore::new(source, config.store.to_settings()));
    store.start();

    let state = Arc::new(AppState {
        store: store.clone(),
        settings: Arc::new(SettingsService::new()),
    });

    // Build router (presentation layer)
    let router = router(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting rockfall-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.stop().await;
    tracing::info!("Shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
