//! API server setup

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use crate::application::SpendingService;

use super::{AppState, create_router};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub instance_name: String,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            instance_name: "local".to_string(),
            enable_cors: true,
        }
    }
}

/// Run the API server until Ctrl+C.
pub async fn run_server(config: ServerConfig, service: SpendingService) -> Result<()> {
    let state = AppState::new(Arc::new(service), config.instance_name.as_str());
    let router = create_router(state, config.enable_cors);

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;
    let addr = listener.local_addr()?;

    tracing::info!("spendbook API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("spendbook API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
