use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::{error, info};

use pgswitch::api::create_router;
use pgswitch::app::{AppState, DatabaseService};
use pgswitch::infra::{AdapterFactory, DatabaseConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();
    init_tracing();

    let config = DatabaseConfig::from_env().context("failed to load database configuration")?;

    let service = Arc::new(DatabaseService::new(AdapterFactory::new(config)));

    // Startup failures are fatal: the process must not serve traffic
    // against a half-initialized database layer.
    if let Err(e) = service.init().await {
        error!(error = %e, "database initialization failed");
        return Err(e.into());
    }

    let app_state = Arc::new(AppState::new(service.clone()));
    let router = create_router(app_state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(addr = %addr, driver = %service.driver_kind(), "server starting");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    service.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
