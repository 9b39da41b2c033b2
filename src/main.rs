//! Tollgate server binary: config, tracing, in-memory wiring, Axum serve.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tollgate::adapters::http::{api_router, AppState};
use tollgate::adapters::memory::{
    InMemoryAccountDirectory, InMemoryCredentialStore, InMemoryPaymentLedger,
    InMemoryProofStorage, InMemorySupportThreads,
};
use tollgate::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState {
        directory: Arc::new(InMemoryAccountDirectory::new()),
        ledger: Arc::new(InMemoryPaymentLedger::new()),
        credentials: Arc::new(InMemoryCredentialStore::new()),
        threads: Arc::new(InMemorySupportThreads::new()),
        proofs: Arc::new(InMemoryProofStorage::new()),
        webhook_secret: config.gateway.webhook_secret.clone(),
    };

    let app = api_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, environment = ?config.server.environment, "tollgate listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
