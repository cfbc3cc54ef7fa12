//! # Receipt API Server
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration from the environment
//! 3. Connect to SQLite & run migrations
//! 4. Serve HTTP until Ctrl+C / SIGTERM
//! 5. Close the pool

use std::sync::Arc;

use anyhow::Context;
use receipt_api::{init_tracing, router, ApiConfig, ReceiptService};
use receipt_db::Database;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting receipt points server");

    let config = ApiConfig::load().context("loading configuration")?;
    info!(
        addr = %config.bind_addr,
        db_path = %config.database_path.display(),
        store_timeout_ms = config.store_timeout.as_millis() as u64,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config())
        .await
        .context("opening receipt database")?;

    let service =
        ReceiptService::new(Arc::new(db.receipts())).with_store_timeout(config.store_timeout);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "HTTP server listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
