//! HTTP server for geo-addresses
//!
//! Provides the REST API for address CRUD and proximity queries.

pub mod routes;
pub mod state;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::Database;
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Start the HTTP server
///
/// # Arguments
/// * `config` - Server and database configuration
///
/// # Returns
/// Once the server has shut down (Ctrl-C) and the database pool is closed
pub async fn run(config: Config) -> Result<()> {
    let url = config.database_url()?;
    let database = Database::connect(&url, config.database.max_connections).await?;

    run_on(&config.server_addr(), database).await
}

/// Start the HTTP server on a specific address with an already opened database
///
/// Useful for tests or when you want to override config
pub async fn run_on(addr: &str, database: Database) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| Error::Server(format!("Invalid server address: {}", e)))?;

    let state = Arc::new(AppState::new(database));
    let app = create_router(state.clone());

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)))?;

    info!("Shutting down, closing database");
    state.database().close().await;

    Ok(())
}

/// Resolves when the process receives Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
