//! HTTP server initialization and runtime setup.
//!
//! Handles store connection, worker spawning, and the Axum server lifecycle
//! including graceful shutdown.

use crate::config::{Config, StoreBackend};
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::KeyValueStore;
use crate::infrastructure::store::{MemoryStore, RedisStore};
use crate::routes::{RouterOptions, app_router};
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long queued clicks may take to drain after the server stops.
const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Key-value store (Redis, or in-memory for development)
/// - Background click worker
/// - Axum HTTP server
///
/// On SIGINT or SIGTERM the server stops accepting connections, finishes
/// in-flight requests, drains the click queue and closes the store.
///
/// # Errors
///
/// Returns an error if:
/// - The store is unreachable at startup
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    let worker = tokio::spawn(run_click_worker(
        click_rx,
        store.clone(),
        config.click_worker_concurrency,
    ));
    tracing::info!(
        "Click worker started (concurrency: {})",
        config.click_worker_concurrency
    );

    let state = AppState::new(store.clone(), click_tx, config.base_url.clone());
    let app = app_router(state, RouterOptions::from_config(&config)?);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped, draining click queue");

    // The router held the last senders, so the worker sees a closed channel.
    match tokio::time::timeout(WORKER_DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Click worker panicked: {}", e),
        Err(_) => tracing::warn!(
            "Click worker did not drain within {:?}, pending clicks are lost",
            WORKER_DRAIN_TIMEOUT
        ),
    }

    store.close().await;
    tracing::info!("Store connection closed");

    Ok(())
}

/// Opens the configured store. A Redis store that cannot be reached is fatal.
async fn connect_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    match config.store_backend {
        StoreBackend::Redis => {
            let store = RedisStore::connect(&config.redis_url, config.store_timeout())
                .await
                .context("Failed to connect to Redis")?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, links are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Resolves on Ctrl+C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
