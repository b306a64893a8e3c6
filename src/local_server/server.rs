//! HTTP server implementation
//!
//! Uses axum to serve the search page and fragments, with start and
//! graceful stop.

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::ServerConfig;
use super::handlers::{self, AppState};
use crate::error::AppError;
use crate::storage::ConnectionPool;

/// Server control handle
///
/// Dropping the handle stops the server.
pub struct ServerHandle {
    /// Shutdown signal sender
    shutdown_tx: Option<oneshot::Sender<()>>,
    /// Address the server is bound to
    local_addr: SocketAddr,
}

impl ServerHandle {
    /// Address the server is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Port the server is bound to
    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    /// Stop the server
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/search", get(handlers::search))
        .route("/api/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Inventory search HTTP server
pub struct LocalServer {
    config: ServerConfig,
    pool: Arc<ConnectionPool>,
}

impl LocalServer {
    /// Create a new server instance
    pub fn new(config: ServerConfig, pool: Arc<ConnectionPool>) -> Self {
        Self { config, pool }
    }

    /// Start the server in the background
    ///
    /// # Returns
    /// ServerHandle controlling the server lifecycle
    pub async fn start(&self) -> Result<ServerHandle, AppError> {
        self.config.validate()?;

        let state = Arc::new(AppState {
            pool: self.pool.clone(),
            config: self.config.clone(),
        });
        let app = build_router(state);

        let addr = self.config.socket_addr();
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            AppError::internal(format!("Failed to bind to {}: {}", addr, e))
        })?;
        let local_addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let graceful = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });

            if let Err(e) = graceful.await {
                tracing::error!("Server error: {}", e);
            }
        });

        tracing::info!("Server running at http://{}", local_addr);

        Ok(ServerHandle {
            shutdown_tx: Some(shutdown_tx),
            local_addr,
        })
    }

    /// Check whether a local port can be bound
    pub async fn check_port_available(port: u16) -> bool {
        tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], port)))
            .await
            .is_ok()
    }
}
