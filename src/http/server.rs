//! HTTP server startup logic.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::{HTTP_HOST, HTTP_PORT};

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// Bind the listener. A failure here is fatal; there is no retry or fallback port.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serve the router on an already bound listener until the process exits.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    axum::serve(listener, app).await.map_err(ServerError::Serve)
}

/// Bind the fixed listen address and serve the router.
///
/// This function blocks until the server stops.
pub async fn start_server(app: Router) -> Result<(), ServerError> {
    let addr = SocketAddr::new(HTTP_HOST, HTTP_PORT);
    let listener = bind(addr).await?;
    tracing::info!(%addr, "Starting HTTP server");
    serve(listener, app).await
}
