//! fixtured-server: HTTP transport for the fixtured core
//!
//! A thin axum shell: a single fallback route converts every inbound request
//! into the core's request event and renders the envelope back. Routing
//! semantics live entirely in `fixtured-core`; axum contributes the listener,
//! tracing middleware, CORS, and graceful shutdown.

pub mod gateway;

use std::net::SocketAddr;

use fixtured_core::Handler;
use tokio::net::TcpListener;

pub use gateway::build_router;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the HTTP server until shutdown.
pub async fn run_server(handler: Handler, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(handler);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, starting shutdown");
        }
    }
}
