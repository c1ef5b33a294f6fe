//! HTTP server lifecycle.
//!
//! [`start_server`] is what the binary calls: [`bind`] the configured
//! address, then [`serve`] until `Ctrl-C`. The two halves are public so a
//! caller can bind an ephemeral port or supply its own shutdown future.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::router::build_router;
use crate::state::AppState;

/// Errors that can occur when starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listen address did not resolve or could not be bound.
    #[error("cannot listen on {addr}: {source}")]
    Bind {
        /// The `host:port` that was requested.
        addr: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Accepting or serving connections failed.
    #[error("server stopped with an I/O error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bind, serve, and stop cleanly on `Ctrl-C`.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let listener = bind(config).await?;
    serve(listener, state, shutdown_signal()).await
}

/// Open a TCP listener on `host:port`. The host may be a name.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|source| ServerError::Bind {
            addr: format!("{}:{}", config.host, config.port),
            source,
        })
}

/// Serve the Factios router on `listener` until `shutdown` resolves.
///
/// In-flight requests are drained before returning.
pub async fn serve<S>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: S,
) -> Result<(), ServerError>
where
    S: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
    info!(addr = %local_addr, "factios listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}

/// Resolve on `Ctrl-C`. Never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C, stop the process to shut down");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
