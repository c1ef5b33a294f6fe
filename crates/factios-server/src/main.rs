//! Factios server binary.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `factios-config.yaml` (or `FACTIOS_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Open the fact store
//! 4. Assemble the shared application state
//! 5. Serve HTTP until `Ctrl-C`

use std::sync::Arc;

use factios_server::config::{LogFormat, LoggingConfig};
use factios_server::{AppState, FactiosConfig, start_server};
use factios_store::{FactSource, JsonFactStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, state assembly, or the server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = FactiosConfig::load()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);

    info!(
        host = config.server.host,
        port = config.server.port,
        store_root = %config.store.root.display(),
        default_language = config.site.default_language,
        "factios-server starting"
    );

    // 3. Open the fact store.
    let store = Arc::new(JsonFactStore::new(&config.store.root));
    match store.languages() {
        Ok(languages) => info!(?languages, "Fact store opened"),
        Err(e) => warn!(error = %e, "Fact store root is not readable, lookups will fail"),
    }

    // 4. Assemble shared state.
    let state = Arc::new(AppState::new(
        store,
        config.site.clone(),
        config.sitemap.clone(),
    )?);

    // 5. Serve.
    start_server(&config.server, state).await?;

    info!("factios-server shutdown complete");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
