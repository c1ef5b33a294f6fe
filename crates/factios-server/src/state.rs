//! Shared application state for the Factios server.
//!
//! [`AppState`] is built once at startup and injected into every handler via
//! Axum's `State` extractor. Nothing in it is mutated after construction.

use std::sync::Arc;
use std::time::Duration;

use factios_store::FactSource;

use crate::config::{SiteConfig, SitemapConfig};
use crate::error::FactiosError;
use crate::page::PageRenderer;

/// Shared state for the Axum application.
#[derive(Clone)]
pub struct AppState {
    /// The fact store every lookup goes through.
    pub store: Arc<dyn FactSource>,
    /// HTML page renderer.
    pub pages: PageRenderer,
    /// Public site settings.
    pub site: SiteConfig,
    /// Search engine ping settings.
    pub sitemap: SitemapConfig,
    /// HTTP client used for search engine pings.
    pub http: reqwest::Client,
}

impl AppState {
    /// Assemble the application state.
    ///
    /// Fails if the page templates do not load or the HTTP client cannot be
    /// built.
    pub fn new(
        store: Arc<dyn FactSource>,
        site: SiteConfig,
        sitemap: SitemapConfig,
    ) -> Result<Self, FactiosError> {
        let pages = PageRenderer::new()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(sitemap.ping_timeout_secs))
            .build()
            .map_err(|e| FactiosError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            store,
            pages,
            site,
            sitemap,
            http,
        })
    }
}
