//! HTTP endpoint handlers for the Factios server.
//!
//! Every handler is a thin adapter: pull parameters from the path, ask the
//! fact store, render the answer. The store reads the disk synchronously, so
//! every call to it runs on the blocking thread pool. Store failures end the
//! request with an error status and are never retried.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/`, `/f`, `/f/` | Random fact page in the default language |
//! | `GET` | `/f/{lang}`, `/f/{lang}/` | Random fact page |
//! | `GET` | `/f/{lang}/{short}` | Page for one fact |
//! | `GET` | `/api/{lang}/fact` | Random fact as JSON |
//! | `GET` | `/api/{lang}/fact/{short}` | One fact as JSON |
//! | `GET` | `/api/sentsitemap` | Ping search engines with the sitemap URL |
//! | `GET` | `/sitemap.xml` | Sitemap of all fact pages |
//! | `GET` | `/ping` | Health check |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use factios_store::{Fact, FactSource};
use tracing::{debug, info};

use crate::error::FactiosError;
use crate::page::FactPage;
use crate::sitemap;
use crate::state::AppState;

/// Placeholder some clients send for an unset route parameter.
const UNDEFINED_PARAM: &str = "undefined";

// ---------------------------------------------------------------------------
// GET /ping -- health check
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn ping() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "pong" }))
}

// ---------------------------------------------------------------------------
// GET /, /f/, /f/{lang}, /f/{lang}/{short} -- fact pages
// ---------------------------------------------------------------------------

/// Random fact page in the default language.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, FactiosError> {
    render_fact_page(&state, None, None).await
}

/// Random fact page in the requested language.
pub async fn language_page(
    State(state): State<Arc<AppState>>,
    Path(lang): Path<String>,
) -> Result<Html<String>, FactiosError> {
    render_fact_page(&state, Some(lang), None).await
}

/// Page for a single fact.
pub async fn fact_page(
    State(state): State<Arc<AppState>>,
    Path((lang, short)): Path<(String, String)>,
) -> Result<Html<String>, FactiosError> {
    render_fact_page(&state, Some(lang), Some(short)).await
}

/// Resolve the page parameters and render the fact page.
///
/// A missing language falls back to the configured default; a missing
/// short selects a random fact.
async fn render_fact_page(
    state: &AppState,
    lang: Option<String>,
    short: Option<String>,
) -> Result<Html<String>, FactiosError> {
    let lang = lang
        .filter(|l| is_present(l))
        .unwrap_or_else(|| state.site.default_language.clone());
    let short = short.filter(|s| is_present(s));

    let lookup_lang = lang.clone();
    let lookup = with_store(state, move |store| match short {
        Some(short) => store.fact_by_id(&lookup_lang, &short),
        None => store.random_fact(&lookup_lang),
    })
    .await?;
    let fact = lookup.map_err(|e| {
        debug!(lang = %lang, error = %e, "fact page lookup failed");
        FactiosError::PageNotFound
    })?;

    info!(lang = %lang, short = %fact.short, "fact page served");

    let html = state
        .pages
        .render_fact(&FactPage::new(&fact, state.site.base_url()))?;
    Ok(Html(html))
}

/// Whether a path parameter carries a real value.
fn is_present(param: &str) -> bool {
    !param.is_empty() && param != UNDEFINED_PARAM
}

// ---------------------------------------------------------------------------
// GET /api/{lang}/fact[/{short}] -- JSON API
// ---------------------------------------------------------------------------

/// Random fact of a language as JSON.
pub async fn random_fact(
    State(state): State<Arc<AppState>>,
    Path(lang): Path<String>,
) -> Result<Json<Fact>, FactiosError> {
    let fact = with_store(&state, move |store| store.random_fact(&lang)).await??;
    Ok(Json(fact))
}

/// A single fact as JSON.
pub async fn fact_by_id(
    State(state): State<Arc<AppState>>,
    Path((lang, short)): Path<(String, String)>,
) -> Result<Json<Fact>, FactiosError> {
    let fact = with_store(&state, move |store| store.fact_by_id(&lang, &short)).await??;
    Ok(Json(fact))
}

// ---------------------------------------------------------------------------
// GET /sitemap.xml, /api/sentsitemap -- sitemap
// ---------------------------------------------------------------------------

/// Sitemap listing every fact page.
pub async fn sitemap_xml(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, FactiosError> {
    let base_url = state.site.base_url().to_owned();
    let urls = with_store(&state, move |store| sitemap::sitemap_urls(store, &base_url)).await?;
    debug!(urls = urls.len(), "sitemap generated");
    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        sitemap::render_sitemap(&urls),
    ))
}

/// Tell the configured search engines where the sitemap lives.
pub async fn ping_search_engines(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sitemap_url = sitemap::sitemap_location(state.site.base_url());
    let results =
        sitemap::ping_search_engines(&state.http, &state.sitemap.ping_endpoints, &sitemap_url)
            .await;
    info!(
        sitemap = %sitemap_url,
        endpoints = results.len(),
        "search engines pinged"
    );

    Json(serde_json::json!({
        "sitemap": sitemap_url,
        "results": results,
    }))
}

// ---------------------------------------------------------------------------
// Store access
// ---------------------------------------------------------------------------

/// Run `call` against the fact store on the blocking thread pool.
///
/// Fails only when the blocking task itself dies; the store's own result is
/// handed back untouched.
async fn with_store<T, F>(state: &AppState, call: F) -> Result<T, FactiosError>
where
    T: Send + 'static,
    F: FnOnce(&dyn FactSource) -> T + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || call(store.as_ref()))
        .await
        .map_err(|e| FactiosError::Internal(format!("store task failed: {e}")))
}
