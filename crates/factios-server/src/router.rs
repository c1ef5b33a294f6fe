//! Axum router construction for the Factios server.
//!
//! Assembles the page, API and sitemap routes into a single [`Router`],
//! falls back to the public static directory for everything else, and
//! wraps the lot in tracing, `Server` header, CORS and compression layers.

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::CompressionLevel;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers;
use crate::state::AppState;

/// `Server` header used when the configured value is not a valid header.
const FALLBACK_SERVER_HEADER: &str = "factios";

/// Build the complete Axum router for the Factios server.
///
/// The router includes:
/// - `GET /`, `GET /f[/]` -- random fact page in the default language
/// - `GET /f/{lang}[/]` -- random fact page
/// - `GET /f/{lang}/{short}` -- page for one fact
/// - `GET /sitemap.xml` -- sitemap of every fact page
/// - `GET /api/{lang}/fact[/]` -- random fact as JSON
/// - `GET /api/{lang}/fact/{short}` -- one fact as JSON
/// - `GET /api/sentsitemap` -- ping search engines
/// - `GET /ping` -- health check
///
/// Any other path is looked up in the public directory and answers 404
/// when no file matches.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let server_header = HeaderValue::from_str(&state.site.server_header).unwrap_or_else(|e| {
        warn!(
            value = %state.site.server_header,
            error = %e,
            "invalid server header, using default"
        );
        HeaderValue::from_static(FALLBACK_SERVER_HEADER)
    });

    let public = ServeDir::new(&state.site.public_dir);

    Router::new()
        // Pages
        .route("/", get(handlers::index))
        .route("/f", get(handlers::index))
        .route("/f/", get(handlers::index))
        .route("/f/{lang}", get(handlers::language_page))
        .route("/f/{lang}/", get(handlers::language_page))
        .route("/f/{lang}/{short}", get(handlers::fact_page))
        .route("/sitemap.xml", get(handlers::sitemap_xml))
        // JSON API
        .route("/api/sentsitemap", get(handlers::ping_search_engines))
        .route("/api/{lang}/fact", get(handlers::random_fact))
        .route("/api/{lang}/fact/", get(handlers::random_fact))
        .route("/api/{lang}/fact/{short}", get(handlers::fact_by_id))
        // Health
        .route("/ping", get(handlers::ping))
        // Static files
        .fallback_service(public)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    header::SERVER,
                    server_header,
                ))
                .layer(cors)
                .layer(CompressionLayer::new().quality(CompressionLevel::Fastest)),
        )
        .with_state(state)
}
