//! HTTP front end for the Factios fact service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Fact pages** (`/`, `/f/{lang}`, `/f/{lang}/{short}`) rendered from an
//!   embedded `minijinja` template
//! - **JSON API** (`/api/{lang}/fact`, `/api/{lang}/fact/{short}`) returning
//!   `{"Short": ..., "Fact": ...}`
//! - **Sitemap** (`/sitemap.xml`) and a search engine ping trigger
//!   (`/api/sentsitemap`)
//! - **Health check** (`/ping`) and static files from the public directory
//!
//! # Architecture
//!
//! All lookups go through a [`FactSource`](factios_store::FactSource) held in
//! the shared [`AppState`]. Handlers keep no state between requests; the
//! fact tree on disk is the only shared resource and it is never written.

pub mod config;
pub mod error;
pub mod handlers;
pub mod page;
pub mod router;
pub mod server;
pub mod sitemap;
pub mod state;

// Re-export primary types for convenience.
pub use config::FactiosConfig;
pub use error::FactiosError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
