//! Error types for the Factios HTTP layer.
//!
//! [`FactiosError`] unifies all request failure modes into a single enum
//! that converts into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. API
//! routes answer with a JSON error body; page routes answer with a bare
//! status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use factios_store::StoreError;

/// Errors that can occur while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum FactiosError {
    /// The fact store could not resolve the request (JSON API routes).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The fact store could not resolve a page request.
    #[error("page not found")]
    PageNotFound,

    /// An HTML template failed to load or render.
    #[error("render error: {0}")]
    Render(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for FactiosError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Store(e) if e.is_not_found() => (StatusCode::NOT_FOUND, e.to_string()),
            Self::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::PageNotFound => return StatusCode::NOT_FOUND.into_response(),
            Self::Render(msg) | Self::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
