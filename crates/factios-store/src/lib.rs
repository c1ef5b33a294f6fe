//! Fact store for the Factios service.
//!
//! Facts live on disk as one JSON document per fact, grouped in one
//! directory per language:
//!
//! ```text
//! db/
//!   en/
//!     abc123.json   {"fact": "Water boils at 100C"}
//!   ru/
//!     abc123.json
//! ```
//!
//! The document filename (minus `.json`) is the fact's short identifier.
//! The store never writes; facts are provisioned out of band.
//!
//! # Architecture
//!
//! - [`FactSource`] is the read-only lookup seam the HTTP layer depends on.
//! - [`JsonFactStore`] implements it over a directory tree.
//! - [`StoreError`] is the single failure kind surfaced to callers.

pub mod error;
pub mod fact;
pub mod key;
pub mod store;

// Re-export primary types for convenience.
pub use error::StoreError;
pub use fact::Fact;
pub use key::is_valid_key;
pub use store::{FactSource, JsonFactStore};
