//! Error types for the fact store.
//!
//! Lookups fail in exactly one way: the requested language or fact cannot
//! be resolved to a valid document. The underlying I/O or parse cause is
//! logged where it happens and is not carried by [`StoreError`]; its
//! message is returned to HTTP clients as is. Listing the store root is the
//! one operation with a second failure mode, [`StoreError::RootUnavailable`].

use std::path::PathBuf;

/// Errors returned by the fact store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The language or fact could not be resolved to a readable, valid
    /// document.
    ///
    /// `short` is `None` when the failure concerns the language as a whole
    /// (missing, empty, or unreadable directory).
    #[error("{}", not_found_message(.language, .short.as_deref()))]
    NotFound {
        /// The requested language code.
        language: String,
        /// The requested fact identifier, if any.
        short: Option<String>,
    },

    /// The store root directory itself could not be listed.
    #[error("fact store root {} is unreadable", .0.display())]
    RootUnavailable(PathBuf),
}

impl StoreError {
    /// A language-level lookup failure.
    pub fn language(language: &str) -> Self {
        Self::NotFound {
            language: language.to_owned(),
            short: None,
        }
    }

    /// A lookup failure for a specific fact.
    pub fn fact(language: &str, short: &str) -> Self {
        Self::NotFound {
            language: language.to_owned(),
            short: Some(short.to_owned()),
        }
    }

    /// Whether this error means "nothing to serve" for a lookup.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn not_found_message(language: &str, short: Option<&str>) -> String {
    match short {
        Some(short) => format!("fact '{short}' not found for language '{language}'"),
        None => format!("no facts available for language '{language}'"),
    }
}
