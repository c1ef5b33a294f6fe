//! The [`Fact`] record and its on-disk document shape.

use serde::{Deserialize, Serialize};

/// A short stored text identified by a code and a language.
///
/// Serializes to the public JSON shape `{"Short": ..., "Fact": ...}`. The
/// language is implied by the request path and is not part of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    /// Identifier, unique within the language (the document file stem).
    #[serde(rename = "Short")]
    pub short: String,
    /// Language code (the document's parent directory name).
    #[serde(skip)]
    pub language: String,
    /// The fact content.
    #[serde(rename = "Fact")]
    pub text: String,
}

impl Fact {
    /// Build a fact from its parts.
    pub fn new(
        short: impl Into<String>,
        language: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            short: short.into(),
            language: language.into(),
            text: text.into(),
        }
    }
}

/// A stored fact document as written on disk.
///
/// Only the text is read from the file; the identifier and language come
/// from the path. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct FactDocument {
    /// The fact content.
    #[serde(alias = "Fact")]
    pub(crate) fact: String,
}
