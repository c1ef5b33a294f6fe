//! Directory-backed fact store.
//!
//! [`JsonFactStore`] resolves `(language, short)` to
//! `<root>/<language>/<short>.json`. It holds nothing but the root path, so
//! one instance is shared by every request handler.
//!
//! Random selection enumerates the language directory into a sorted list of
//! identifiers and draws one index from a random generator. The generator is
//! seeded fresh for each call; callers that need reproducible picks use
//! [`JsonFactStore::random_fact_with`] and pass their own seeded generator.

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::fact::{Fact, FactDocument};
use crate::key::is_valid_key;

/// Extension of stored fact documents.
pub const DOCUMENT_EXTENSION: &str = "json";

/// Read-only lookup over a collection of facts.
///
/// The HTTP layer depends on this trait rather than on a concrete store.
pub trait FactSource: Send + Sync {
    /// Pick one fact of `language` uniformly at random.
    fn random_fact(&self, language: &str) -> Result<Fact, StoreError>;

    /// Load the fact identified by `short` in `language`.
    fn fact_by_id(&self, language: &str, short: &str) -> Result<Fact, StoreError>;

    /// All fact identifiers of `language`, sorted.
    fn identifiers(&self, language: &str) -> Result<Vec<String>, StoreError>;

    /// All language codes present in the store, sorted.
    fn languages(&self) -> Result<Vec<String>, StoreError>;
}

/// Fact store reading JSON documents from a per-language directory tree.
#[derive(Debug, Clone)]
pub struct JsonFactStore {
    root: PathBuf,
}

impl JsonFactStore {
    /// Create a store rooted at `root`.
    ///
    /// The directory is not checked here; a missing root simply makes
    /// every lookup fail with [`StoreError::NotFound`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Pick a random fact of `language` using the supplied generator.
    ///
    /// The candidate sequence is the sorted identifier list, so the same
    /// generator state over the same tree always yields the same fact.
    pub fn random_fact_with<R: Rng>(
        &self,
        language: &str,
        rng: &mut R,
    ) -> Result<Fact, StoreError> {
        let shorts = self.identifiers(language)?;
        if shorts.is_empty() {
            warn!(language, "language directory holds no fact documents");
            return Err(StoreError::language(language));
        }

        let index = rng.random_range(0..shorts.len());
        let short = shorts
            .get(index)
            .ok_or_else(|| StoreError::language(language))?;
        debug!(language, short = %short, candidates = shorts.len(), "random fact selected");

        self.fact_by_id(language, short)
    }

    /// Path of the directory holding `language`, if the code is valid.
    fn language_dir(&self, language: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_key(language) {
            debug!(language, "rejected invalid language code");
            return Err(StoreError::language(language));
        }
        Ok(self.root.join(language))
    }
}

impl FactSource for JsonFactStore {
    fn random_fact(&self, language: &str) -> Result<Fact, StoreError> {
        let mut rng = SmallRng::from_rng(&mut rand::rng());
        self.random_fact_with(language, &mut rng)
    }

    fn fact_by_id(&self, language: &str, short: &str) -> Result<Fact, StoreError> {
        let dir = self.language_dir(language)?;
        if !is_valid_key(short) {
            debug!(language, short, "rejected invalid fact identifier");
            return Err(StoreError::fact(language, short));
        }

        let path = dir.join(format!("{short}.{DOCUMENT_EXTENSION}"));
        let raw = fs::read(&path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to read fact document");
            StoreError::fact(language, short)
        })?;

        let document: FactDocument = serde_json::from_slice(&raw).map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to parse fact document");
            StoreError::fact(language, short)
        })?;

        Ok(Fact::new(short, language, document.fact))
    }

    fn identifiers(&self, language: &str) -> Result<Vec<String>, StoreError> {
        let dir = self.language_dir(language)?;
        let entries = fs::read_dir(&dir).map_err(|e| {
            warn!(dir = %dir.display(), error = %e, "failed to list language directory");
            StoreError::language(language)
        })?;

        let mut shorts: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter_map(|path| document_short(&path))
            .collect();
        shorts.sort_unstable();

        Ok(shorts)
    }

    fn languages(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            warn!(root = %self.root.display(), error = %e, "failed to list store root");
            StoreError::RootUnavailable(self.root.clone())
        })?;

        let mut languages: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter_map(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .filter(|name| is_valid_key(name))
                    .map(str::to_owned)
            })
            .collect();
        languages.sort_unstable();

        Ok(languages)
    }
}

/// The identifier a document path stands for, if it is a fact document.
fn document_short(path: &Path) -> Option<String> {
    if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
        return None;
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| is_valid_key(stem))
        .map(str::to_owned)
}
