//! Name dictionary seam.
//!
//! The engine never owns the color-name dictionary or its fuzzy matching;
//! it consumes the two lookups below. [`StaticNameService`] is an
//! in-process backend over a fixed word list so hosts and tests can run
//! without a dictionary service.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NameServiceError {
    #[error("name service backend failure: {0}")]
    Backend(String),

    #[error("dictionary returned candidate {0:?} but cannot resolve it")]
    MissingEntry(String),
}

/// A dictionary hit: the hex code and the canonical spelling of the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch {
    pub code: String,
    pub canonical: String,
}

/// Exact and approximate color-name lookup.
#[async_trait]
pub trait NameService: Send + Sync {
    /// Exact, case-insensitive name match.
    async fn find_exact(&self, name: &str) -> Result<Option<NameMatch>, NameServiceError>;

    /// Approximate candidates for a name the exact lookup missed.
    ///
    /// May return zero, one, or many canonical names; the matching
    /// algorithm is the backend's business.
    async fn disambiguate(&self, name: &str) -> Result<Vec<String>, NameServiceError>;
}

/// Fixed in-memory dictionary.
///
/// Exact lookup compares case-insensitively; `disambiguate` returns every
/// canonical name containing the query as a case-insensitive substring, in
/// dictionary order.
#[derive(Debug, Default)]
pub struct StaticNameService {
    entries: Vec<NameMatch>,
}

impl StaticNameService {
    /// Build a dictionary from `(canonical name, hex code)` pairs.
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        let entries = pairs
            .iter()
            .map(|(name, code)| NameMatch {
                code: (*code).to_string(),
                canonical: (*name).to_string(),
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl NameService for StaticNameService {
    async fn find_exact(&self, name: &str) -> Result<Option<NameMatch>, NameServiceError> {
        Ok(self
            .entries
            .iter()
            .find(|entry| entry.canonical.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn disambiguate(&self, name: &str) -> Result<Vec<String>, NameServiceError> {
        let needle = name.to_lowercase();
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.canonical.to_lowercase().contains(&needle))
            .map(|entry| entry.canonical.clone())
            .collect())
    }
}
