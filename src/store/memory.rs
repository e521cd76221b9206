// ABOUTME: In-memory TermStore implementation keyed by lowercased term.
// ABOUTME: Seeded from entries or loaded from a JSON file of {term, def} records.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use super::{TermEntry, TermStore};
use crate::error::StoreError;

/// An in-memory terminology store.
///
/// Immutable after construction, so it is safe to share across concurrent
/// queries without synchronization.
#[derive(Debug, Default)]
pub struct InMemoryTermStore {
    terms: HashMap<String, String>,
}

impl InMemoryTermStore {
    /// Create a store from a list of entries.
    ///
    /// Terms are keyed lowercased; a later duplicate replaces an earlier one.
    pub fn new(entries: Vec<TermEntry>) -> Self {
        let terms = entries
            .into_iter()
            .map(|e| (e.term.to_lowercase(), e.def))
            .collect();
        Self { terms }
    }

    /// Load a store from a JSON file containing an array of {term, def} records.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data = std::fs::read_to_string(path)?;
        let entries: Vec<TermEntry> = serde_json::from_str(&data)?;
        Ok(Self::new(entries))
    }

    /// Number of stored terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the store holds no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[async_trait]
impl TermStore for InMemoryTermStore {
    async fn find_definition(&self, term: &str) -> Result<Option<String>, StoreError> {
        Ok(self.terms.get(&term.to_lowercase()).cloned())
    }
}
