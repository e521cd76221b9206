// ABOUTME: Terminology store - the collaborator holding wildfire term
// ABOUTME: definitions. Defines the TermStore trait and entry type.

mod memory;

pub use memory::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A single terminology record, matching the dashboard's `terms` documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermEntry {
    pub term: String,
    pub def: String,
}

/// Read-only access to wildfire terminology.
///
/// Lookup is a case-insensitive exact match on the term. A miss is a
/// normal outcome, not an error.
#[async_trait]
pub trait TermStore: Send + Sync {
    /// Find the definition for a term, if one is stored.
    async fn find_definition(&self, term: &str) -> Result<Option<String>, StoreError>;
}
