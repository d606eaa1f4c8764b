//! Domain types shared by the retrieval and matching crates.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Stable catalog entry identifier. Ascending id is the deterministic
/// tie-break key everywhere scores or distances compare equal.
pub type EntryId = u64;

/// One requested line item, as produced by an upstream parser.
///
/// - `description`: free-text item description (required, non-empty)
/// - `identifier`: structured part number, if the request carried one
/// - `region`: restricts matching to entries with this origin region
///
/// Immutable for the duration of one match call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryItem {
    pub description: String,
    pub identifier: Option<String>,
    pub region: Option<String>,
}

impl QueryItem {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            identifier: None,
            region: None,
        }
    }
}

/// A supplier catalog entry. Owned by the catalog store; the engine only
/// ever reads it through a shared reference.
///
/// Invariant: `embedding` has the catalog's fixed dimensionality. An entry
/// violating it is skipped during retrieval, never silently scored as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: EntryId,
    pub name: String,
    pub identifier: Option<String>,
    pub supplier_name: String,
    pub supplier_contact: String,
    pub origin_region: String,
    pub embedding: Vec<f32>,
}

/// Retrieval output: an entry plus its cosine distance to the query
/// embedding. The distance is reused for scoring, never recomputed.
#[derive(Debug, Clone)]
pub struct RetrievedCandidate {
    pub entry: Arc<CatalogEntry>,
    pub distance: f32,
}

/// A fully scored candidate. Exists only inside one match call; the ranked
/// list handed to the caller is the last thing that holds them.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub entry: Arc<CatalogEntry>,
    /// `1 - cosine_distance`, clamped to [0, 1].
    pub vector_similarity: f32,
    /// Fuzzy identifier similarity in [0, 1].
    pub lexical_similarity: f32,
    /// `vector_weight * vector_similarity + lexical_weight * lexical_similarity`.
    pub hybrid_score: f32,
}
