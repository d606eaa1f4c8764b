//! In-memory catalog store with linear cosine-scan retrieval.
//!
//! The store is read-only after construction and shared across queries via
//! `Arc`. A linear scan is the small-catalog fallback of the `CatalogStore`
//! contract; larger deployments swap in an index-backed implementation
//! behind the same trait.

use anyhow::{bail, Result};
use rfqmatch_core::traits::CatalogStore;
use rfqmatch_core::types::{CatalogEntry, RetrievedCandidate};
use std::sync::Arc;
use tracing::warn;

pub struct InMemoryCatalog {
    entries: Vec<Arc<CatalogEntry>>,
    dim: usize,
}

impl InMemoryCatalog {
    pub fn new(dim: usize) -> Self {
        Self {
            entries: Vec::new(),
            dim,
        }
    }

    pub fn from_entries(dim: usize, entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut catalog = Self::new(dim);
        for entry in entries {
            catalog.insert(entry)?;
        }
        Ok(catalog)
    }

    /// Insert an entry, rejecting dimension mismatches up front so the scan
    /// path only has to guard against degenerate (zero/non-finite) vectors.
    pub fn insert(&mut self, entry: CatalogEntry) -> Result<()> {
        if entry.embedding.len() != self.dim {
            bail!(
                "entry {} embedding has dimension {}, catalog expects {}",
                entry.id,
                entry.embedding.len(),
                self.dim
            );
        }
        self.entries.push(Arc::new(entry));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CatalogStore for InMemoryCatalog {
    fn dim(&self) -> usize {
        self.dim
    }

    fn retrieve(
        &self,
        query_embedding: &[f32],
        region_filter: Option<&str>,
        limit: usize,
    ) -> Result<Vec<RetrievedCandidate>> {
        if self.entries.is_empty() || query_embedding.len() != self.dim {
            return Ok(Vec::new());
        }
        let query_norm = l2_norm(query_embedding);
        if query_norm == 0.0 || !query_norm.is_finite() {
            return Ok(Vec::new());
        }

        let mut skipped = 0_usize;
        let mut candidates = Vec::new();
        for entry in &self.entries {
            if let Some(region) = region_filter {
                if entry.origin_region != region {
                    continue;
                }
            }
            match cosine_distance(query_embedding, query_norm, &entry.embedding) {
                Some(distance) => candidates.push(RetrievedCandidate {
                    entry: Arc::clone(entry),
                    distance,
                }),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!(skipped, "excluded catalog entries with unusable embeddings");
        }

        // Strict deterministic order: distance ascending, entry id breaks ties.
        candidates.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.entry.id.cmp(&b.entry.id))
        });
        candidates.truncate(limit);
        Ok(candidates)
    }
}

/// `1 - cosine_similarity`, or `None` when the entry vector is unusable
/// (wrong dimension, zero norm, or non-finite content).
fn cosine_distance(query: &[f32], query_norm: f32, entry: &[f32]) -> Option<f32> {
    if entry.len() != query.len() {
        return None;
    }
    let mut dot = 0.0_f32;
    let mut norm_sq = 0.0_f32;
    for (q, e) in query.iter().zip(entry) {
        dot += q * e;
        norm_sq += e * e;
    }
    let entry_norm = norm_sq.sqrt();
    if entry_norm == 0.0 || !entry_norm.is_finite() || !dot.is_finite() {
        return None;
    }
    Some(1.0 - dot / (query_norm * entry_norm))
}

fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}
