use crate::types::RetrievedCandidate;
use async_trait::async_trait;

/// Maps text to a fixed-dimension vector. Potentially slow, potentially
/// failing; the engine wraps every call in a timeout and retries with
/// backoff. `dim` is fixed for the lifetime of one catalog.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    fn dim(&self) -> usize;
    async fn encode(&self, text: &str) -> anyhow::Result<Vec<f32>>;
}

/// Read-only view over the catalog answering approximate nearest-neighbor
/// queries, optionally restricted to one origin region.
///
/// Contract:
/// - at most `limit` candidates, ascending by `(cosine distance, entry id)`
/// - empty catalog or a query of the wrong dimension yields an empty Vec,
///   never an error
/// - an `Err` means the catalog itself is unreachable or corrupt, which is
///   distinct from a legitimate empty result
pub trait CatalogStore: Send + Sync {
    fn dim(&self) -> usize;
    fn retrieve(
        &self,
        query_embedding: &[f32],
        region_filter: Option<&str>,
        limit: usize,
    ) -> anyhow::Result<Vec<RetrievedCandidate>>;
}
