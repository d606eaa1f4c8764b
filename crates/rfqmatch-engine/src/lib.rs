//! Hybrid matching engine facade.
//!
//! Orchestrates one match call: validate the query, embed the description
//! (with timeout and backoff), retrieve overfetched candidates by vector
//! proximity, score each candidate on both signals, fuse, rank.
//!
//! The engine is stateless per call and `Send + Sync`: many query tasks may
//! share one engine over one read-mostly catalog with no locking.

pub mod fuse;
pub mod rank;
pub mod retry;

use rfqmatch_core::config::MatchConfig;
use rfqmatch_core::error::{Error, Result};
use rfqmatch_core::traits::{CatalogStore, EmbeddingProvider};
use rfqmatch_core::types::{QueryItem, ScoredCandidate};
use rfqmatch_lexical::identifier_similarity;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::retry::BackoffPolicy;

/// Deployment-level engine tuning, loadable from the layered config.
/// Distinct from `MatchConfig`, which is caller policy supplied per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Per-attempt budget for one embedding call. Mandatory: no query may
    /// block indefinitely on the provider.
    pub embed_timeout_ms: u64,
    /// Retrieval fetches `top_k * overfetch_factor` candidates so that a
    /// vector-distant but lexically identical entry survives into fusion.
    pub overfetch_factor: usize,
    pub backoff: BackoffPolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            embed_timeout_ms: 5_000,
            overfetch_factor: 10,
            backoff: BackoffPolicy::default(),
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<()> {
        if self.embed_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "embed_timeout_ms must be at least 1".into(),
            ));
        }
        if self.overfetch_factor == 0 {
            return Err(Error::InvalidConfig(
                "overfetch_factor must be at least 1".into(),
            ));
        }
        if self.backoff.max_attempts == 0 {
            return Err(Error::InvalidConfig(
                "backoff.max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

pub struct MatchEngine {
    provider: Arc<dyn EmbeddingProvider>,
    catalog: Arc<dyn CatalogStore>,
    settings: EngineSettings,
}

impl MatchEngine {
    /// Build an engine around explicitly injected collaborators. The catalog
    /// handle is shared and immutable; ownership stays with the composition
    /// root, never a process-wide singleton.
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        catalog: Arc<dyn CatalogStore>,
        settings: EngineSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            provider,
            catalog,
            settings,
        })
    }

    /// Match one query item against the catalog and return the ranked
    /// candidates, best first.
    ///
    /// Fatal failures follow the taxonomy in `rfqmatch_core::Error`; an
    /// empty Vec is a legitimate "nothing cleared the threshold" outcome.
    /// The call mutates no shared state and is cancel-safe at the embedding
    /// await point.
    pub async fn match_item(
        &self,
        item: &QueryItem,
        config: &MatchConfig,
    ) -> Result<Vec<ScoredCandidate>> {
        config.validate()?;
        if item.description.trim().is_empty() {
            return Err(Error::InvalidQuery(
                "description must be non-empty".into(),
            ));
        }

        let embedding = self.embed_with_retry(&item.description).await?;

        let limit = config.top_k.saturating_mul(self.settings.overfetch_factor);
        let retrieved = self
            .catalog
            .retrieve(&embedding, item.region.as_deref(), limit)
            .map_err(|e| Error::RetrievalFailure(e.to_string()))?;
        debug!(
            candidates = retrieved.len(),
            region = item.region.as_deref().unwrap_or("*"),
            "retrieved candidates"
        );

        let mut scored = Vec::with_capacity(retrieved.len());
        for candidate in retrieved {
            // Distance is reused from retrieval, never recomputed.
            let vector_similarity = fuse::vector_similarity(candidate.distance);
            let lexical_similarity = identifier_similarity(
                item.identifier.as_deref(),
                candidate.entry.identifier.as_deref(),
                config.exact_match_bonus,
            );
            let hybrid_score = fuse::hybrid_score(
                vector_similarity,
                lexical_similarity,
                config.vector_weight,
                config.lexical_weight,
            );
            scored.push(ScoredCandidate {
                entry: candidate.entry,
                vector_similarity,
                lexical_similarity,
                hybrid_score,
            });
        }

        Ok(rank::rank(scored, config.similarity_threshold, config.top_k))
    }

    /// Embed with a per-attempt timeout and exponential backoff. A malformed
    /// embedding (wrong dimension, non-finite values) counts as a failed
    /// attempt; exhausting attempts aborts the call with
    /// `EmbeddingUnavailable`. There is no lexical-only fallback.
    async fn embed_with_retry(&self, text: &str) -> Result<Vec<f32>> {
        let timeout = Duration::from_millis(self.settings.embed_timeout_ms);
        let mut delays = self.settings.backoff.delays();
        let mut last_error = String::new();

        for attempt in 1..=self.settings.backoff.max_attempts {
            match tokio::time::timeout(timeout, self.provider.encode(text)).await {
                Ok(Ok(embedding)) => match validate_embedding(&embedding, self.catalog.dim()) {
                    Ok(()) => return Ok(embedding),
                    Err(reason) => last_error = reason,
                },
                Ok(Err(e)) => last_error = e.to_string(),
                Err(_) => {
                    last_error =
                        format!("timed out after {}ms", self.settings.embed_timeout_ms);
                }
            }
            warn!(attempt, error = %last_error, "embedding attempt failed");
            if let Some(delay) = delays.next() {
                tokio::time::sleep(delay).await;
            }
        }
        Err(Error::EmbeddingUnavailable(last_error))
    }
}

fn validate_embedding(embedding: &[f32], dim: usize) -> std::result::Result<(), String> {
    if embedding.len() != dim {
        return Err(format!(
            "provider returned dimension {}, catalog expects {}",
            embedding.len(),
            dim
        ));
    }
    if embedding.iter().any(|x| !x.is_finite()) {
        return Err("provider returned non-finite values".into());
    }
    Ok(())
}
