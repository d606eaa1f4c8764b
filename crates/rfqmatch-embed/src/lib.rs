//! Embedding providers that work without model weights.
//!
//! Real deployments plug a model-backed `EmbeddingProvider` in at the
//! composition root; this crate supplies the deterministic stand-in used by
//! tests and offline demos.

use async_trait::async_trait;
use rfqmatch_core::traits::EmbeddingProvider;
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

/// Deterministic token-hashing embedder.
///
/// Each lowercase whitespace token is hashed into one dimension of a
/// fixed-size vector, then the vector is L2-normalized. Identical texts
/// always produce identical vectors, which is the property the match
/// pipeline's determinism tests rely on. Not semantically meaningful.
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        assert!(dim > 0, "embedding dimension must be positive");
        Self { dim }
    }

    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0_f32; self.dim];
        for (i, token) in text.to_lowercase().split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            // Small positional term so token order perturbs the vector.
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        v
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    async fn encode(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        Ok(self.embed(text))
    }
}
