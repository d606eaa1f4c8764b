//! Score fusion: cosine distance to vector similarity, weighted hybrid score.

/// Convert a cosine distance into a similarity clamped to [0, 1].
///
/// Cosine similarity can drift slightly outside [-1, 1] under floating-point
/// error, so the `1 - distance` transform is clamped again; negative
/// similarity carries no meaning for this ranking.
pub fn vector_similarity(distance: f32) -> f32 {
    (1.0 - distance).clamp(0.0, 1.0)
}

/// Weighted sum of the two signals. Weights are independent multipliers and
/// are not normalized here; `MatchConfig` validation happens once at
/// construction, never per candidate.
pub fn hybrid_score(
    vector_similarity: f32,
    lexical_similarity: f32,
    vector_weight: f32,
    lexical_weight: f32,
) -> f32 {
    vector_weight * vector_similarity + lexical_weight * lexical_similarity
}
