//! Threshold, order, truncate.

use rfqmatch_core::types::ScoredCandidate;

/// Filter candidates below `threshold` (strict: a score exactly equal to
/// the threshold is kept), sort by hybrid score descending with ascending
/// entry id breaking exact ties, and truncate to `top_k`.
///
/// An empty result is a legitimate outcome, not an error.
pub fn rank(
    mut candidates: Vec<ScoredCandidate>,
    threshold: f32,
    top_k: usize,
) -> Vec<ScoredCandidate> {
    // `>=` is false for NaN, so a NaN score can never survive ranking.
    candidates.retain(|c| c.hybrid_score >= threshold);
    candidates.sort_by(|a, b| {
        b.hybrid_score
            .total_cmp(&a.hybrid_score)
            .then_with(|| a.entry.id.cmp(&b.entry.id))
    });
    candidates.truncate(top_k);
    candidates
}
