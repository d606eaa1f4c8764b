use rfqmatch_core::types::{CatalogEntry, ScoredCandidate};
use rfqmatch_engine::rank::rank;
use std::sync::Arc;

fn candidate(id: u64, hybrid_score: f32) -> ScoredCandidate {
    ScoredCandidate {
        entry: Arc::new(CatalogEntry {
            id,
            name: format!("entry-{id}"),
            identifier: None,
            supplier_name: "Supplier".to_string(),
            supplier_contact: "supplier@example.com".to_string(),
            origin_region: "US".to_string(),
            embedding: vec![1.0, 0.0],
        }),
        vector_similarity: hybrid_score,
        lexical_similarity: 0.0,
        hybrid_score,
    }
}

#[test]
fn sorts_descending_by_score() {
    let ranked = rank(
        vec![candidate(1, 0.2), candidate(2, 0.9), candidate(3, 0.5)],
        0.0,
        10,
    );
    let ids: Vec<u64> = ranked.iter().map(|c| c.entry.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn exact_ties_break_by_ascending_id() {
    let ranked = rank(
        vec![candidate(8, 0.7), candidate(2, 0.7), candidate(5, 0.7)],
        0.0,
        10,
    );
    let ids: Vec<u64> = ranked.iter().map(|c| c.entry.id).collect();
    assert_eq!(ids, vec![2, 5, 8]);
}

#[test]
fn score_equal_to_threshold_is_kept() {
    let ranked = rank(vec![candidate(1, 0.6)], 0.6, 10);
    assert_eq!(ranked.len(), 1);
}

#[test]
fn score_below_threshold_is_dropped() {
    let ranked = rank(vec![candidate(1, 0.59999)], 0.6, 10);
    assert!(ranked.is_empty());
}

#[test]
fn truncates_to_top_k() {
    let candidates = (1..=20).map(|id| candidate(id, 1.0 / id as f32)).collect();
    let ranked = rank(candidates, 0.0, 3);
    let ids: Vec<u64> = ranked.iter().map(|c| c.entry.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(rank(Vec::new(), 0.6, 5).is_empty());
}

#[test]
fn nothing_clears_threshold_yields_empty_not_error() {
    let ranked = rank(vec![candidate(1, 0.4), candidate(2, 0.5)], 0.99, 5);
    assert!(ranked.is_empty());
}
