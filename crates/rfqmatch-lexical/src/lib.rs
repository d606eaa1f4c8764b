//! Fuzzy identifier similarity.
//!
//! Computes a Ratcliff/Obershelp sequence ratio over case-folded identifier
//! strings: twice the total length of the longest-common matching blocks,
//! divided by the summed lengths of both strings. No token-level heuristics,
//! no junk filtering. Deterministic so match output is reproducible.

use std::collections::HashMap;

/// Default flat bonus applied when both identifiers are equal after folding.
pub const DEFAULT_EXACT_MATCH_BONUS: f32 = 0.1;

/// Similarity in [0, 1] between two optional identifiers.
///
/// An absent or empty identifier on either side scores exactly 0.0: absence
/// is never a match. When both sides are equal after lowercase folding,
/// `exact_match_bonus` is added and the result clamped to 1.0.
///
/// Symmetric: `identifier_similarity(a, b, x) == identifier_similarity(b, a, x)`.
pub fn identifier_similarity(a: Option<&str>, b: Option<&str>, exact_match_bonus: f32) -> f32 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.0;
    };
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    // Canonicalize argument order: block decomposition ties could otherwise
    // resolve differently under swap, and score(a, b) must equal score(b, a).
    let ratio = if a <= b {
        sequence_ratio(&a, &b)
    } else {
        sequence_ratio(&b, &a)
    };
    if a == b {
        (ratio + exact_match_bonus).min(1.0)
    } else {
        ratio
    }
}

/// Raw sequence ratio `2 * M / (len(a) + len(b))` where `M` is the total
/// length of the longest-common matching blocks. Two empty strings are
/// defined to be identical (ratio 1.0).
pub fn sequence_ratio(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_total(&a, &b) as f32;
    2.0 * matched / total as f32
}

/// Total matched characters across all matching blocks: find the longest
/// common block, then recurse into the unmatched pieces on each side of it.
fn matching_total(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b2j.entry(ch).or_default().push(j);
    }

    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if size > 0 {
            total += size;
            pending.push((alo, i, blo, j));
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    total
}

/// Longest block `a[i..i+size] == b[j..j+size]` with `alo <= i < ahi` and
/// `blo <= j < bhi`. Among equally long blocks the earliest in `a`, then the
/// earliest in `b`, wins, which keeps the block decomposition stable.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best_i = alo;
    let mut best_j = blo;
    let mut best_size = 0;

    // lengths[j] = length of the longest common suffix of a[..=i] and b[..=j]
    let mut lengths: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut next_lengths: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let size = j
                    .checked_sub(1)
                    .and_then(|prev| lengths.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_lengths.insert(j, size);
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        lengths = next_lengths;
    }
    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_match_finds_middle_block() {
        let a: Vec<char> = "abxcd".chars().collect();
        let b: Vec<char> = "abcd".chars().collect();
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &ch) in b.iter().enumerate() {
            b2j.entry(ch).or_default().push(j);
        }
        let (i, j, size) = longest_match(&a, &b2j, 0, a.len(), 0, b.len());
        assert_eq!((i, j, size), (0, 0, 2), "leading 'ab' is the longest block");
    }

    #[test]
    fn matching_total_recurses_both_sides() {
        let a: Vec<char> = "abxcd".chars().collect();
        let b: Vec<char> = "abcd".chars().collect();
        assert_eq!(matching_total(&a, &b), 4, "'ab' + 'cd'");
    }
}
