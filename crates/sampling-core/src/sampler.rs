//! The seeded weighted draw.
//!
//! One joint draw without replacement: each row's inclusion probability
//! is proportional to its final weight over the surviving set. Uses
//! exponential-key index sampling (`rand::seq::index::sample_weighted`)
//! rather than sequential draw-and-reweight.

use clipsift_common::{ClipsiftError, ClipsiftResult};
use rand::rngs::StdRng;
use rand::seq::index::sample_weighted;
use rand::SeedableRng;

/// Draw `min(target, weights.len())` distinct row indices.
///
/// Deterministic for a fixed seed. Errs on an empty candidate set.
pub fn draw_weighted(weights: &[f64], target: usize, seed: u64) -> ClipsiftResult<Vec<usize>> {
    if weights.is_empty() {
        return Err(ClipsiftError::empty_candidates("filtering"));
    }

    let amount = target.min(weights.len());
    let mut rng = StdRng::seed_from_u64(seed);
    let picked = sample_weighted(&mut rng, weights.len(), |i| weights[i], amount)
        .map_err(|e| ClipsiftError::sampling(format!("weighted draw failed: {e}")))?;

    Ok(picked.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn draws_exactly_the_requested_count_of_distinct_rows() {
        let weights = vec![1.0; 100];
        let picked = draw_weighted(&weights, 10, 7).unwrap();
        assert_eq!(picked.len(), 10);

        let distinct: HashSet<usize> = picked.iter().copied().collect();
        assert_eq!(distinct.len(), 10);
        assert!(picked.iter().all(|&i| i < 100));
    }

    #[test]
    fn overdraw_returns_every_row() {
        let weights = vec![0.5, 1.5, 2.5];
        let picked = draw_weighted(&weights, 10, 7).unwrap();
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    #[test]
    fn identical_seed_means_identical_draw() {
        let weights: Vec<f64> = (1..=50).map(|i| i as f64 / 10.0).collect();
        let first = draw_weighted(&weights, 20, 42).unwrap();
        let second = draw_weighted(&weights, 20, 42).unwrap();
        assert_eq!(first, second);

        let other_seed = draw_weighted(&weights, 20, 43).unwrap();
        assert_ne!(first, other_seed);
    }

    #[test]
    fn empty_candidate_set_is_an_error() {
        let err = draw_weighted(&[], 10, 42).unwrap_err();
        assert!(matches!(err, ClipsiftError::EmptyCandidates { .. }));
    }

    #[test]
    fn heavier_rows_are_picked_more_often() {
        // One row carries half the total mass; across many seeds it must
        // appear in nearly every small draw.
        let mut weights = vec![0.1; 99];
        weights.push(9.9);

        let hits = (0..200u64)
            .filter(|&seed| draw_weighted(&weights, 5, seed).unwrap().contains(&99))
            .count();
        assert!(hits > 150, "heavy row picked only {hits}/200 times");
    }
}
