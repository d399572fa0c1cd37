//! Distribution diagnostics for the prepared candidate pool.

use std::collections::BTreeMap;

/// Proportion of rows per bin, in sorted bin order.
pub fn proportions<B: Copy + Ord>(bins: impl IntoIterator<Item = B>) -> Vec<(B, f64)> {
    let mut counts: BTreeMap<B, usize> = BTreeMap::new();
    let mut total = 0usize;
    for bin in bins {
        *counts.entry(bin).or_insert(0) += 1;
        total += 1;
    }

    counts
        .into_iter()
        .map(|(bin, count)| (bin, count as f64 / total as f64))
        .collect()
}
