//! Candidate filters: the hard duration cut and the per-bucket
//! aesthetic quality gate.

use clipsift_clip_model::ClipRecord;

use crate::stats::quantile_linear;

/// Keep-mask for the hard duration filter.
///
/// A NaN duration compares false and is dropped.
pub fn duration_mask(records: &[ClipRecord], min_duration_secs: f64) -> Vec<bool> {
    records
        .iter()
        .map(|r| r.duration_secs >= min_duration_secs)
        .collect()
}

/// Whether a clip belongs to the Bright brightness bucket.
///
/// Case-insensitive substring match; missing brightness means Other.
pub fn is_bright(record: &ClipRecord) -> bool {
    record
        .brightness
        .as_deref()
        .unwrap_or("")
        .to_lowercase()
        .contains("bright")
}

/// Per-bucket aesthetic thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AestheticCutoffs {
    pub bright: f64,
    pub other: f64,
}

/// Compute the bottom-quantile aesthetic cutoffs for the Bright and
/// Other buckets. An empty bucket gets negative infinity, so it removes
/// nothing.
pub fn aesthetic_cutoffs(records: &[ClipRecord], q_bright: f64, q_dark: f64) -> AestheticCutoffs {
    let mut bright_scores = Vec::new();
    let mut other_scores = Vec::new();
    for record in records {
        if is_bright(record) {
            bright_scores.push(record.aesthetic_score);
        } else {
            other_scores.push(record.aesthetic_score);
        }
    }

    let cutoff = |scores: &[f64], q: f64| {
        if scores.is_empty() {
            f64::NEG_INFINITY
        } else {
            quantile_linear(scores, q)
        }
    };

    AestheticCutoffs {
        bright: cutoff(&bright_scores, q_bright),
        other: cutoff(&other_scores, q_dark),
    }
}

/// Keep-mask for the aesthetic gate: a row survives if its score is at
/// or above its own bucket's cutoff.
pub fn aesthetic_mask(records: &[ClipRecord], q_bright: f64, q_dark: f64) -> Vec<bool> {
    let cutoffs = aesthetic_cutoffs(records, q_bright, q_dark);
    records
        .iter()
        .map(|r| {
            let threshold = if is_bright(r) {
                cutoffs.bright
            } else {
                cutoffs.other
            };
            r.aesthetic_score >= threshold
        })
        .collect()
}
