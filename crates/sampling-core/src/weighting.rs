//! The weight engine.
//!
//! Three independent weight families are computed per surviving clip:
//!
//! 1. **Dynamics:** inverse-frequency weights over the three motion
//!    bins, steering the draw toward rare trajectory shapes.
//! 2. **Semantic:** inverse-frequency weights over the five categorical
//!    annotations, steering toward rare scene semantics.
//! 3. **Quality:** penalties for jittery footage, distortion level 0,
//!    and below-average aesthetics.
//!
//! Each family is the elementwise product of its members and is then
//! mean-renormalized so its average weight is 1.0; a family of five
//! multiplied terms would otherwise drown out a family of three. The
//! final weight is the clamped product of the three families.

use std::collections::HashMap;

use clipsift_clip_model::ClipRecord;
use serde::{Deserialize, Serialize};

use crate::binning::MotionBins;
use crate::stats::{mean, std_dev};

/// Category used for rows with a missing categorical annotation.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Parameters of one inverse-frequency axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FreqWeightParams {
    /// Flattening strength: 1.0 is pure inverse frequency, lower is
    /// gentler and keeps more of the raw distribution.
    pub alpha: f64,
    pub clamp_lo: f64,
    pub clamp_hi: f64,
}

impl FreqWeightParams {
    pub const fn new(alpha: f64, clamp_lo: f64, clamp_hi: f64) -> Self {
        Self {
            alpha,
            clamp_lo,
            clamp_hi,
        }
    }
}

/// All tunables of the weight engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightParams {
    pub move_bin: FreqWeightParams,
    pub rot_bin: FreqWeightParams,
    pub turn_bin: FreqWeightParams,

    pub brightness: FreqWeightParams,
    pub time_of_day: FreqWeightParams,
    pub weather: FreqWeightParams,
    pub scene_type: FreqWeightParams,
    pub motion_tags: FreqWeightParams,

    /// Motion score above this is treated as excessive jitter.
    pub motion_score_cutoff: f64,

    /// Weight applied to jittery clips.
    pub motion_score_penalty: f64,

    /// Clamp range for the aesthetic z-score weight.
    pub aesthetic_clamp: (f64, f64),

    /// Clamp range for the final composed weight.
    pub final_clamp: (f64, f64),
}

impl Default for WeightParams {
    fn default() -> Self {
        Self {
            move_bin: FreqWeightParams::new(0.8, 0.5, 3.0),
            rot_bin: FreqWeightParams::new(0.8, 0.5, 3.0),
            turn_bin: FreqWeightParams::new(0.8, 0.5, 3.0),
            brightness: FreqWeightParams::new(0.6, 0.5, 2.5),
            time_of_day: FreqWeightParams::new(0.6, 0.5, 2.5),
            weather: FreqWeightParams::new(0.6, 0.5, 3.0),
            scene_type: FreqWeightParams::new(0.7, 0.3, 3.5),
            motion_tags: FreqWeightParams::new(0.5, 0.5, 3.0),
            motion_score_cutoff: 8.8,
            motion_score_penalty: 0.7,
            aesthetic_clamp: (0.5, 1.5),
            final_clamp: (0.05, 20.0),
        }
    }
}

/// Inverse-frequency weights for a categorical series: `1 / count^alpha`
/// per distinct value, clamped.
pub fn inverse_freq_weights<S: AsRef<str>>(labels: &[S], params: &FreqWeightParams) -> Vec<f64> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label.as_ref()).or_insert(0) += 1;
    }

    labels
        .iter()
        .map(|label| {
            let count = counts[label.as_ref()] as f64;
            (1.0 / count.powf(params.alpha)).clamp(params.clamp_lo, params.clamp_hi)
        })
        .collect()
}

/// Jitter penalty: 1.0 up to the cutoff, `penalty` above it.
pub fn motion_score_weights(scores: &[f64], cutoff: f64, penalty: f64) -> Vec<f64> {
    scores
        .iter()
        .map(|&s| if s > cutoff { penalty } else { 1.0 })
        .collect()
}

/// Distortion penalty: level 0 is down-weighted, everything else
/// (including unmapped levels) is neutral.
pub fn dist_level_weights(levels: &[i64]) -> Vec<f64> {
    levels
        .iter()
        .map(|&level| if level == 0 { 0.8 } else { 1.0 })
        .collect()
}

/// Aesthetic weight: `1 + 0.5 * z` against the surviving population,
/// clamped. Degenerate variance yields uniform 1.0.
pub fn aesthetic_weights(scores: &[f64], clamp: (f64, f64)) -> Vec<f64> {
    let mu = mean(scores);
    let sigma = std_dev(scores);
    if !(sigma > 1e-6) {
        return vec![1.0; scores.len()];
    }
    scores
        .iter()
        .map(|&s| (1.0 + 0.5 * (s - mu) / sigma).clamp(clamp.0, clamp.1))
        .collect()
}

/// Divide a weight series by its own mean so it averages 1.0. A
/// near-zero mean leaves the series unchanged.
pub fn mean_normalize(weights: &mut [f64]) {
    let mu = mean(weights);
    if mu <= 1e-9 || !mu.is_finite() {
        return;
    }
    for w in weights.iter_mut() {
        *w /= mu;
    }
}

fn product_of(mut factors: Vec<Vec<f64>>) -> Vec<f64> {
    let mut acc = factors.pop().expect("at least one factor series");
    for series in factors {
        for (a, b) in acc.iter_mut().zip(series) {
            *a *= b;
        }
    }
    acc
}

fn semantic_labels<'a>(
    records: &'a [ClipRecord],
    field: impl Fn(&'a ClipRecord) -> &'a Option<String>,
) -> Vec<&'a str> {
    records
        .iter()
        .map(|r| field(r).as_deref().unwrap_or(UNKNOWN_CATEGORY))
        .collect()
}

/// Compose the final per-row weights for the surviving set.
pub fn compute_weights(
    records: &[ClipRecord],
    bins: &[MotionBins],
    params: &WeightParams,
) -> Vec<f64> {
    debug_assert_eq!(records.len(), bins.len());

    let move_labels: Vec<&str> = bins.iter().map(|b| b.move_bin.as_str()).collect();
    let rot_labels: Vec<&str> = bins.iter().map(|b| b.rot_bin.as_str()).collect();
    let turn_labels: Vec<&str> = bins.iter().map(|b| b.turn_bin.as_str()).collect();

    let mut dynamics = product_of(vec![
        inverse_freq_weights(&move_labels, &params.move_bin),
        inverse_freq_weights(&rot_labels, &params.rot_bin),
        inverse_freq_weights(&turn_labels, &params.turn_bin),
    ]);
    mean_normalize(&mut dynamics);

    let mut semantic = product_of(vec![
        inverse_freq_weights(&semantic_labels(records, |r| &r.brightness), &params.brightness),
        inverse_freq_weights(&semantic_labels(records, |r| &r.time_of_day), &params.time_of_day),
        inverse_freq_weights(&semantic_labels(records, |r| &r.weather), &params.weather),
        inverse_freq_weights(&semantic_labels(records, |r| &r.scene_type), &params.scene_type),
        inverse_freq_weights(&semantic_labels(records, |r| &r.motion_tags), &params.motion_tags),
    ]);
    mean_normalize(&mut semantic);

    let motion_scores: Vec<f64> = records.iter().map(|r| r.motion_score).collect();
    let dist_levels: Vec<i64> = records.iter().map(|r| r.dist_level).collect();
    let aesthetic_scores: Vec<f64> = records.iter().map(|r| r.aesthetic_score).collect();

    let mut quality = product_of(vec![
        motion_score_weights(
            &motion_scores,
            params.motion_score_cutoff,
            params.motion_score_penalty,
        ),
        dist_level_weights(&dist_levels),
        aesthetic_weights(&aesthetic_scores, params.aesthetic_clamp),
    ]);
    mean_normalize(&mut quality);

    dynamics
        .iter()
        .zip(&semantic)
        .zip(&quality)
        .map(|((d, s), q)| (d * s * q).clamp(params.final_clamp.0, params.final_clamp.1))
        .collect()
}
