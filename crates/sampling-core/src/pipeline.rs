//! The sampling pipeline: filter, bin, weigh, draw.
//!
//! Rows flow strictly left to right and are never re-added once dropped:
//!
//! 1. **Hard filter** drops clips shorter than the duration floor.
//! 2. **Quality gate** drops the bottom aesthetic quantile per
//!    brightness bucket.
//! 3. **Binner** derives the three trajectory bins.
//! 4. **Weight engine** composes the final per-row weight.
//! 5. **Draw** picks N distinct rows, probability proportional to
//!    weight.

use clipsift_clip_model::ClipRecord;
use clipsift_common::{ClipsiftError, ClipsiftResult};
use serde::{Deserialize, Serialize};

use crate::binning::MotionBins;
use crate::gate::{aesthetic_mask, duration_mask};
use crate::sampler::draw_weighted;
use crate::weighting::{compute_weights, WeightParams};

/// Configuration for one sampling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Number of clips to draw.
    pub sample_size: usize,

    /// Seed for the weighted draw.
    pub seed: u64,

    /// Bottom aesthetic quantile dropped in the Bright bucket.
    pub aesthetic_q_bright: f64,

    /// Bottom aesthetic quantile dropped in non-Bright buckets.
    pub aesthetic_q_dark: f64,

    /// Minimum clip duration in seconds.
    pub min_duration_secs: f64,

    /// Weight-engine tunables.
    pub weights: WeightParams,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sample_size: 1000,
            seed: 42,
            aesthetic_q_bright: 0.05,
            aesthetic_q_dark: 0.02,
            min_duration_secs: 3.0,
            weights: WeightParams::default(),
        }
    }
}

/// The filtered, binned, and weighted candidate set.
#[derive(Debug, Clone)]
pub struct PreparedPool {
    /// Surviving rows, in input order.
    pub records: Vec<ClipRecord>,

    /// Trajectory bins, parallel to `records`.
    pub bins: Vec<MotionBins>,

    /// Final weights, parallel to `records`.
    pub weights: Vec<f64>,
}

impl PreparedPool {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The sampling planner.
pub struct SamplePlanner {
    config: SamplerConfig,
}

impl SamplePlanner {
    /// Create a planner with the given configuration.
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    /// Create a planner with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SamplerConfig::default())
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Filter, bin, and weigh the candidate set. Everything up to (but
    /// not including) the draw; dry runs stop here.
    pub fn prepare(&self, records: Vec<ClipRecord>) -> ClipsiftResult<PreparedPool> {
        let total = records.len();

        let keep = duration_mask(&records, self.config.min_duration_secs);
        let records: Vec<ClipRecord> = records
            .into_iter()
            .zip(&keep)
            .filter_map(|(r, &kept)| kept.then_some(r))
            .collect();
        tracing::debug!(
            kept = records.len(),
            dropped = total - records.len(),
            "duration filter"
        );

        let before_gate = records.len();
        let keep = aesthetic_mask(
            &records,
            self.config.aesthetic_q_bright,
            self.config.aesthetic_q_dark,
        );
        let records: Vec<ClipRecord> = records
            .into_iter()
            .zip(&keep)
            .filter_map(|(r, &kept)| kept.then_some(r))
            .collect();
        tracing::debug!(
            kept = records.len(),
            dropped = before_gate - records.len(),
            "aesthetic gate"
        );

        if records.is_empty() {
            return Err(ClipsiftError::empty_candidates("filtering"));
        }

        warn_non_finite(&records);
        let bins: Vec<MotionBins> = records.iter().map(MotionBins::for_record).collect();
        let weights = compute_weights(&records, &bins, &self.config.weights);

        Ok(PreparedPool {
            records,
            bins,
            weights,
        })
    }

    /// Draw `min(sample_size, pool.len())` distinct row indices from a
    /// prepared pool, in draw order.
    pub fn draw(&self, pool: &PreparedPool) -> ClipsiftResult<Vec<usize>> {
        draw_weighted(&pool.weights, self.config.sample_size, self.config.seed)
    }
}

/// Report rows whose motion features will fall back to the lowest bin.
fn warn_non_finite(records: &[ClipRecord]) {
    let count = |field: fn(&ClipRecord) -> f64, name: &str| {
        let n = records.iter().filter(|r| !field(r).is_finite()).count();
        if n > 0 {
            tracing::warn!(rows = n, feature = name, "non-finite values mapped to the lowest bin");
        }
    };
    count(|r| r.move_dist, "moveDist");
    count(|r| r.rot_angle, "rotAngle");
    count(|r| r.traj_turns, "trajTurns");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::records_from_rows;

    fn pool_rows(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| {
                format!(
                    "c{i},videos/group_0001/c{i}.mp4,ann/c{i},150,30,\
                     {move_dist},1.0,1,4.0,2,{aesthetic},Bright,Day,Sunny,Urban,pan",
                    move_dist = (i % 10) as f64,
                    aesthetic = 3.0 + (i % 5) as f64,
                )
            })
            .collect()
    }

    fn prepare(planner: &SamplePlanner, rows: &[String]) -> ClipsiftResult<PreparedPool> {
        let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        planner.prepare(records_from_rows(&row_refs))
    }

    #[test]
    fn short_rows_never_reach_the_pool() {
        let mut rows = pool_rows(20);
        // 30 frames @ 30fps = 1s.
        rows.push("short,v,a,30,30,1,1,1,4.0,2,5.0,Bright,Day,Sunny,Urban,pan".to_string());

        let pool = prepare(&SamplePlanner::with_defaults(), &rows).unwrap();
        assert_eq!(pool.len(), 20);
        assert!(pool.records.iter().all(|r| r.duration_secs >= 3.0));
        assert!(pool.records.iter().all(|r| r.id != "short"));
    }

    #[test]
    fn all_rows_filtered_is_a_distinct_error() {
        let rows = vec!["c,v,a,30,30,1,1,1,4.0,2,5.0,Bright,Day,Sunny,Urban,pan".to_string()];
        let err = prepare(&SamplePlanner::with_defaults(), &rows).unwrap_err();
        assert!(matches!(err, ClipsiftError::EmptyCandidates { .. }));
    }

    #[test]
    fn weights_stay_inside_the_final_clamp() {
        let pool = prepare(&SamplePlanner::with_defaults(), &pool_rows(200)).unwrap();
        assert!(pool
            .weights
            .iter()
            .all(|&w| (0.05..=20.0).contains(&w)));
    }

    #[test]
    fn draw_is_deterministic_and_bounded() {
        let planner = SamplePlanner::new(SamplerConfig {
            sample_size: 8,
            ..Default::default()
        });
        let pool = prepare(&planner, &pool_rows(50)).unwrap();

        let first = planner.draw(&pool).unwrap();
        let second = planner.draw(&pool).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
        assert!(first.iter().all(|&i| i < pool.len()));
    }

    #[test]
    fn overdraw_returns_the_whole_pool() {
        let planner = SamplePlanner::new(SamplerConfig {
            sample_size: 10_000,
            ..Default::default()
        });
        let pool = prepare(&planner, &pool_rows(25)).unwrap();
        let picked = planner.draw(&pool).unwrap();
        assert_eq!(picked.len(), 25);
    }
}
