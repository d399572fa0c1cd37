//! One annotated clip row.
//!
//! A [`ClipRecord`] carries the typed fields the pipeline reads, plus the
//! raw CSV cells, so that identifying columns (and any extra columns the
//! corpus ships) survive the round trip to the sampled manifest unchanged.

use clipsift_common::{ClipsiftError, ClipsiftResult};
use csv::StringRecord;

use crate::table::ColumnIndex;

/// One clip from the metadata table.
#[derive(Debug, Clone)]
pub struct ClipRecord {
    /// Corpus-assigned clip id (opaque).
    pub id: String,

    /// Archive-relative video path (opaque, used for grouping by the
    /// fetch utility).
    pub video_path: String,

    /// Archive-relative annotation directory (opaque).
    pub annotation_path: String,

    /// Frame count of the clip.
    pub num_frames: u32,

    /// Frames per second.
    pub fps: f64,

    /// Camera translation magnitude over the trajectory.
    pub move_dist: f64,

    /// Camera rotation magnitude over the trajectory (radians).
    pub rot_angle: f64,

    /// Number of direction changes in the trajectory.
    pub traj_turns: f64,

    /// Jitter signal; higher means less stable footage.
    pub motion_score: f64,

    /// Ordinal 0-4 distortion flag.
    pub dist_level: i64,

    /// Aesthetic quality score.
    pub aesthetic_score: f64,

    /// Lighting bucket label, if annotated.
    pub brightness: Option<String>,

    /// Time-of-day label, if annotated.
    pub time_of_day: Option<String>,

    /// Weather label, if annotated.
    pub weather: Option<String>,

    /// Scene-type label, if annotated.
    pub scene_type: Option<String>,

    /// Subject-motion tags, if annotated.
    pub motion_tags: Option<String>,

    /// Derived: `num_frames / fps`. Whatever IEEE division yields; the
    /// hard filter judges the result.
    pub duration_secs: f64,

    /// The row exactly as read, for pass-through writing.
    pub(crate) raw: StringRecord,
}

impl ClipRecord {
    /// Parse a row against a validated column index.
    ///
    /// Motion-trajectory cells (`moveDist`, `rotAngle`, `trajTurns`) that
    /// are empty or unparsable become NaN and are resolved downstream by
    /// the binner's non-finite policy. Every other numeric cell is a hard
    /// parse error naming the row and column.
    pub fn from_csv(raw: StringRecord, columns: &ColumnIndex, row: u64) -> ClipsiftResult<Self> {
        let num_frames: u32 = parse_cell(&raw, columns.num_frames, "num frames", row)?;
        let fps: f64 = parse_cell(&raw, columns.fps, "fps", row)?;

        Ok(Self {
            id: cell(&raw, columns.id).to_string(),
            video_path: cell(&raw, columns.video_path).trim().to_string(),
            annotation_path: cell(&raw, columns.annotation_path).trim().to_string(),
            num_frames,
            fps,
            move_dist: parse_motion_cell(&raw, columns.move_dist),
            rot_angle: parse_motion_cell(&raw, columns.rot_angle),
            traj_turns: parse_motion_cell(&raw, columns.traj_turns),
            motion_score: parse_cell(&raw, columns.motion_score, "motion score", row)?,
            dist_level: parse_cell(&raw, columns.dist_level, "distLevel", row)?,
            aesthetic_score: parse_cell(&raw, columns.aesthetic_score, "aesthetic score", row)?,
            brightness: categorical_cell(&raw, columns.brightness),
            time_of_day: categorical_cell(&raw, columns.time_of_day),
            weather: categorical_cell(&raw, columns.weather),
            scene_type: categorical_cell(&raw, columns.scene_type),
            motion_tags: categorical_cell(&raw, columns.motion_tags),
            duration_secs: num_frames as f64 / fps,
            raw,
        })
    }

    /// The row exactly as read from the metadata table.
    pub fn raw(&self) -> &StringRecord {
        &self.raw
    }
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

fn categorical_cell(record: &StringRecord, idx: usize) -> Option<String> {
    let value = cell(record, idx).trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_cell<T: std::str::FromStr>(
    record: &StringRecord,
    idx: usize,
    name: &str,
    row: u64,
) -> ClipsiftResult<T> {
    let value = cell(record, idx).trim();
    value.parse().map_err(|_| {
        ClipsiftError::metadata(format!("row {row}: invalid {name} value {value:?}"))
    })
}

fn parse_motion_cell(record: &StringRecord, idx: usize) -> f64 {
    cell(record, idx).trim().parse().unwrap_or(f64::NAN)
}
