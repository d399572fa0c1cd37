//! The metadata table: loading, column validation, and manifest writing.

use std::path::Path;

use clipsift_common::{ClipsiftError, ClipsiftResult};
use csv::StringRecord;

use crate::record::ClipRecord;

/// Required columns, in the order the corpus documents them.
pub const REQUIRED_COLUMNS: [&str; 16] = [
    "id",
    "video path",
    "annotation path",
    "num frames",
    "fps",
    "moveDist",
    "rotAngle",
    "trajTurns",
    "motion score",
    "distLevel",
    "aesthetic score",
    "brightness",
    "timeOfDay",
    "weather",
    "sceneType",
    "motionTags",
];

/// Header column added to the written manifest.
pub const WEIGHT_COLUMN: &str = "weight";

/// Positions of the required columns within the header row.
#[derive(Debug, Clone, Copy)]
pub struct ColumnIndex {
    pub id: usize,
    pub video_path: usize,
    pub annotation_path: usize,
    pub num_frames: usize,
    pub fps: usize,
    pub move_dist: usize,
    pub rot_angle: usize,
    pub traj_turns: usize,
    pub motion_score: usize,
    pub dist_level: usize,
    pub aesthetic_score: usize,
    pub brightness: usize,
    pub time_of_day: usize,
    pub weather: usize,
    pub scene_type: usize,
    pub motion_tags: usize,
}

impl ColumnIndex {
    /// Resolve required columns against a header row.
    ///
    /// Fails with [`ClipsiftError::MissingColumns`] naming every absent
    /// column, not just the first.
    pub fn from_headers(headers: &StringRecord) -> ClipsiftResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ClipsiftError::MissingColumns { columns: missing });
        }

        let require = |name: &str| find(name).expect("presence checked above");

        Ok(Self {
            id: require("id"),
            video_path: require("video path"),
            annotation_path: require("annotation path"),
            num_frames: require("num frames"),
            fps: require("fps"),
            move_dist: require("moveDist"),
            rot_angle: require("rotAngle"),
            traj_turns: require("trajTurns"),
            motion_score: require("motion score"),
            dist_level: require("distLevel"),
            aesthetic_score: require("aesthetic score"),
            brightness: require("brightness"),
            time_of_day: require("timeOfDay"),
            weather: require("weather"),
            scene_type: require("sceneType"),
            motion_tags: require("motionTags"),
        })
    }
}

/// The in-memory metadata table.
#[derive(Debug, Clone)]
pub struct ClipTable {
    headers: StringRecord,
    pub records: Vec<ClipRecord>,
}

impl ClipTable {
    /// Load and validate a metadata CSV.
    pub fn load(path: &Path) -> ClipsiftResult<Self> {
        if !path.is_file() {
            return Err(ClipsiftError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();
        Self::from_reader(&mut reader, headers)
    }

    /// Parse rows from an open CSV reader. Split out so tests can feed
    /// in-memory data.
    pub fn from_reader<R: std::io::Read>(
        reader: &mut csv::Reader<R>,
        headers: StringRecord,
    ) -> ClipsiftResult<Self> {
        let columns = ColumnIndex::from_headers(&headers)?;

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let raw = row?;
            // Header is line 1; data starts at line 2.
            records.push(ClipRecord::from_csv(raw, &columns, i as u64 + 2)?);
        }

        tracing::debug!(rows = records.len(), "loaded metadata table");
        Ok(Self { headers, records })
    }

    /// The header row as read.
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the sampled manifest: all original columns plus a trailing
    /// `weight` column, restricted to `picks`, in the given (draw) order.
    pub fn write_sampled(&self, path: &Path, picks: &[(ClipRecord, f64)]) -> ClipsiftResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        self.write_sampled_to(&mut writer, picks)
    }

    /// Writer-generic body of [`Self::write_sampled`].
    pub fn write_sampled_to<W: std::io::Write>(
        &self,
        writer: &mut csv::Writer<W>,
        picks: &[(ClipRecord, f64)],
    ) -> ClipsiftResult<()> {
        let mut header = self.headers.clone();
        header.push_field(WEIGHT_COLUMN);
        writer.write_record(&header)?;

        for (record, weight) in picks {
            let mut row = record.raw().clone();
            row.push_field(&weight.to_string());
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }
}
