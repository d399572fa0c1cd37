//! Path-pair view of a sampled manifest.
//!
//! The fetch utility only needs the two archive-path columns, so its
//! loader is deliberately lighter than [`crate::ClipTable::load`] and
//! accepts manifests from other tooling as long as those columns exist.

use std::path::Path;

use clipsift_common::{ClipsiftError, ClipsiftResult};

/// One manifest row the fetch utility acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Archive-relative video file path.
    pub video_path: String,

    /// Archive-relative annotation directory, without a trailing slash.
    pub annotation_path: String,
}

/// A loaded sampled manifest.
#[derive(Debug, Clone)]
pub struct SampledManifest {
    pub entries: Vec<ManifestEntry>,
}

impl SampledManifest {
    /// Load a manifest CSV, requiring only `video path` and
    /// `annotation path`.
    pub fn load(path: &Path) -> ClipsiftResult<Self> {
        if !path.is_file() {
            return Err(ClipsiftError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let mut reader = csv::Reader::from_path(path)?;
        Self::from_reader(&mut reader)
    }

    /// Reader-generic body of [`Self::load`].
    pub fn from_reader<R: std::io::Read>(reader: &mut csv::Reader<R>) -> ClipsiftResult<Self> {
        let headers = reader.headers()?.clone();
        let find = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = ["video path", "annotation path"]
            .iter()
            .filter(|name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ClipsiftError::MissingColumns { columns: missing });
        }

        let video_idx = find("video path").expect("presence checked above");
        let ann_idx = find("annotation path").expect("presence checked above");

        let mut entries = Vec::new();
        for row in reader.records() {
            let row = row?;
            entries.push(ManifestEntry {
                video_path: row.get(video_idx).unwrap_or("").trim().to_string(),
                annotation_path: row
                    .get(ann_idx)
                    .unwrap_or("")
                    .trim()
                    .trim_end_matches('/')
                    .to_string(),
            });
        }

        Ok(Self { entries })
    }
}
