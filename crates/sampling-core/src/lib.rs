//! clipsift Sampling Core — the balanced sampling engine
//!
//! Turns an annotated clip table into a curated sample:
//! - **Gate:** hard duration filter and per-brightness-bucket aesthetic
//!   quantile cutoffs
//! - **Binning:** ordinal trajectory bins for the motion features
//! - **Weighting:** inverse-frequency diversity weights and quality
//!   penalties, composed per family with mean renormalization
//! - **Sampler:** one seeded weighted draw without replacement
//!
//! This crate is pure computation — no I/O, no transport dependencies.
//! All inputs are data; all outputs are data.

pub mod binning;
pub mod gate;
pub mod pipeline;
pub mod report;
pub mod sampler;
pub mod stats;
pub mod weighting;

pub use binning::{MagnitudeBin, MotionBins, TurnBin};
pub use pipeline::{PreparedPool, SamplePlanner, SamplerConfig};
pub use weighting::WeightParams;

#[cfg(test)]
pub(crate) mod test_support {
    use clipsift_clip_model::{ClipRecord, ClipTable};

    const HEADER: &str = "id,video path,annotation path,num frames,fps,moveDist,rotAngle,\
                          trajTurns,motion score,distLevel,aesthetic score,brightness,\
                          timeOfDay,weather,sceneType,motionTags";

    /// Build records from bare CSV data rows (the standard header is
    /// prepended).
    pub fn records_from_rows(rows: &[&str]) -> Vec<ClipRecord> {
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }

        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let headers = reader.headers().expect("test header parses").clone();
        ClipTable::from_reader(&mut reader, headers)
            .expect("test rows parse")
            .records
    }
}
