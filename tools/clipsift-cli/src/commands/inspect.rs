//! Show metadata table information.

use std::fmt::Display;
use std::path::PathBuf;

use clipsift_clip_model::ClipTable;
use clipsift_sampling_core::binning::MotionBins;
use clipsift_sampling_core::report::proportions;

pub fn run(metadata: PathBuf) -> anyhow::Result<()> {
    let table =
        ClipTable::load(&metadata).map_err(|e| anyhow::anyhow!("Failed to load metadata: {e}"))?;

    println!("Metadata: {}", metadata.display());
    println!("  Rows: {}", table.len());
    println!("  Columns: {}", table.headers().len());

    let durations: Vec<f64> = table
        .records
        .iter()
        .map(|r| r.duration_secs)
        .filter(|d| d.is_finite())
        .collect();
    if !durations.is_empty() {
        let min = durations.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = durations.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = durations.iter().sum::<f64>() / durations.len() as f64;
        println!("  Duration: {min:.2}s min / {mean:.2}s mean / {max:.2}s max");
    }

    let bins: Vec<MotionBins> = table.records.iter().map(MotionBins::for_record).collect();
    report_bin("move_bin", bins.iter().map(|b| b.move_bin));
    report_bin("rot_bin", bins.iter().map(|b| b.rot_bin));
    report_bin("turn_bin", bins.iter().map(|b| b.turn_bin));

    Ok(())
}

fn report_bin<B: Copy + Ord + Display>(name: &str, bins: impl IntoIterator<Item = B>) {
    println!("\n{name} distribution (proportion):");
    for (bin, share) in proportions(bins) {
        println!("  {bin}: {share:.4}");
    }
}
