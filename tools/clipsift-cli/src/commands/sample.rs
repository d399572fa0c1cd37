//! Draw a balanced weighted sample from a metadata table.

use std::fmt::Display;
use std::path::PathBuf;

use clipsift_clip_model::{ClipRecord, ClipTable};
use clipsift_common::AppConfig;
use clipsift_sampling_core::report::proportions;
use clipsift_sampling_core::{SamplePlanner, SamplerConfig};

pub fn run(
    metadata: PathBuf,
    output: PathBuf,
    num: Option<usize>,
    seed: Option<u64>,
    aesthetic_q_bright: Option<f64>,
    aesthetic_q_dark: Option<f64>,
    dry_run: bool,
) -> anyhow::Result<()> {
    // Flag > config file > built-in default.
    let defaults = AppConfig::load().sampling;
    let config = SamplerConfig {
        sample_size: num.unwrap_or(defaults.num),
        seed: seed.unwrap_or(defaults.seed),
        aesthetic_q_bright: aesthetic_q_bright.unwrap_or(defaults.aesthetic_q_bright),
        aesthetic_q_dark: aesthetic_q_dark.unwrap_or(defaults.aesthetic_q_dark),
        min_duration_secs: defaults.min_duration_secs,
        ..Default::default()
    };

    println!("Sampling from: {}", metadata.display());

    let mut table =
        ClipTable::load(&metadata).map_err(|e| anyhow::anyhow!("Failed to load metadata: {e}"))?;
    println!("  Loaded {} rows", table.len());

    let records = std::mem::take(&mut table.records);
    let planner = SamplePlanner::new(config);
    let pool = planner.prepare(records)?;

    report_bin("move_bin", pool.bins.iter().map(|b| b.move_bin));
    report_bin("rot_bin", pool.bins.iter().map(|b| b.rot_bin));
    report_bin("turn_bin", pool.bins.iter().map(|b| b.turn_bin));

    println!("\nTotal candidates after filtering: {}", pool.len());
    println!("Sampling size: {}", planner.config().sample_size);

    if dry_run {
        println!("Dry-run mode: no sampling performed.");
        return Ok(());
    }

    let picked = planner.draw(&pool)?;
    let picks: Vec<(ClipRecord, f64)> = picked
        .iter()
        .map(|&i| (pool.records[i].clone(), pool.weights[i]))
        .collect();

    table
        .write_sampled(&output, &picks)
        .map_err(|e| anyhow::anyhow!("Failed to write manifest: {e}"))?;
    println!(
        "Saved sampled manifest to {} (rows: {})",
        output.display(),
        picks.len()
    );

    Ok(())
}

fn report_bin<B: Copy + Ord + Display>(name: &str, bins: impl IntoIterator<Item = B>) {
    println!("\n{name} distribution (proportion):");
    for (bin, share) in proportions(bins) {
        println!("  {bin}: {share:.4}");
    }
}
