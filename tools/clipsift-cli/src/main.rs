//! clipsift CLI — Command-line interface for sampling, fetching, and
//! inspecting annotated clip corpora.
//!
//! Usage:
//!   clipsift sample <METADATA> [OPTIONS]   Draw a balanced weighted sample
//!   clipsift fetch <MANIFEST> [OPTIONS]    Download archives for a manifest
//!   clipsift inspect <METADATA>            Show metadata table information

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "clipsift",
    about = "Balanced weighted sampling for annotated video-clip corpora",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a balanced weighted sample from a metadata table
    Sample {
        /// Path to the metadata CSV
        metadata: PathBuf,

        /// Output CSV (sampled rows with weights)
        #[arg(short, long, default_value = "sampled_manifest.csv")]
        output: PathBuf,

        /// Number of samples to draw
        #[arg(short = 'n', long)]
        num: Option<usize>,

        /// Random seed for the weighted draw
        #[arg(long)]
        seed: Option<u64>,

        /// Bottom aesthetic quantile to drop in the Bright bucket
        #[arg(long)]
        aesthetic_q_bright: Option<f64>,

        /// Bottom aesthetic quantile to drop in non-Bright buckets
        #[arg(long)]
        aesthetic_q_dark: Option<f64>,

        /// Only report stats; skip the draw and the write
        #[arg(long)]
        dry_run: bool,
    },

    /// Download and selectively extract the archives a sampled manifest names
    Fetch {
        /// Path to the manifest CSV (needs 'video path' and 'annotation path')
        manifest: PathBuf,

        /// Number of manifest rows to fetch (after optional shuffle)
        #[arg(short = 'n', long, default_value = "30000")]
        num: usize,

        /// Shuffle the manifest before taking the first N rows
        #[arg(long)]
        shuffle: bool,

        /// Dataset repository base URL
        #[arg(
            long,
            default_value = "https://huggingface.co/datasets/SpatialVID/SpatialVID-HQ/resolve/main"
        )]
        repo_url: String,

        /// Local directory for downloads and extractions
        #[arg(long)]
        local_dir: Option<PathBuf>,
    },

    /// Show metadata table information
    Inspect {
        /// Path to the metadata CSV
        metadata: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    clipsift_common::logging::init_logging(&clipsift_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Sample {
            metadata,
            output,
            num,
            seed,
            aesthetic_q_bright,
            aesthetic_q_dark,
            dry_run,
        } => commands::sample::run(
            metadata,
            output,
            num,
            seed,
            aesthetic_q_bright,
            aesthetic_q_dark,
            dry_run,
        ),
        Commands::Fetch {
            manifest,
            num,
            shuffle,
            repo_url,
            local_dir,
        } => commands::fetch::run(manifest, num, shuffle, repo_url, local_dir).await,
        Commands::Inspect { metadata } => commands::inspect::run(metadata),
    }
}
