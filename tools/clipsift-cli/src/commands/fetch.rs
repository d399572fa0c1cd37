//! Download and selectively extract the archives a sampled manifest names.
//!
//! Clips are packed in per-group `.tar.gz` archives on the dataset
//! repository. Rather than pull whole archives apart, only the members
//! the manifest actually references are extracted: video files by exact
//! path, annotation directories by prefix.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use clipsift_clip_model::{ManifestEntry, SampledManifest};
use clipsift_common::{AppConfig, ClipsiftError};
use flate2::read::GzDecoder;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// Seed for the optional manifest shuffle, so repeated fetches agree on
/// which rows "the first N" are.
const SHUFFLE_SEED: u64 = 42;

/// Archive members needed from one group.
#[derive(Debug, Default)]
struct GroupPlan {
    videos: BTreeSet<String>,
    annotation_prefixes: BTreeSet<String>,
}

pub async fn run(
    manifest: PathBuf,
    num: usize,
    shuffle: bool,
    repo_url: String,
    local_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let local_dir = local_dir.unwrap_or_else(|| AppConfig::load().data_dir);

    let loaded = SampledManifest::load(&manifest)
        .map_err(|e| anyhow::anyhow!("Failed to load manifest: {e}"))?;
    let mut entries = loaded.entries;
    println!("Loaded manifest with {} rows", entries.len());

    if shuffle {
        let mut rng = StdRng::seed_from_u64(SHUFFLE_SEED);
        entries.shuffle(&mut rng);
    }
    entries.truncate(num);

    let groups = plan_groups(&entries)?;

    println!("Tarballs to fetch:");
    for gid in groups.keys() {
        println!("  - videos/{gid}.tar.gz");
        println!("  - annotations/{gid}.tar.gz");
    }

    std::fs::create_dir_all(&local_dir)?;
    let client = reqwest::Client::new();

    for (gid, plan) in &groups {
        for archive in [
            format!("videos/{gid}.tar.gz"),
            format!("annotations/{gid}.tar.gz"),
        ] {
            let target = local_dir.join(&archive);
            download_archive(&client, &repo_url, &archive, &target).await?;
            extract_selected(&target, plan, &local_dir)?;
        }
    }

    println!("\nDownload and selective extraction done.");
    Ok(())
}

/// Group manifest rows by archive group id.
///
/// The group id is the second segment of the video path and must start
/// with `group_`; rows that don't match are skipped.
fn plan_groups(entries: &[ManifestEntry]) -> anyhow::Result<BTreeMap<String, GroupPlan>> {
    let mut groups: BTreeMap<String, GroupPlan> = BTreeMap::new();

    for entry in entries {
        let gid = match entry.video_path.split('/').nth(1) {
            Some(segment) if segment.starts_with("group_") => segment.to_string(),
            _ => continue,
        };

        let plan = groups.entry(gid).or_default();
        if !entry.video_path.is_empty() {
            plan.videos.insert(entry.video_path.clone());
        }
        if !entry.annotation_path.is_empty() {
            plan.annotation_prefixes
                .insert(format!("{}/", entry.annotation_path));
        }
    }

    if groups.is_empty() {
        anyhow::bail!("No group ids parsed from manifest; check paths.");
    }
    Ok(groups)
}

/// Download one archive unless it is already present.
async fn download_archive(
    client: &reqwest::Client,
    base_url: &str,
    archive: &str,
    target: &Path,
) -> anyhow::Result<()> {
    if target.is_file() {
        info!(path = %target.display(), "archive already present; skipping download");
        return Ok(());
    }
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let url = format!("{}/{}", base_url.trim_end_matches('/'), archive);
    info!(%url, "downloading");

    let mut response = client
        .get(url.as_str())
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ClipsiftError::fetch(format!("failed to fetch {url}: {e}")))?;

    // Write to a partial file first so an interrupted download is never
    // mistaken for a complete archive on the next run.
    let partial = target.with_extension("gz.partial");
    let mut file = tokio::fs::File::create(&partial).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    tokio::fs::rename(&partial, target).await?;

    Ok(())
}

/// Extract only the members the plan names: videos by exact path,
/// annotations by directory prefix.
fn extract_selected(tar_path: &Path, plan: &GroupPlan, dest: &Path) -> anyhow::Result<()> {
    if !tar_path.is_file() {
        warn!(path = %tar_path.display(), "tarball not found; skipping");
        return Ok(());
    }

    let file = std::fs::File::open(tar_path)?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));

    let mut extracted = 0usize;
    for entry in archive.entries()? {
        let mut entry = entry?;
        let member = entry.path()?.to_string_lossy().into_owned();

        let wanted = plan.videos.contains(&member)
            || plan
                .annotation_prefixes
                .iter()
                .any(|prefix| member.starts_with(prefix.as_str()));
        if !wanted {
            continue;
        }

        entry.unpack_in(dest)?;
        extracted += 1;
    }

    if extracted == 0 {
        warn!(path = %tar_path.display(), "no matching members");
    } else {
        info!(count = extracted, path = %tar_path.display(), "extracted members");
    }
    Ok(())
}
