//! Pipeline orchestration: parse, resolve, download, rename.
//!
//! Stages run strictly in sequence; each consumes only the previous
//! stage's successes. Per-item failures shrink the next stage's input and
//! never abort the run. Only work-list reading and download-directory
//! setup can.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::config::BmdConfig;
use crate::downloader::{self, DownloadProfiles};
use crate::fetch::ContentFetch;
use crate::index::ContentIndex;
use crate::rename;
use crate::resolver;
use crate::workdir;
use crate::worklist;

/// Items entering and items surviving one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCounts {
    pub entered: usize,
    pub succeeded: usize,
}

/// Per-stage counts for one completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub parsed: StageCounts,
    pub resolved: StageCounts,
    pub downloaded: StageCounts,
    pub renamed: StageCounts,
}

/// Runs the full pipeline over the work list at `list_path`.
///
/// Returns `Ok` with the per-stage counts whenever the run reaches its
/// terminal state, regardless of how many individual items failed along
/// the way. Returns `Err` only for setup failures (unreadable work list,
/// download directory that cannot be wiped/recreated).
pub async fn run_pipeline(
    index: Arc<dyn ContentIndex>,
    fetch: Arc<dyn ContentFetch>,
    list_path: &Path,
    download_dir: &Path,
    cfg: &BmdConfig,
) -> Result<RunSummary> {
    let jobs = cfg.max_concurrent_tasks;

    let list = worklist::read_work_list(list_path)?;
    let parsed = StageCounts {
        entered: list.items.len() + list.skipped,
        succeeded: list.items.len(),
    };
    tracing::info!(entries = parsed.succeeded, skipped = list.skipped, "work list parsed");

    workdir::reset(download_dir)
        .await
        .context("preparing download directory")?;

    let (resolved_items, resolve_failures) = resolver::resolve_all(index, list.items, jobs).await;
    let resolved = StageCounts {
        entered: parsed.succeeded,
        succeeded: resolved_items.len(),
    };
    if !resolve_failures.is_empty() {
        tracing::warn!(failed = resolve_failures.len(), "items dropped during resolution");
    }
    tracing::info!(resolved = resolved.succeeded, "resolution complete");

    let profiles = DownloadProfiles {
        audio_bitrate_kbps: cfg.audio_bitrate_kbps,
        video_height_cap: cfg.video_height_cap,
    };
    let (files, download_failures) =
        downloader::download_all(fetch, resolved_items, download_dir, profiles, jobs).await;
    let downloaded = StageCounts {
        entered: resolved.succeeded,
        succeeded: files.len(),
    };
    if !download_failures.is_empty() {
        tracing::warn!(failed = download_failures.len(), "items dropped during download");
    }
    tracing::info!(downloaded = downloaded.succeeded, "downloads complete");

    let (renamed_names, rename_failures) =
        rename::rename_all(download_dir, cfg.name_words, jobs).await;
    let renamed = StageCounts {
        entered: downloaded.succeeded,
        succeeded: renamed_names.len(),
    };
    if !rename_failures.is_empty() {
        tracing::warn!(failed = rename_failures.len(), "files left with their original names");
    }
    tracing::info!(renamed = renamed.succeeded, "rename pass complete");

    Ok(RunSummary {
        parsed,
        resolved,
        downloaded,
        renamed,
    })
}
