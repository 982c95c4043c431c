//! `bmd rename` – collision-safe shortening pass over a directory.

use anyhow::Result;
use bmd_core::config::BmdConfig;
use bmd_core::rename;
use std::path::Path;

pub async fn run_rename(cfg: &BmdConfig, dir: &Path) -> Result<()> {
    let (renamed, failed) =
        rename::rename_all(dir, cfg.name_words, cfg.max_concurrent_tasks).await;

    for name in &renamed {
        println!("{name}");
    }
    if !failed.is_empty() {
        println!("{} file(s) could not be renamed", failed.len());
    }
    tracing::info!(renamed = renamed.len(), failed = failed.len(), "rename pass done");
    Ok(())
}
