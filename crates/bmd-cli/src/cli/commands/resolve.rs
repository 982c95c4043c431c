//! `bmd resolve` – resolve a work list to URLs without downloading.

use anyhow::Result;
use bmd_core::config::BmdConfig;
use bmd_core::resolver;
use bmd_core::worklist;
use bmd_core::ytdlp::YtDlpIndex;
use std::path::Path;
use std::sync::Arc;

pub async fn run_resolve(cfg: &BmdConfig, list: &Path) -> Result<()> {
    let work = worklist::read_work_list(list)?;
    println!("Found {} entries", work.items.len());

    let index = Arc::new(YtDlpIndex::discover()?);
    let (resolved, failed) =
        resolver::resolve_all(index, work.items, cfg.max_concurrent_tasks).await;

    for item in &resolved {
        println!("{} -> {}", item.query, item.url);
    }
    if !failed.is_empty() {
        println!("{} item(s) did not resolve", failed.len());
    }
    Ok(())
}
