//! `bmd run` – the full resolve/download/rename pipeline.

use anyhow::Result;
use bmd_core::config::BmdConfig;
use bmd_core::pipeline::{self, RunSummary};
use bmd_core::ytdlp::{YtDlpFetch, YtDlpIndex};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

pub async fn run_batch(cfg: &BmdConfig, list: &Path, download_dir: &Path) -> Result<()> {
    let index = Arc::new(YtDlpIndex::discover()?);
    let fetch = Arc::new(YtDlpFetch::discover(cfg.socket_timeout_secs)?);

    let started = Instant::now();
    let summary = pipeline::run_pipeline(index, fetch, list, download_dir, cfg).await?;
    print_summary(&summary);
    println!("Run finished in {:.2}s", started.elapsed().as_secs_f64());

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "Parsed     {} of {} work-list lines",
        summary.parsed.succeeded, summary.parsed.entered
    );
    println!(
        "Resolved   {} of {} items",
        summary.resolved.succeeded, summary.resolved.entered
    );
    println!(
        "Downloaded {} of {} items",
        summary.downloaded.succeeded, summary.downloaded.entered
    );
    println!(
        "Renamed    {} of {} files",
        summary.renamed.succeeded, summary.renamed.entered
    );
}
