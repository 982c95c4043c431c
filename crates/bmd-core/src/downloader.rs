//! Batch download stage: dispatches each resolved item to a strategy.
//!
//! Audio items request best-audio extraction to MP3. Video items request
//! the preferred MP4 profile and, only on a format-unavailable failure,
//! retry exactly once with the relaxed best-effort selector. Items run
//! with bounded concurrency; one item's failure never cancels siblings.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::error::FetchError;
use crate::fetch::{ContentFetch, FetchRequest, FormatProfile};
use crate::resolver::ResolvedItem;
use crate::worklist::MediaKind;

/// Quality knobs threaded from the config into the fetch profiles.
#[derive(Debug, Clone, Copy)]
pub struct DownloadProfiles {
    pub audio_bitrate_kbps: u32,
    pub video_height_cap: u32,
}

/// Downloads one resolved item into `dest_dir`, returning the path the
/// fetch collaborator produced.
pub async fn download_one(
    fetch: &dyn ContentFetch,
    item: &ResolvedItem,
    dest_dir: &Path,
    profiles: DownloadProfiles,
) -> Result<PathBuf, FetchError> {
    match item.kind {
        MediaKind::Audio => {
            let request = FetchRequest::new(
                &item.url,
                dest_dir,
                FormatProfile::AudioMp3 {
                    bitrate_kbps: profiles.audio_bitrate_kbps,
                },
            );
            fetch.fetch(&request).await
        }
        MediaKind::Video => {
            let preferred = FetchRequest::new(
                &item.url,
                dest_dir,
                FormatProfile::VideoMp4 {
                    height_cap: profiles.video_height_cap,
                },
            );
            match fetch.fetch(&preferred).await {
                Err(FetchError::FormatUnavailable) => {
                    tracing::debug!(
                        url = %item.url,
                        "preferred format unavailable, retrying with best-effort profile"
                    );
                    let relaxed = FetchRequest::new(&item.url, dest_dir, FormatProfile::BestEffort);
                    fetch.fetch(&relaxed).await
                }
                other => other,
            }
        }
    }
}

/// Downloads all items with bounded concurrency and partitions the outcome.
///
/// Output order follows completion order, not input order.
pub async fn download_all(
    fetch: Arc<dyn ContentFetch>,
    items: Vec<ResolvedItem>,
    dest_dir: &Path,
    profiles: DownloadProfiles,
    max_concurrent: usize,
) -> (Vec<PathBuf>, Vec<(ResolvedItem, FetchError)>) {
    let max_concurrent = max_concurrent.max(1);
    let mut files = Vec::new();
    let mut failed = Vec::new();
    let mut queue = items.into_iter();
    let mut join_set = JoinSet::new();

    loop {
        while join_set.len() < max_concurrent {
            let Some(item) = queue.next() else {
                break;
            };
            let fetch = Arc::clone(&fetch);
            let dest_dir = dest_dir.to_path_buf();
            join_set.spawn(async move {
                let outcome = download_one(fetch.as_ref(), &item, &dest_dir, profiles).await;
                (item, outcome)
            });
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let Ok((item, outcome)) = res else {
            tracing::error!("download task panicked; item lost");
            continue;
        };
        match outcome {
            Ok(path) => {
                tracing::info!(query = %item.query, file = %path.display(), "downloaded");
                files.push(path);
            }
            Err(e) => {
                tracing::warn!(query = %item.query, url = %item.url, error = %e, "download failed, dropping item");
                failed.push((item, e));
            }
        }
    }

    (files, failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Fetch stub: records every request; per-URL scripted outcomes.
    struct StubFetch {
        calls: Mutex<Vec<FetchRequest>>,
        /// URLs whose first video fetch reports the format as unavailable.
        format_unavailable_once: Vec<String>,
        /// URLs that always fail outright.
        broken: Vec<String>,
    }

    impl StubFetch {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                format_unavailable_once: Vec::new(),
                broken: Vec::new(),
            }
        }

        fn calls_for(&self, url: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.url == url)
                .count()
        }
    }

    #[async_trait]
    impl ContentFetch for StubFetch {
        async fn fetch(&self, request: &FetchRequest) -> Result<PathBuf, FetchError> {
            let prior = self.calls_for(&request.url);
            self.calls.lock().unwrap().push(request.clone());

            if self.broken.iter().any(|u| u == &request.url) {
                return Err(FetchError::Tool("network down".to_string()));
            }
            if prior == 0
                && matches!(request.profile, FormatProfile::VideoMp4 { .. })
                && self.format_unavailable_once.iter().any(|u| u == &request.url)
            {
                return Err(FetchError::FormatUnavailable);
            }
            let ext = match request.profile {
                FormatProfile::AudioMp3 { .. } => "mp3",
                _ => "mp4",
            };
            Ok(request.dest_dir.join(format!("stub.{ext}")))
        }
    }

    fn resolved(kind: MediaKind, query: &str, url: &str) -> ResolvedItem {
        ResolvedItem {
            kind,
            query: query.to_string(),
            url: url.to_string(),
        }
    }

    const PROFILES: DownloadProfiles = DownloadProfiles {
        audio_bitrate_kbps: 192,
        video_height_cap: 1080,
    };

    #[tokio::test]
    async fn audio_strategy_is_single_shot() {
        let stub = StubFetch::new();
        let item = resolved(MediaKind::Audio, "song", "https://x/a");
        let path = download_one(&stub, &item, Path::new("/tmp/dl"), PROFILES)
            .await
            .unwrap();
        assert_eq!(path, Path::new("/tmp/dl/stub.mp3"));
        assert_eq!(stub.calls_for("https://x/a"), 1);
        let calls = stub.calls.lock().unwrap();
        assert_eq!(
            calls[0].profile,
            FormatProfile::AudioMp3 { bitrate_kbps: 192 }
        );
    }

    #[tokio::test]
    async fn video_falls_back_exactly_once_on_format_unavailable() {
        let mut stub = StubFetch::new();
        stub.format_unavailable_once.push("https://x/v".to_string());
        let item = resolved(MediaKind::Video, "clip", "https://x/v");

        let path = download_one(&stub, &item, Path::new("/tmp/dl"), PROFILES)
            .await
            .unwrap();
        assert_eq!(path, Path::new("/tmp/dl/stub.mp4"));
        assert_eq!(stub.calls_for("https://x/v"), 2);
        let calls = stub.calls.lock().unwrap();
        assert!(matches!(
            calls[0].profile,
            FormatProfile::VideoMp4 { height_cap: 1080 }
        ));
        assert_eq!(calls[1].profile, FormatProfile::BestEffort);
    }

    #[tokio::test]
    async fn video_generic_failure_is_not_retried() {
        let mut stub = StubFetch::new();
        stub.broken.push("https://x/v".to_string());
        let item = resolved(MediaKind::Video, "clip", "https://x/v");

        let err = download_one(&stub, &item, Path::new("/tmp/dl"), PROFILES)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Tool(_)));
        assert_eq!(stub.calls_for("https://x/v"), 1);
    }

    #[tokio::test]
    async fn one_broken_item_does_not_sink_the_batch() {
        let mut stub = StubFetch::new();
        stub.broken.push("https://x/bad".to_string());
        let fetch: Arc<dyn ContentFetch> = Arc::new(stub);

        let items = vec![
            resolved(MediaKind::Audio, "good", "https://x/good"),
            resolved(MediaKind::Audio, "bad", "https://x/bad"),
            resolved(MediaKind::Video, "also good", "https://x/good2"),
        ];
        let (files, failed) =
            download_all(fetch, items, Path::new("/tmp/dl"), PROFILES, 2).await;

        assert_eq!(files.len(), 2);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0.query, "bad");
    }

    #[tokio::test]
    async fn output_never_exceeds_input() {
        let fetch: Arc<dyn ContentFetch> = Arc::new(StubFetch::new());
        let items: Vec<ResolvedItem> = (0..5)
            .map(|i| resolved(MediaKind::Audio, &format!("q{i}"), &format!("https://x/{i}")))
            .collect();
        let (files, failed) =
            download_all(fetch, items, Path::new("/tmp/dl"), PROFILES, 3).await;
        assert_eq!(files.len() + failed.len(), 5);
        assert!(files.len() <= 5);
    }
}
