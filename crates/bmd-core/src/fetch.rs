//! Content-fetch collaborator interface.
//!
//! Implementations perform the actual network fetch (and transcode, for
//! audio) and report the path of the produced file. Output naming is
//! owned by the implementation, derived from the content title.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::FetchError;

/// Format/quality directives for a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatProfile {
    /// Best available audio stream, transcoded to MP3 at the given bitrate.
    AudioMp3 { bitrate_kbps: u32 },
    /// Combined video+audio stream, MP4/AVC preferred, capped resolution.
    VideoMp4 { height_cap: u32 },
    /// Relaxed selector used after a format-unavailable failure.
    BestEffort,
}

/// One fetch request: where from, where to, and in what shape.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: String,
    pub dest_dir: PathBuf,
    pub profile: FormatProfile,
}

impl FetchRequest {
    pub fn new(
        url: impl Into<String>,
        dest_dir: impl Into<PathBuf>,
        profile: FormatProfile,
    ) -> Self {
        Self {
            url: url.into(),
            dest_dir: dest_dir.into(),
            profile,
        }
    }
}

/// External service that downloads one URL into a directory.
#[async_trait]
pub trait ContentFetch: Send + Sync {
    /// Fetches `request.url` into `request.dest_dir` according to
    /// `request.profile` and returns the path of the produced file.
    async fn fetch(&self, request: &FetchRequest) -> Result<PathBuf, FetchError>;
}
