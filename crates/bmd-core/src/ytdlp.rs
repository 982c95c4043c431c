//! yt-dlp backed collaborators: content search and content fetch.
//!
//! Both shell out to the `yt-dlp` binary. Nothing else in the crate
//! knows which tool performs the real search and download work.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{FetchError, IndexError};
use crate::fetch::{ContentFetch, FetchRequest, FormatProfile};
use crate::index::{ContentIndex, IndexHit};

/// Marker yt-dlp prints when a format selector has no matching stream.
const FORMAT_UNAVAILABLE_MARKER: &str = "Requested format is not available";

/// Picks the most useful single line out of a failed tool's stderr.
fn first_error_line(stderr: &str) -> String {
    stderr
        .lines()
        .find(|l| l.contains("ERROR"))
        .or_else(|| stderr.lines().find(|l| !l.trim().is_empty()))
        .unwrap_or("tool failed with no diagnostics")
        .trim()
        .to_string()
}

/// Content index backed by `yt-dlp ytsearchN:` (no download performed).
pub struct YtDlpIndex {
    binary: PathBuf,
}

impl YtDlpIndex {
    /// Locates `yt-dlp` on PATH.
    pub fn discover() -> Result<Self, IndexError> {
        let binary =
            which::which("yt-dlp").map_err(|e| IndexError::ToolMissing(e.to_string()))?;
        Ok(Self { binary })
    }

    pub fn with_binary(binary: PathBuf) -> Self {
        Self { binary }
    }
}

#[async_trait]
impl ContentIndex for YtDlpIndex {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<IndexHit>, IndexError> {
        let search_term = format!("ytsearch{}:{}", limit.max(1), query);
        let output = Command::new(&self.binary)
            .arg(search_term)
            .args(["--simulate", "--flat-playlist", "--no-warnings"])
            .args(["--print", "%(url)s\t%(title)s"])
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(IndexError::Tool(first_error_line(&stderr)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut hits = Vec::new();
        for line in stdout.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (url, title) = match line.split_once('\t') {
                Some((u, t)) => (u.trim(), Some(t.trim())),
                None => (line, None),
            };
            if url::Url::parse(url).is_err() {
                tracing::debug!(hit = %url, "discarding non-URL search hit");
                continue;
            }
            hits.push(IndexHit {
                url: url.to_string(),
                title: title.filter(|t| !t.is_empty()).map(str::to_string),
            });
        }
        Ok(hits)
    }
}

/// Content fetch backed by the `yt-dlp` binary.
pub struct YtDlpFetch {
    binary: PathBuf,
    socket_timeout_secs: u64,
}

impl YtDlpFetch {
    /// Locates `yt-dlp` on PATH.
    pub fn discover(socket_timeout_secs: u64) -> Result<Self, FetchError> {
        let binary =
            which::which("yt-dlp").map_err(|e| FetchError::ToolMissing(e.to_string()))?;
        Ok(Self {
            binary,
            socket_timeout_secs,
        })
    }

    pub fn with_binary(binary: PathBuf, socket_timeout_secs: u64) -> Self {
        Self {
            binary,
            socket_timeout_secs,
        }
    }

    /// Maps a format profile to the yt-dlp selector arguments.
    fn format_args(profile: FormatProfile) -> Vec<String> {
        match profile {
            FormatProfile::AudioMp3 { bitrate_kbps } => vec![
                "-f".into(),
                "bestaudio/best".into(),
                "-x".into(),
                "--audio-format".into(),
                "mp3".into(),
                "--audio-quality".into(),
                format!("{}K", bitrate_kbps),
            ],
            FormatProfile::VideoMp4 { height_cap } => vec![
                "-f".into(),
                "bv*[ext=mp4][vcodec^=avc1]+ba[ext=m4a]/best[ext=mp4]/best".into(),
                "-S".into(),
                format!("res:{},ext:mp4", height_cap),
                "--merge-output-format".into(),
                "mp4".into(),
            ],
            FormatProfile::BestEffort => {
                vec!["-f".into(), "bestvideo+bestaudio/best".into()]
            }
        }
    }
}

#[async_trait]
impl ContentFetch for YtDlpFetch {
    async fn fetch(&self, request: &FetchRequest) -> Result<PathBuf, FetchError> {
        let outtmpl = request.dest_dir.join("%(title)s.%(ext)s");
        let output = Command::new(&self.binary)
            .args(Self::format_args(request.profile))
            .args(["--no-progress", "--quiet", "--no-warnings"])
            .arg("--socket-timeout")
            .arg(self.socket_timeout_secs.to_string())
            .arg("-o")
            .arg(&outtmpl)
            .args(["--no-simulate", "--print", "after_move:filepath"])
            .arg(&request.url)
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains(FORMAT_UNAVAILABLE_MARKER) {
                return Err(FetchError::FormatUnavailable);
            }
            return Err(FetchError::Tool(first_error_line(&stderr)));
        }

        // yt-dlp prints one filepath per requested download; the merged or
        // post-processed file is the last one.
        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(PathBuf::from)
            .ok_or(FetchError::MissingOutput)
    }
}
