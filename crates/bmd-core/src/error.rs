//! Error taxonomy for the pipeline stages.
//!
//! All of these are item-scoped: they are caught at their stage's
//! aggregation point, logged with the offending item, and never abort the
//! run. Only download-directory setup failures (plain `anyhow` errors in
//! the orchestrator) are fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Content-index collaborator failure.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The search tool could not be located on this system.
    #[error("search tool not found: {0}")]
    ToolMissing(String),
    /// The search tool ran but exited unsuccessfully.
    #[error("search failed: {0}")]
    Tool(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why a work item produced no resolved URL.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The index returned no hit for the query.
    #[error("no search hit")]
    NoHit,
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Content-fetch collaborator failure.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Distinguished "requested format unavailable" signal. The video
    /// strategy retries exactly once with a relaxed profile on this and
    /// only this variant.
    #[error("requested format is not available")]
    FormatUnavailable,
    /// The fetch tool could not be located on this system.
    #[error("fetch tool not found: {0}")]
    ToolMissing(String),
    /// The fetch tool ran but failed (network, extraction, transcode).
    #[error("fetch failed: {0}")]
    Tool(String),
    /// The tool reported success but printed no output path.
    #[error("no output path reported")]
    MissingOutput,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Filesystem rename failure. The original file is left untouched.
#[derive(Debug, Error)]
#[error("rename of {} failed: {source}", .path.display())]
pub struct RenameError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
