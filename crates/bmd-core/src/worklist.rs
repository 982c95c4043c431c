//! Work-list parsing: one requested title per line, tagged audio or video.

use anyhow::{Context, Result};
use std::path::Path;

/// Requested media kind for a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

/// One user-requested title. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub kind: MediaKind,
    pub query: String,
}

/// Parsed work list plus the number of lines that were skipped.
#[derive(Debug, Clone)]
pub struct WorkList {
    pub items: Vec<WorkItem>,
    pub skipped: usize,
}

/// Reads the work list at `path`.
///
/// Each line starts with a one-character kind marker (`a` = audio,
/// `v` = video) followed by the query text. Blank lines, lines with any
/// other leading character, and lines with an empty query are skipped
/// with a log line; none of them are fatal.
pub fn read_work_list(path: &Path) -> Result<WorkList> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading work list {}", path.display()))?;
    Ok(parse_work_list(&data))
}

/// Parses work-list text; see [`read_work_list`] for the line format.
pub fn parse_work_list(data: &str) -> WorkList {
    let mut items = Vec::new();
    let mut skipped = 0usize;
    for (idx, raw) in data.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            tracing::debug!(line = idx + 1, "skipping blank work-list line");
            continue;
        }
        match parse_line(line) {
            Some(item) => items.push(item),
            None => {
                skipped += 1;
                tracing::warn!(line = idx + 1, "skipping unrecognized work-list line");
            }
        }
    }
    WorkList { items, skipped }
}

fn parse_line(line: &str) -> Option<WorkItem> {
    let mut chars = line.chars();
    let kind = match chars.next()? {
        'a' => MediaKind::Audio,
        'v' => MediaKind::Video,
        _ => return None,
    };
    let query = chars.as_str().trim();
    if query.is_empty() {
        return None;
    }
    Some(WorkItem {
        kind,
        query: query.to_string(),
    })
}
