//! Collision-safe shortening of downloaded file names.
//!
//! Each file's base name is cut down to the configured word count; the
//! extension is always preserved. When the shortened name is taken, a
//! numeric disambiguator is appended before the extension (`song_1.mp3`,
//! `song_2.mp3`, …) until a free name is found. The existence probe and
//! the rename run under a per-directory lock so concurrent workers cannot
//! pick the same target.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

use crate::error::RenameError;
use crate::shorten::shorten;

fn file_name_with_ext(stem: &str, ext: Option<&str>) -> String {
    match ext {
        Some(e) => format!("{stem}.{e}"),
        None => stem.to_string(),
    }
}

/// Renames one file to its shortened, collision-free form and returns the
/// final base name.
///
/// A file whose name is already in shortened form is left alone and its
/// current name returned. On error the original file is untouched.
///
/// The disambiguator probe is unbounded; a directory adversarially packed
/// with every `short_k` name would keep it searching. Fine for the batch
/// sizes this tool handles.
pub async fn rename_one(
    path: &Path,
    max_words: usize,
    dir_lock: &Mutex<()>,
) -> Result<String, RenameError> {
    let io_err = |source| RenameError {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let ext = path.extension().and_then(|s| s.to_str());

    let short = shorten(max_words, stem);
    if short.is_empty() || short == stem {
        let current = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        return Ok(current);
    }

    // Existence probe and rename must not interleave with other workers
    // renaming into the same directory.
    let _guard = dir_lock.lock().await;

    let mut candidate = file_name_with_ext(&short, ext);
    let mut k = 1u32;
    while tokio::fs::try_exists(dir.join(&candidate))
        .await
        .map_err(io_err)?
    {
        candidate = file_name_with_ext(&format!("{short}_{k}"), ext);
        k += 1;
    }

    tokio::fs::rename(path, dir.join(&candidate))
        .await
        .map_err(io_err)?;
    Ok(candidate)
}

/// Renames every regular file directly inside `dir` (non-recursive) with
/// bounded concurrency, partitioning successes and failures.
///
/// A failure on one file never blocks or cancels the others. A failure to
/// list the directory itself is reported as a single failure entry for
/// the directory path.
pub async fn rename_all(
    dir: &Path,
    max_words: usize,
    max_concurrent: usize,
) -> (Vec<String>, Vec<(PathBuf, RenameError)>) {
    let max_concurrent = max_concurrent.max(1);
    let mut renamed = Vec::new();
    let mut failed = Vec::new();

    let files = match list_regular_files(dir).await {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "cannot list directory for renaming");
            failed.push((
                dir.to_path_buf(),
                RenameError {
                    path: dir.to_path_buf(),
                    source: e,
                },
            ));
            return (renamed, failed);
        }
    };

    let dir_lock = Arc::new(Mutex::new(()));
    let mut queue = files.into_iter();
    let mut join_set = JoinSet::new();

    loop {
        while join_set.len() < max_concurrent {
            let Some(path) = queue.next() else {
                break;
            };
            let lock = Arc::clone(&dir_lock);
            join_set.spawn(async move {
                let outcome = rename_one(&path, max_words, lock.as_ref()).await;
                (path, outcome)
            });
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let Ok((path, outcome)) = res else {
            tracing::error!("rename task panicked; file left as-is");
            continue;
        };
        match outcome {
            Ok(name) => renamed.push(name),
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "rename failed, leaving original name");
                failed.push((path, e));
            }
        }
    }

    (renamed, failed)
}

async fn list_regular_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            files.push(entry.path());
        }
    }
    Ok(files)
}
