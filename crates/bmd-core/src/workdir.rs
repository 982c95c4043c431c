//! Download directory lifecycle: wiped and recreated per run.

use anyhow::{Context, Result};
use std::path::Path;

/// Removes `dir` (with all its contents) if present, then creates it
/// fresh. This is the one setup step whose failure aborts a run.
pub async fn reset(dir: &Path) -> Result<()> {
    let existed = tokio::fs::try_exists(dir)
        .await
        .with_context(|| format!("probing {}", dir.display()))?;
    if existed {
        tokio::fs::remove_dir_all(dir)
            .await
            .with_context(|| format!("removing {}", dir.display()))?;
        tracing::debug!(dir = %dir.display(), "removed previous download directory");
    }
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating {}", dir.display()))?;
    tracing::info!(dir = %dir.display(), "download directory ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn creates_missing_directory() {
        let base = tempdir().unwrap();
        let dir = base.path().join("downloads");
        reset(&dir).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn wipes_existing_contents() {
        let base = tempdir().unwrap();
        let dir = base.path().join("downloads");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("stale.mp3"), b"old").unwrap();

        reset(&dir).await.unwrap();
        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn fails_when_path_is_a_file() {
        let base = tempdir().unwrap();
        let dir = base.path().join("downloads");
        std::fs::write(&dir, b"not a directory").unwrap();
        assert!(reset(&dir).await.is_err());
    }
}
