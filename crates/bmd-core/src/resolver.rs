//! Batch URL resolution: work items in, resolved items out.
//!
//! Runs up to `max_concurrent` searches at once; when one finishes, the
//! next queued item is submitted until the list is drained. A failing
//! item is logged and dropped without disturbing its siblings.

use std::sync::Arc;
use tokio::task::JoinSet;

use crate::error::ResolveError;
use crate::index::ContentIndex;
use crate::worklist::{MediaKind, WorkItem};

/// A work item plus the single URL chosen for it. The URL is never empty.
#[derive(Debug, Clone)]
pub struct ResolvedItem {
    pub kind: MediaKind,
    pub query: String,
    pub url: String,
}

/// Resolves one work item to at most one playable URL (first hit only).
///
/// Hits with an empty URL are discarded as if the index returned nothing.
pub async fn resolve_one(
    index: &dyn ContentIndex,
    item: &WorkItem,
) -> Result<Option<String>, ResolveError> {
    let hits = index.search(&item.query, 1).await?;
    Ok(hits.into_iter().map(|h| h.url).find(|u| !u.is_empty()))
}

/// Resolves all items with bounded concurrency and partitions the outcome.
///
/// Output order follows completion order, not input order. Items with no
/// hit are recorded as [`ResolveError::NoHit`]; collaborator errors keep
/// their cause. Neither kind of failure stops the batch.
pub async fn resolve_all(
    index: Arc<dyn ContentIndex>,
    items: Vec<WorkItem>,
    max_concurrent: usize,
) -> (Vec<ResolvedItem>, Vec<(WorkItem, ResolveError)>) {
    let max_concurrent = max_concurrent.max(1);
    let mut resolved = Vec::new();
    let mut failed = Vec::new();
    let mut queue = items.into_iter();
    let mut join_set = JoinSet::new();

    loop {
        while join_set.len() < max_concurrent {
            let Some(item) = queue.next() else {
                break;
            };
            let index = Arc::clone(&index);
            join_set.spawn(async move {
                let outcome = resolve_one(index.as_ref(), &item).await;
                (item, outcome)
            });
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let Ok((item, outcome)) = res else {
            tracing::error!("resolver task panicked; item lost");
            continue;
        };
        match outcome {
            Ok(Some(url)) => resolved.push(ResolvedItem {
                kind: item.kind,
                query: item.query,
                url,
            }),
            Ok(None) => {
                tracing::warn!(query = %item.query, "no search hit, dropping item");
                failed.push((item, ResolveError::NoHit));
            }
            Err(e) => {
                tracing::warn!(query = %item.query, error = %e, "resolution failed, dropping item");
                failed.push((item, e));
            }
        }
    }

    (resolved, failed)
}
