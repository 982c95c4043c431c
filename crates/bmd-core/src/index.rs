//! Content-index collaborator interface.
//!
//! The resolver only depends on this trait and does not know which
//! search backend produces the hits.

use async_trait::async_trait;

use crate::error::IndexError;

/// One search hit exposing a playable URL.
#[derive(Debug, Clone)]
pub struct IndexHit {
    pub url: String,
    /// Upstream title, when the backend reports one.
    pub title: Option<String>,
}

/// Free-text search over an external content index.
#[async_trait]
pub trait ContentIndex: Send + Sync {
    /// Returns up to `limit` hits for `query`, best match first.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<IndexHit>, IndexError>;
}
