//! Response cache keyed by requested URL.
//!
//! Holds the latest response per URL and never expires anything. Freshness is
//! the caller's decision (see [`Response::is_fresh_at`]).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::Response;

/// Shared map of URL to the most recently published response.
#[derive(Clone, Debug, Default)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, Arc<Response>>>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current response for `url`, or `None` on a miss.
    pub async fn lookup(&self, url: &str) -> Option<Arc<Response>> {
        let entries = self.entries.read().await;
        let hit = entries.get(url).cloned();
        tracing::trace!(url, hit = hit.is_some(), "response cache lookup");
        hit
    }

    /// Store `response` for `url`, replacing any previous entry.
    pub async fn publish(&self, url: impl Into<String>, response: Arc<Response>) {
        self.entries.write().await.insert(url.into(), response);
    }

    /// All cached responses, ordered by URL.
    pub async fn list(&self) -> Vec<Arc<Response>> {
        let entries = self.entries.read().await;
        let mut responses: Vec<Arc<Response>> = entries.values().cloned().collect();
        responses.sort_by(|a, b| a.url.cmp(&b.url));
        responses
    }
}
