//! Immutable captured fetch results.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default freshness window for cached responses (1 hour).
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(60 * 60);

/// The body fetched from a URL, tied to the moment it was captured.
///
/// Never mutated after construction; a refetch publishes a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub url: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl Response {
    pub fn new(url: impl Into<String>, body: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self { url: url.into(), body: body.into(), timestamp }
    }

    /// Whether the response is younger than `window` at `now`.
    ///
    /// A timestamp ahead of `now` counts as age zero.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, window: Duration) -> bool {
        match now.signed_duration_since(self.timestamp).to_std() {
            Ok(age) => age < window,
            Err(_) => true,
        }
    }
}
