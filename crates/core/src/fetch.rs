//! The seam between workers and the network.

use async_trait::async_trait;

use crate::Error;

/// Performs one GET for a worker.
///
/// Implementations report connection problems as [`Error::Transport`] and
/// problems reading the body as [`Error::Read`]. Any other variant is
/// treated as a transport failure by the worker.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch `url` and return its full body.
    async fn fetch(&self, url: &str) -> Result<String, Error>;
}
