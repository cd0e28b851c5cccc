//! In-memory response cache.
//!
//! - One entry per requested URL, latest write wins
//! - Entries are shared (`Arc`) with every job that used them
//! - No eviction; the cache grows for the life of the process

pub mod response;
pub mod store;

pub use response::{DEFAULT_FRESHNESS, Response};
pub use store::ResponseCache;
