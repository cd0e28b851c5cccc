//! Core types and the job service for urlfetch.
//!
//! This crate provides:
//! - Job records and the in-memory job registry
//! - The freshness-bounded response cache
//! - The bounded work queue and worker pool
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod jobs;
pub mod queue;
pub mod service;

pub use cache::{Response, ResponseCache};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use fetch::Fetch;
pub use jobs::{Job, JobId, JobRegistry, JobStatus};
pub use queue::WorkQueue;
pub use service::{FetchService, ServiceOptions};
