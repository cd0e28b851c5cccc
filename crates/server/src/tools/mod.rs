//! MCP tool implementations.
//!
//! This module contains all tools exposed by the urlfetch server.

pub mod jobs;
pub mod responses;

#[cfg(test)]
pub(crate) mod test_support;

pub use jobs::{AddJobParams, GetJobParams, add_job_impl, get_job_impl, list_jobs_impl};
pub use responses::{GetResponseParams, get_response_impl, list_responses_impl};
