//! Job records and their status state machine.

pub mod registry;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::cache::Response;

pub use registry::JobRegistry;

/// Process-unique job identifier, allocated in submission order starting at 1.
pub type JobId = u64;

/// Lifecycle status of a job.
///
/// Legal paths are `waiting -> fetching -> done`, `waiting -> fetching -> error`
/// and `waiting -> done-cached`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Waiting,
    Fetching,
    Done,
    DoneCached,
    Error,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Waiting => "waiting",
            JobStatus::Fetching => "fetching",
            JobStatus::Done => "done",
            JobStatus::DoneCached => "done-cached",
            JobStatus::Error => "error",
        }
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::DoneCached | JobStatus::Error)
    }

    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Waiting, JobStatus::Fetching)
                | (JobStatus::Waiting, JobStatus::DoneCached)
                | (JobStatus::Fetching, JobStatus::Done)
                | (JobStatus::Fetching, JobStatus::Error)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked request to fetch one URL.
///
/// `response` is only ever set together with `done` or `done-cached` and is
/// shared with the response cache (and with any other job that hit the same
/// cache entry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub url: String,
    pub status: JobStatus,
    pub response: Option<Arc<Response>>,
}

impl Job {
    pub fn new(id: JobId, url: impl Into<String>) -> Self {
        Self { id, url: url.into(), status: JobStatus::Waiting, response: None }
    }

    /// Move to `next`, rejecting anything outside the state machine.
    pub fn advance(&mut self, next: JobStatus) -> Result<(), Error> {
        if !self.status.can_transition_to(next) {
            return Err(Error::InvalidTransition { id: self.id, from: self.status, to: next });
        }
        self.status = next;
        Ok(())
    }

    /// Attach a response and move to a completed status in one step.
    pub fn complete(&mut self, next: JobStatus, response: Arc<Response>) -> Result<(), Error> {
        if !matches!(next, JobStatus::Done | JobStatus::DoneCached) {
            return Err(Error::InvalidTransition { id: self.id, from: self.status, to: next });
        }
        self.advance(next)?;
        self.response = Some(response);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn response() -> Arc<Response> {
        Arc::new(Response::new("http://example.test/a", "X", Utc::now()))
    }

    #[test]
    fn test_new_job_is_waiting() {
        let job = Job::new(1, "http://example.test/a");
        assert_eq!(job.status, JobStatus::Waiting);
        assert!(job.response.is_none());
    }

    #[test]
    fn test_fetch_paths() {
        let mut ok = Job::new(1, "http://example.test/a");
        ok.advance(JobStatus::Fetching).unwrap();
        ok.complete(JobStatus::Done, response()).unwrap();
        assert_eq!(ok.status, JobStatus::Done);
        assert!(ok.response.is_some());

        let mut failed = Job::new(2, "http://example.test/a");
        failed.advance(JobStatus::Fetching).unwrap();
        failed.advance(JobStatus::Error).unwrap();
        assert!(failed.status.is_terminal());
        assert!(failed.response.is_none());
    }

    #[test]
    fn test_cached_path_skips_fetching() {
        let mut job = Job::new(1, "http://example.test/a");
        job.complete(JobStatus::DoneCached, response()).unwrap();
        assert_eq!(job.status, JobStatus::DoneCached);
    }

    #[test]
    fn test_terminal_states_are_final() {
        for terminal in [JobStatus::Done, JobStatus::DoneCached, JobStatus::Error] {
            for next in [
                JobStatus::Waiting,
                JobStatus::Fetching,
                JobStatus::Done,
                JobStatus::DoneCached,
                JobStatus::Error,
            ] {
                assert!(!terminal.can_transition_to(next), "{terminal} -> {next}");
            }
        }
    }

    #[test]
    fn test_illegal_moves_rejected() {
        let mut job = Job::new(3, "http://example.test/a");
        assert!(matches!(job.advance(JobStatus::Done), Err(Error::InvalidTransition { id: 3, .. })));
        assert!(job.complete(JobStatus::Done, response()).is_err());
        assert_eq!(job.status, JobStatus::Waiting);
        assert!(job.response.is_none());

        job.advance(JobStatus::Fetching).unwrap();
        assert!(job.complete(JobStatus::DoneCached, response()).is_err());
        assert!(job.complete(JobStatus::Error, response()).is_err());
        assert_eq!(job.status, JobStatus::Fetching);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&JobStatus::DoneCached).unwrap(), "\"done-cached\"");
        assert_eq!(serde_json::to_string(&JobStatus::Waiting).unwrap(), "\"waiting\"");
        assert_eq!(JobStatus::DoneCached.to_string(), "done-cached");
    }
}
