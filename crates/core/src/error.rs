//! Unified error types for urlfetch.
//!
//! Fetch failures never reach the submitter; they are recorded on the job as
//! `error` status. The remaining variants surface through the service API and
//! the tool layer.

use rmcp::model::{ErrorCode, ErrorData as McpError};

use crate::jobs::{JobId, JobStatus};

/// Unified error types for the urlfetch service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty URL).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// No job registered under the given identifier.
    #[error("JOB_NOT_FOUND: {0}")]
    JobNotFound(JobId),

    /// No cached response for the given URL.
    #[error("CACHE_MISS: {0}")]
    CacheMiss(String),

    /// The network call failed before a response arrived.
    #[error("TRANSPORT_FAILURE: {0}")]
    Transport(String),

    /// A response arrived but its body could not be read in full.
    #[error("READ_FAILURE: {0}")]
    Read(String),

    /// A dequeued identifier has no registered job.
    #[error("INTERNAL_INCONSISTENCY: job {0} was queued but never registered")]
    Inconsistency(JobId),

    /// A job was asked to move backwards or out of a terminal state.
    #[error("INVALID_TRANSITION: job {id} cannot move from {from} to {to}")]
    InvalidTransition { id: JobId, from: JobStatus, to: JobStatus },

    /// The work queue has no receiver left.
    #[error("QUEUE_CLOSED")]
    QueueClosed,
}

impl Error {
    /// Whether this error came from the fetch path and belongs on the job record.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Read(_))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::JobNotFound(_) => -32001,
            Error::CacheMiss(_) => -32002,
            Error::Transport(_) => -32003,
            Error::Read(_) => -32004,
            Error::Inconsistency(_) | Error::InvalidTransition { .. } | Error::QueueClosed => -32603,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CacheMiss("http://example.test/a".to_string());
        assert!(err.to_string().contains("CACHE_MISS"));
        assert!(err.to_string().contains("http://example.test/a"));
    }

    #[test]
    fn test_transition_display() {
        let err = Error::InvalidTransition { id: 7, from: JobStatus::Done, to: JobStatus::Fetching };
        assert_eq!(err.to_string(), "INVALID_TRANSITION: job 7 cannot move from done to fetching");
    }

    #[test]
    fn test_fetch_failure_classification() {
        assert!(Error::Transport("refused".into()).is_fetch_failure());
        assert!(Error::Read("reset".into()).is_fetch_failure());
        assert!(!Error::JobNotFound(1).is_fetch_failure());
        assert!(!Error::QueueClosed.is_fetch_failure());
    }

    #[test]
    fn test_error_to_mcp_error() {
        let mcp_err: McpError = Error::JobNotFound(42).into();
        assert_eq!(mcp_err.code.0, -32001);
        assert!(mcp_err.message.contains("42"));

        let mcp_err: McpError = Error::InvalidInput("url cannot be empty".into()).into();
        assert_eq!(mcp_err.code.0, -32602);
    }
}
