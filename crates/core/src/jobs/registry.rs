//! In-memory job registry.
//!
//! Every job ever submitted lives here for the life of the process. Reads
//! hand out clones so callers never hold the lock across an await.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{Job, JobId};
use crate::Error;

/// Shared map of job id to job record.
#[derive(Clone, Debug, Default)]
pub struct JobRegistry {
    jobs: Arc<RwLock<BTreeMap<JobId, Job>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a job under its own id, replacing nothing that already exists.
    pub async fn register(&self, job: Job) {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&job.id) {
            tracing::error!(job_id = job.id, "job id registered twice; keeping the original record");
            return;
        }
        jobs.insert(job.id, job);
    }

    /// Snapshot of the job as currently recorded.
    pub async fn get(&self, id: JobId) -> Option<Job> {
        self.jobs.read().await.get(&id).cloned()
    }

    /// All jobs, lowest id first.
    pub async fn list(&self) -> Vec<Job> {
        self.jobs.read().await.values().cloned().collect()
    }

    /// Apply `f` to the job under the write lock.
    ///
    /// The closure runs atomically with respect to every other registry call.
    pub async fn update<F>(&self, id: JobId, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Job) -> Result<(), Error>,
    {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(&id).ok_or(Error::JobNotFound(id))?;
        f(job)
    }
}
