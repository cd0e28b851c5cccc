//! The job service handle.
//!
//! [`FetchService`] bundles the job registry, response cache, work queue, id
//! counter and fetcher into one cloneable value. Build one at startup, call
//! [`FetchService::start_workers`] once, and hand clones to whatever needs to
//! submit or query jobs.

mod worker;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::Error;
use crate::cache::{DEFAULT_FRESHNESS, Response, ResponseCache};
use crate::config::AppConfig;
use crate::fetch::Fetch;
use crate::jobs::{Job, JobId, JobRegistry};
use crate::queue::{DEFAULT_CAPACITY, WorkQueue};

/// Tunables for a [`FetchService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Work queue capacity; submitters wait once this many ids are pending.
    pub queue_capacity: usize,
    /// Age below which a cached response is served without refetching.
    pub freshness: Duration,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self { queue_capacity: DEFAULT_CAPACITY, freshness: DEFAULT_FRESHNESS }
    }
}

impl From<&AppConfig> for ServiceOptions {
    fn from(config: &AppConfig) -> Self {
        Self { queue_capacity: config.queue_capacity, freshness: config.freshness() }
    }
}

struct Inner {
    jobs: JobRegistry,
    responses: ResponseCache,
    queue: WorkQueue,
    fetcher: Arc<dyn Fetch>,
    next_id: AtomicU64,
    freshness: Duration,
    started: AtomicBool,
}

/// Handle to the registry, cache, queue and worker pool.
#[derive(Clone)]
pub struct FetchService {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for FetchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchService")
            .field("queue_capacity", &self.inner.queue.capacity())
            .field("freshness", &self.inner.freshness)
            .field("started", &self.inner.started.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl FetchService {
    pub fn new(fetcher: Arc<dyn Fetch>, options: ServiceOptions) -> Self {
        let inner = Inner {
            jobs: JobRegistry::new(),
            responses: ResponseCache::new(),
            queue: WorkQueue::new(options.queue_capacity),
            fetcher,
            next_id: AtomicU64::new(0),
            freshness: options.freshness,
            started: AtomicBool::new(false),
        };
        Self { inner: Arc::new(inner) }
    }

    /// Register a new job for `url` and queue it.
    ///
    /// Waits while the work queue is full. The returned job is the record as
    /// registered (`waiting`); poll [`FetchService::get_job`] for progress.
    pub async fn submit(&self, url: impl Into<String>) -> Result<Job, Error> {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let job = Job::new(id, url);

        self.inner.jobs.register(job.clone()).await;
        self.inner.queue.enqueue(id).await?;

        tracing::debug!(job_id = id, url = %job.url, pending = self.inner.queue.pending(), "job queued");
        Ok(job)
    }

    pub async fn get_job(&self, id: JobId) -> Option<Job> {
        self.inner.jobs.get(id).await
    }

    pub async fn list_jobs(&self) -> Vec<Job> {
        self.inner.jobs.list().await
    }

    pub async fn get_response(&self, url: &str) -> Option<Arc<Response>> {
        self.inner.responses.lookup(url).await
    }

    pub async fn list_responses(&self) -> Vec<Arc<Response>> {
        self.inner.responses.list().await
    }

    /// Spawn `count` workers draining the shared queue.
    ///
    /// Only the first call with a non-zero count spawns anything; it returns
    /// `true`. Must be called from within a tokio runtime.
    pub fn start_workers(&self, count: usize) -> bool {
        if count == 0 {
            tracing::warn!("start_workers called with a count of zero; no workers spawned");
            return false;
        }
        if self
            .inner
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!(count, "workers already running; ignoring start_workers");
            return false;
        }

        for worker_id in 0..count {
            tokio::spawn(worker::run(worker_id, self.clone()));
        }
        tracing::info!(count, "worker pool started");
        true
    }

    pub fn workers_started(&self) -> bool {
        self.inner.started.load(Ordering::SeqCst)
    }

    /// Ids submitted but not yet picked up by a worker.
    pub fn pending(&self) -> usize {
        self.inner.queue.pending()
    }

    /// Seed the cache directly.
    pub async fn publish_response(&self, response: Arc<Response>) {
        self.inner.responses.publish(response.url.clone(), response).await;
    }
}
