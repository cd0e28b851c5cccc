//! Worker loop and the fetch-or-cache-hit procedure.

use std::sync::Arc;

use chrono::Utc;

use super::FetchService;
use crate::Error;
use crate::cache::Response;
use crate::jobs::{JobId, JobStatus};

/// Drain the queue until it closes.
///
/// Each job runs in its own task so a panicking fetcher costs one job, not
/// the worker.
pub(super) async fn run(worker: usize, service: FetchService) {
    tracing::debug!(worker, "worker started");

    while let Some(id) = service.inner.queue.dequeue().await {
        let task = tokio::spawn(process(service.clone(), id));
        match task.await {
            Ok(Ok(())) => {}
            Ok(Err(err @ Error::Inconsistency(_))) => {
                tracing::error!(worker, job_id = id, error = %err, "dropping queued id");
            }
            Ok(Err(err)) => {
                tracing::error!(worker, job_id = id, error = %err, "failed to record job outcome");
            }
            Err(join_err) => {
                tracing::error!(worker, job_id = id, error = %join_err, "job task aborted");
                abandon(&service, id).await;
            }
        }
    }

    tracing::debug!(worker, "work queue closed; worker exiting");
}

/// Run one job to a terminal state.
async fn process(service: FetchService, id: JobId) -> Result<(), Error> {
    let inner = &service.inner;
    let job = inner.jobs.get(id).await.ok_or(Error::Inconsistency(id))?;

    if let Some(cached) = inner.responses.lookup(&job.url).await
        && cached.is_fresh_at(Utc::now(), inner.freshness)
    {
        tracing::debug!(job_id = id, url = %job.url, captured = %cached.timestamp, "serving cached response");
        return inner
            .jobs
            .update(id, move |job| job.complete(JobStatus::DoneCached, cached))
            .await;
    }

    inner.jobs.update(id, |job| job.advance(JobStatus::Fetching)).await?;
    tracing::debug!(job_id = id, url = %job.url, "fetching");

    match inner.fetcher.fetch(&job.url).await {
        Ok(body) => {
            let response = Arc::new(Response::new(job.url.clone(), body, Utc::now()));
            inner.responses.publish(job.url.clone(), Arc::clone(&response)).await;
            tracing::debug!(job_id = id, url = %job.url, bytes = response.body.len(), "fetched");
            inner
                .jobs
                .update(id, move |job| job.complete(JobStatus::Done, response))
                .await
        }
        Err(err) => {
            tracing::warn!(
                job_id = id,
                url = %job.url,
                error = %err,
                as_transport_failure = !err.is_fetch_failure(),
                "fetch failed"
            );
            inner.jobs.update(id, |job| job.advance(JobStatus::Error)).await
        }
    }
}

/// Mark a job whose task died mid-fetch as failed.
async fn abandon(service: &FetchService, id: JobId) {
    let result = service
        .inner
        .jobs
        .update(id, |job| match job.status {
            JobStatus::Fetching => job.advance(JobStatus::Error),
            _ => Ok(()),
        })
        .await;
    if let Err(err) = result {
        tracing::error!(job_id = id, error = %err, "could not mark abandoned job as failed");
    }
}
