//! Job tools: add_job, get_job, list_jobs.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use urlfetch_core::{Error, FetchService, Job, JobId};

/// Parameters for the add_job tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddJobParams {
    /// The URL to retrieve with HTTP GET.
    pub url: String,
}

/// Parameters for the get_job tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetJobParams {
    /// The id returned by add_job.
    pub id: JobId,
}

/// Output from the list_jobs tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListOutput {
    pub jobs: Vec<Job>,
}

pub(crate) fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("failed to serialize output: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Implementation of the add_job tool.
///
/// Returns as soon as the job is queued; its status will be `waiting`.
pub async fn add_job_impl(service: &FetchService, params: AddJobParams) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let job = service.submit(params.url).await?;
    tracing::info!(job_id = job.id, url = %job.url, "job added");
    json_result(&job)
}

/// Implementation of the get_job tool.
pub async fn get_job_impl(service: &FetchService, params: GetJobParams) -> Result<CallToolResult, McpError> {
    let job = service
        .get_job(params.id)
        .await
        .ok_or(Error::JobNotFound(params.id))?;
    json_result(&job)
}

/// Implementation of the list_jobs tool.
pub async fn list_jobs_impl(service: &FetchService) -> Result<CallToolResult, McpError> {
    json_result(&JobListOutput { jobs: service.list_jobs().await })
}
