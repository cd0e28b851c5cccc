//! Response tools: get_response, list_responses.

use std::sync::Arc;

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use urlfetch_core::{Error, FetchService, Response};

use super::jobs::json_result;

/// Parameters for the get_response tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetResponseParams {
    /// The URL exactly as it was submitted to add_job.
    pub url: String,
}

/// Output from the list_responses tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseListOutput {
    pub responses: Vec<Arc<Response>>,
}

/// Implementation of the get_response tool.
///
/// Returns whatever is cached for the URL, fresh or not.
pub async fn get_response_impl(service: &FetchService, params: GetResponseParams) -> Result<CallToolResult, McpError> {
    let response = service
        .get_response(&params.url)
        .await
        .ok_or_else(|| Error::CacheMiss(params.url.clone()))?;
    json_result(&response)
}

/// Implementation of the list_responses tool.
pub async fn list_responses_impl(service: &FetchService) -> Result<CallToolResult, McpError> {
    json_result(&ResponseListOutput { responses: service.list_responses().await })
}
