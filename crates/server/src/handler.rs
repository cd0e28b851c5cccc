//! MCP server handler implementation.
//!
//! Routes tool calls to the job service.
use crate::tools::{
    AddJobParams, GetJobParams, GetResponseParams, add_job_impl, get_job_impl, get_response_impl, list_jobs_impl,
    list_responses_impl,
};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use urlfetch_core::FetchService;

/// The MCP server handler for urlfetch.
#[derive(Clone)]
pub struct FetchServer {
    service: FetchService,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl FetchServer {
    /// Create a handler over an already started service.
    pub fn new(service: FetchService) -> Self {
        Self { service, tool_router: Self::tool_router() }
    }

    #[tool(description = "Add a new URL fetch job to the queue. Returns the job immediately with status \"waiting\".")]
    async fn add_job(&self, params: Parameters<AddJobParams>) -> Result<CallToolResult, McpError> {
        add_job_impl(&self.service, params.0).await
    }

    #[tool(
        description = "Retrieve a job by id. Status is one of waiting, fetching, done, done-cached, error; done jobs carry the response."
    )]
    async fn get_job(&self, params: Parameters<GetJobParams>) -> Result<CallToolResult, McpError> {
        get_job_impl(&self.service, params.0).await
    }

    #[tool(description = "Retrieve every job submitted to this server.")]
    async fn list_jobs(&self) -> Result<CallToolResult, McpError> {
        list_jobs_impl(&self.service).await
    }

    #[tool(description = "Retrieve the cached response for a URL, if one has been fetched.")]
    async fn get_response(&self, params: Parameters<GetResponseParams>) -> Result<CallToolResult, McpError> {
        get_response_impl(&self.service, params.0).await
    }

    #[tool(description = "Retrieve every cached response.")]
    async fn list_responses(&self) -> Result<CallToolResult, McpError> {
        list_responses_impl(&self.service).await
    }
}

impl ServerHandler for FetchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "urlfetch".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
