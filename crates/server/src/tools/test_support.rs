//! Shared fixtures for tool tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use urlfetch_core::{Error, Fetch, FetchService, JobId, ServiceOptions};

pub const A: &str = "http://example.test/a";

struct StubFetch;

#[async_trait]
impl Fetch for StubFetch {
    async fn fetch(&self, _url: &str) -> Result<String, Error> {
        Ok("X".into())
    }
}

pub fn service() -> FetchService {
    FetchService::new(Arc::new(StubFetch), ServiceOptions::default())
}

pub async fn wait_done(service: &FetchService, id: JobId) {
    for _ in 0..500 {
        if service.get_job(id).await.is_some_and(|job| job.status.is_terminal()) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("job {id} never finished");
}

pub fn text_of(result: &CallToolResult) -> String {
    result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
        .unwrap_or_default()
}
