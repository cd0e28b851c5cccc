//! urlfetchd entry point.
//!
//! Loads configuration, starts the worker pool, submits any seed URLs and
//! serves the job tools over MCP stdio. Logging goes to stderr to avoid
//! interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;
use urlfetch_client::{FetchClient, FetchConfig};
use urlfetch_core::{AppConfig, FetchService, ServiceOptions};

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        workers = config.workers,
        queue_capacity = config.queue_capacity,
        freshness_secs = config.freshness_secs,
        "Starting urlfetch server on stdio transport"
    );

    let fetcher = FetchClient::new(FetchConfig::from(&config))?;
    let service = FetchService::new(Arc::new(fetcher), ServiceOptions::from(&config));
    service.start_workers(config.workers);

    for url in &config.seed_urls {
        let job = service.submit(url.clone()).await?;
        tracing::info!(job_id = job.id, url = %job.url, "seed job queued");
    }

    let handler = handler::FetchServer::new(service);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
