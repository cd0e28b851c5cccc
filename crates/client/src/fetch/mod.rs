//! HTTP fetch pipeline for workers.
//!
//! ### Target validation
//! - Trim whitespace; require an absolute `http`/`https` URL with a host
//! - The URL is not rewritten, so responses stay keyed by what was submitted
//!
//! ### Limits
//! - Max redirects: 10 (configurable)
//! - Max body bytes: 10MB (configurable), enforced while streaming
//! - Request timeout: none unless configured
//!
//! Any HTTP status is a successful fetch; only transport and body-read
//! problems are failures.

pub mod url;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::BytesMut;
use reqwest::Client;

pub use self::url::{UrlError, parse_target};

use urlfetch_core::{AppConfig, Error, Fetch};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "urlfetch/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 10MB)
    pub max_bytes: usize,

    /// Optional request timeout (default: none)
    pub timeout: Option<Duration>,

    /// Maximum number of redirects to follow (default: 10)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
        }
    }
}

/// HTTP fetch client used by the worker pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| Error::InvalidInput(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// GET `url_str` and return the full body, decoded lossily as UTF-8.
    pub async fn get_body(&self, url_str: &str) -> Result<String, Error> {
        let start = Instant::now();
        let url = parse_target(url_str).map_err(|e| Error::Transport(e.to_string()))?;

        let mut response = self
            .http
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| Error::Transport(format!("network error: {e}")))?;

        let status = response.status();

        if let Some(len) = response.content_length()
            && len > self.config.max_bytes as u64
        {
            return Err(Error::Read(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Transport(format!("timed out reading response: {e}"))
                } else {
                    Error::Read(format!("failed to read response: {e}"))
                }
            })?
        {
            if body.len() + chunk.len() > self.config.max_bytes {
                return Err(Error::Read(format!("body exceeds {} bytes", self.config.max_bytes)));
            }
            body.extend_from_slice(&chunk);
        }

        tracing::debug!(
            "fetched {} ({}) in {}ms ({} bytes)",
            url,
            status.as_u16(),
            start.elapsed().as_millis(),
            body.len()
        );

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl Fetch for FetchClient {
    async fn fetch(&self, url: &str) -> Result<String, Error> {
        self.get_body(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `raw` as the reply to a single connection and return a URL for it.
    async fn serve_once(raw: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(raw.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/page")
    }

    fn client() -> FetchClient {
        FetchClient::new(FetchConfig::default()).unwrap()
    }

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "urlfetch/0.1");
        assert_eq!(config.max_bytes, 10 * 1024 * 1024);
        assert_eq!(config.timeout, None);
        assert_eq!(config.max_redirects, 10);
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = AppConfig { user_agent: "probe/1".into(), timeout_ms: Some(750), ..Default::default() };
        let config = FetchConfig::from(&app);
        assert_eq!(config.user_agent, "probe/1");
        assert_eq!(config.timeout, Some(Duration::from_millis(750)));
    }

    #[tokio::test]
    async fn test_fetch_client_new() {
        assert!(FetchClient::new(FetchConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_body() {
        let url =
            serve_once("HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello")
                .await;
        let body = client().fetch(&url).await.unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_error_status_still_returns_body() {
        let url = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 7\r\nConnection: close\r\n\r\nmissing").await;
        let body = client().fetch(&url).await.unwrap();
        assert_eq!(body, "missing");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = client().fetch(&format!("http://{addr}/gone")).await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn test_invalid_url_is_transport_failure() {
        let result = client().fetch("not a url").await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn test_truncated_body_is_read_failure() {
        let url = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nshort").await;
        let result = client().fetch(&url).await;
        assert!(matches!(result, Err(Error::Read(_))));
    }

    #[tokio::test]
    async fn test_oversized_body_is_read_failure() {
        let url = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 11\r\nConnection: close\r\n\r\nhello world").await;
        let client = FetchClient::new(FetchConfig { max_bytes: 4, ..Default::default() }).unwrap();
        let result = client.fetch(&url).await;
        assert!(matches!(result, Err(Error::Read(_))));
    }

    #[tokio::test]
    async fn test_timeout_while_streaming_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\npartial")
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let config = FetchConfig { timeout: Some(Duration::from_millis(300)), ..Default::default() };
        let client = FetchClient::new(config).unwrap();
        let result = client.fetch(&format!("http://{addr}/slow")).await;
        assert!(matches!(result, Err(Error::Transport(msg)) if msg.contains("timed out")));
    }
}
