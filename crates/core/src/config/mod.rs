//! Application configuration with layered loading.
//!
//! Sources, highest precedence first:
//!
//! 1. Environment variables (URLFETCH_*)
//! 2. TOML config file (if URLFETCH_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Number of fetch workers.
    ///
    /// Set via URLFETCH_WORKERS environment variable.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Work queue capacity; submissions wait once this many jobs are pending.
    ///
    /// Set via URLFETCH_QUEUE_CAPACITY environment variable.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Seconds a cached response is served before it is refetched.
    ///
    /// Set via URLFETCH_FRESHNESS_SECS environment variable.
    #[serde(default = "default_freshness_secs")]
    pub freshness_secs: u64,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via URLFETCH_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum body bytes read per fetch.
    ///
    /// Set via URLFETCH_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Optional per-request timeout in milliseconds. Unset means fetches may
    /// run indefinitely.
    ///
    /// Set via URLFETCH_TIMEOUT_MS environment variable.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Maximum number of redirects followed per fetch.
    ///
    /// Set via URLFETCH_MAX_REDIRECTS environment variable.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// URLs submitted once at startup.
    ///
    /// Set via URLFETCH_SEED_URLS environment variable (TOML array syntax).
    #[serde(default)]
    pub seed_urls: Vec<String>,
}

fn default_workers() -> usize {
    2
}

fn default_queue_capacity() -> usize {
    crate::queue::DEFAULT_CAPACITY
}

fn default_freshness_secs() -> u64 {
    crate::cache::DEFAULT_FRESHNESS.as_secs()
}

fn default_user_agent() -> String {
    "urlfetch/0.1".into()
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_max_redirects() -> usize {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
            freshness_secs: default_freshness_secs(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: None,
            max_redirects: default_max_redirects(),
            seed_urls: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Freshness window as a Duration.
    pub fn freshness(&self) -> Duration {
        Duration::from_secs(self.freshness_secs)
    }

    /// Request timeout as a Duration, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or environment cannot be parsed, or
    /// if validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("URLFETCH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(Env::prefixed("URLFETCH_").ignore(&["CONFIG_FILE"]));

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
