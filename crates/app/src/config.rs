//! Client configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Default backend base URL (the dev server of the original stack).
const DEFAULT_API_URL: &str = "http://localhost:5000/api/v1";
/// Default location of the local durable cache.
const DEFAULT_STORE_PATH: &str = "luxstay-store.json";
/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the booking client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL, e.g. `http://localhost:5000/api/v1`.
    pub api_url: String,
    /// Path of the local durable cache file.
    pub store_path: PathBuf,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `LUXSTAY_API_URL`      | `http://localhost:5000/api/v1`   |
    /// | `LUXSTAY_STORE_PATH`   | `luxstay-store.json`             |
    /// | `LUXSTAY_TIMEOUT_SECS` | `30`                             |
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("LUXSTAY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let store_path = std::env::var("LUXSTAY_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| DEFAULT_STORE_PATH.into());

        let timeout_secs: u64 = std::env::var("LUXSTAY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_url,
            store_path,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            store_path: DEFAULT_STORE_PATH.into(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
