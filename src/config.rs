// src/config.rs
use std::time::Duration;

/// Date parameter format the source API expects (`yyyy-MM-dd`).
pub const APOD_DATE_FORMAT: &str = "%Y-%m-%d";

const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/planetary/apod";
const DEFAULT_API_KEY: &str = "DEMO_KEY";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Runtime configuration for the client and the service surface.
///
/// Everything is env-first with hardcoded defaults, so a bare
/// `cargo run` works against the public endpoint with its demo credential.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Endpoint URL, without query parameters.
    pub base_url: String,
    /// Static API credential, sent on every request.
    pub api_key: String,
    pub connect_timeout: Duration,
    /// Total per-request budget (connect + read).
    pub request_timeout: Duration,
    /// Address the observer surface binds to.
    pub bind_addr: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl ApiConfig {
    /// Environment overrides:
    /// - `APOD_BASE_URL`: endpoint URL
    /// - `APOD_API_KEY`: credential
    /// - `APOD_TIMEOUT_SECS`: connect and total timeout, in seconds
    /// - `APOD_BIND_ADDR`: listen address for the service binary
    pub fn from_env() -> Self {
        let timeout_secs: u64 = std::env::var("APOD_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url: env_or("APOD_BASE_URL", DEFAULT_BASE_URL),
            api_key: env_or("APOD_API_KEY", DEFAULT_API_KEY),
            connect_timeout: Duration::from_secs(timeout_secs),
            request_timeout: Duration::from_secs(timeout_secs),
            bind_addr: env_or("APOD_BIND_ADDR", DEFAULT_BIND_ADDR),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
