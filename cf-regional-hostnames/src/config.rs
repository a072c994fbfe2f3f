//! Settings for the built-in [`CloudflareTransport`](crate::CloudflareTransport).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cloudflare API v4 base URL.
pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default connect timeout (milliseconds).
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
/// Default request timeout (milliseconds).
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
/// Default number of retries for transient failures.
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Transport settings. Every field has a default, so partial documents
/// deserialize:
///
/// ```
/// use cf_regional_hostnames::TransportConfig;
///
/// let config: TransportConfig = serde_json::from_str(r#"{"max_retries": 0}"#).unwrap();
/// assert_eq!(config.max_retries, 0);
/// assert_eq!(config.request_timeout_ms, 30_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// API base URL without trailing slash.
    pub base_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    /// Retries for network errors, timeouts and rate limiting (0 disables).
    pub max_retries: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: CF_API_BASE.to_string(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl TransportConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets both timeouts. Precision is one millisecond; a non-zero
    /// duration shorter than that is rounded up to 1 ms, never down to 0.
    #[must_use]
    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout_ms = duration_to_ms(connect);
        self.request_timeout_ms = duration_to_ms(request);
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Base URL with any trailing `/` removed.
    pub(crate) fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn duration_to_ms(duration: Duration) -> u64 {
    let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    if ms == 0 && !duration.is_zero() { 1 } else { ms }
}
