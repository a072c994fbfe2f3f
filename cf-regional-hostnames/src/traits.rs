use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::TransportError;

/// Authenticated HTTP access to the API.
///
/// Implementations own everything below the request/response contract:
/// authentication, JSON encoding of `body`, timeouts, retries and rate
/// limiting. A successful call returns the raw body of a 2xx response; any
/// other outcome is a [`TransportError`].
///
/// Cancellation is the caller's: dropping the returned future abandons the
/// request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs `method` on `path` (relative to the API base, starting with
    /// `/`), sending `body` as JSON when present.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Vec<u8>, TransportError>;
}
