//! Built-in [`Transport`] for the Cloudflare API v4.
//!
//! Handles bearer authentication, timeouts, retries with exponential
//! backoff, and turning failed responses into [`TransportError`]s. On
//! success it hands the raw body back untouched; decoding the `result` is
//! left to the client.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::IgnoredAny;
use serde_json::Value;

use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::traits::Transport;
use crate::types::{ResponseEnvelope, ResponseMessage};
use crate::utils::log_sanitizer::{body_for_log, mask_token, truncate_for_log};

/// Upper bound for a server-provided `Retry-After`.
const MAX_RETRY_AFTER_SECS: u64 = 30;
/// Upper bound for the exponential backoff delay.
const MAX_BACKOFF_MS: u64 = 10_000;

/// reqwest-backed [`Transport`] authenticating with an API token.
pub struct CloudflareTransport {
    client: Client,
    api_token: String,
    config: TransportConfig,
}

impl CloudflareTransport {
    /// Creates a transport with [`TransportConfig::default`].
    pub fn new(api_token: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_config(api_token, TransportConfig::default())
    }

    pub fn with_config(
        api_token: impl Into<String>,
        config: TransportConfig,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| TransportError::Configuration {
                detail: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_token: api_token.into(),
            config,
        })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl fmt::Debug for CloudflareTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareTransport")
            .field("api_token", &mask_token(&self.api_token))
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for CloudflareTransport {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Vec<u8>, TransportError> {
        let url = format!("{}{path}", self.config.normalized_base_url());

        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.api_token);
        if let Some(body) = &body {
            log::debug!("Request Body: {}", truncate_for_log(&body.to_string()));
            request = request.json(body);
        }

        let (status, response_body) =
            execute_request_with_retry(request, &method, &url, self.config.max_retries).await?;

        check_response(status, path, &response_body).inspect_err(|e| {
            if matches!(e, TransportError::Api { .. }) {
                log::error!("{method} {path} failed: {e}");
            } else {
                log::warn!("{method} {path} failed: {e}");
            }
        })?;

        Ok(response_body)
    }
}

/// Sends one request and reads the body.
///
/// HTTP 429 and 502-504 are turned into retryable errors here; every other
/// status is returned to the caller with its body.
async fn execute_request(
    request: RequestBuilder,
    method: &Method,
    url: &str,
) -> Result<(u16, Vec<u8>), TransportError> {
    log::debug!("{method} {url}");

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            TransportError::Timeout {
                detail: e.to_string(),
            }
        } else {
            TransportError::Network {
                detail: e.to_string(),
            }
        }
    })?;

    let status = response.status().as_u16();
    log::debug!("Response Status: {status}");

    // Read before the body consumes the response.
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    if status == 429 {
        let text = response.text().await.unwrap_or_default();
        log::warn!("Rate limited (HTTP 429), retry_after={retry_after:?}");
        return Err(TransportError::RateLimited {
            retry_after,
            raw_message: Some(text).filter(|t| !t.is_empty()),
        });
    }

    if matches!(status, 502..=504) {
        let text = response.text().await.unwrap_or_default();
        log::warn!("Server error (HTTP {status})");
        return Err(TransportError::Network {
            detail: format!("HTTP {status}: {}", truncate_for_log(&text)),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| TransportError::Network {
            detail: format!("Failed to read response body: {e}"),
        })?;

    log::debug!("Response Body: {}", body_for_log(&bytes));

    Ok((status, bytes.to_vec()))
}

/// [`execute_request`] with up to `max_retries` extra attempts for
/// retryable failures.
async fn execute_request_with_retry(
    request: RequestBuilder,
    method: &Method,
    url: &str,
    max_retries: u32,
) -> Result<(u16, Vec<u8>), TransportError> {
    if max_retries == 0 {
        return execute_request(request, method, url).await;
    }

    let mut last_error = None;

    for attempt in 0..=max_retries {
        // RequestBuilder is single-use; JSON bodies are always cloneable.
        let Some(req) = request.try_clone() else {
            log::warn!("Cannot clone request for {method} {url}, disabling retry");
            return execute_request(request, method, url).await;
        };

        match execute_request(req, method, url).await {
            Ok(resp) => return Ok(resp),
            Err(e) if attempt < max_retries && e.is_retryable() => {
                let delay = retry_delay(&e, attempt);
                log::warn!(
                    "{method} {url} failed (attempt {}/{}), retrying in {:.1}s: {e}",
                    attempt + 1,
                    max_retries + 1,
                    delay.as_secs_f32(),
                );
                tokio::time::sleep(delay).await;
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error.unwrap_or_else(|| TransportError::Network {
        detail: "All retries exhausted with no error captured".to_string(),
    }))
}

/// `Retry-After` (capped) for rate limiting, exponential backoff otherwise.
fn retry_delay(error: &TransportError, attempt: u32) -> Duration {
    match error {
        TransportError::RateLimited {
            retry_after: Some(secs),
            ..
        } => Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS)),
        _ => backoff_delay(attempt),
    }
}

/// 100ms, 200ms, 400ms, ... capped at 10s.
fn backoff_delay(attempt: u32) -> Duration {
    let shift = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << shift).min(MAX_BACKOFF_MS);
    Duration::from_millis(delay_ms)
}

/// Accepts 2xx responses unless the envelope reports `"success": false`.
///
/// Bodies that are not an envelope at all are let through on 2xx so the
/// caller can report them as decode failures.
fn check_response(status: u16, path: &str, body: &[u8]) -> Result<(), TransportError> {
    let envelope = serde_json::from_slice::<ResponseEnvelope<IgnoredAny>>(body).ok();
    let ok_status = (200..300).contains(&status);

    match envelope {
        Some(env) if ok_status && env.success => Ok(()),
        None if ok_status => Ok(()),
        env => {
            let first = env.as_ref().and_then(|e| e.errors.first());
            let code = first.and_then(ResponseMessage::code_string);
            let message = match &env {
                Some(_) => first.map(|m| m.message.clone()),
                None => Some(body_for_log(body)),
            }
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| status_reason(status));
            Err(map_api_error(status, code, message, path))
        }
    }
}

fn status_reason(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown error")
        .to_string()
}

/// Maps a failed response to a [`TransportError`].
///
/// Reference: <https://developers.cloudflare.com/fundamentals/api/troubleshooting/>
fn map_api_error(status: u16, code: Option<String>, message: String, path: &str) -> TransportError {
    match (code.as_deref(), status) {
        // 6003: Invalid request headers
        // 6103: Invalid format for X-Auth-Key header
        // 6111: Invalid format for Authorization header
        // 9109: Unauthorized to access requested resource
        // 10000: Authentication error
        (Some("6003" | "6103" | "6111" | "9109" | "10000"), _) | (_, 401) => {
            TransportError::InvalidCredentials {
                raw_message: Some(message),
            }
        }
        (_, 403) => TransportError::PermissionDenied {
            raw_message: Some(message),
        },
        // 7000: No route for that URI
        // 7003: Could not route, perhaps the object identifier is invalid
        (Some("7000" | "7003"), _) | (_, 404) => TransportError::NotFound {
            path: path.to_string(),
            raw_message: Some(message),
        },
        _ => TransportError::Api {
            status,
            raw_code: code,
            message,
        },
    }
}
