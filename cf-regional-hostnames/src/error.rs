use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scope::ScopeLevel;

/// Error returned by [`RegionalHostnameClient`](crate::RegionalHostnameClient) operations.
///
/// Validation errors ([`ScopeMismatch`](Self::ScopeMismatch),
/// [`MissingIdentifier`](Self::MissingIdentifier)) are raised before any
/// request is sent. Transport failures are passed through untouched.
#[derive(Debug, Error)]
pub enum RegionalHostnameError {
    /// The operation was invoked with an account scope where a zone scope is
    /// required, or vice versa.
    #[error(
        "requested resource container (\"{supplied}\") is not supported for this endpoint, expected \"{required}\""
    )]
    ScopeMismatch {
        /// Scope kind the endpoint is addressed under.
        required: ScopeLevel,
        /// Scope kind the caller supplied.
        supplied: ScopeLevel,
    },

    /// The scope carries an empty account or zone ID.
    #[error("required missing {level} ID")]
    MissingIdentifier {
        /// Scope kind whose identifier is missing.
        level: ScopeLevel,
    },

    /// The transport failed (connectivity, authentication, non-success status).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body did not match the expected envelope.
    #[error("error unmarshalling the JSON response for {operation}: {source}")]
    Decode {
        /// Operation whose response failed to decode.
        operation: &'static str,
        source: serde_json::Error,
    },

    /// The request payload could not be converted to JSON.
    #[error("error marshalling the JSON request for {operation}: {source}")]
    Encode {
        /// Operation whose request failed to encode.
        operation: &'static str,
        source: serde_json::Error,
    },
}

impl RegionalHostnameError {
    /// `true` for errors raised by scope validation, before any network call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ScopeMismatch { .. } | Self::MissingIdentifier { .. }
        )
    }

    /// The underlying transport error, if this error came from the network layer.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

/// Convenience type alias for `Result<T, RegionalHostnameError>`.
pub type Result<T> = std::result::Result<T, RegionalHostnameError>;

/// Failure reported by a [`Transport`](crate::Transport).
///
/// The client treats this value as opaque; it is only interpreted by the
/// built-in [`CloudflareTransport`](crate::CloudflareTransport) for retries.
///
/// # Retryable Errors
///
/// - [`Network`](Self::Network)
/// - [`Timeout`](Self::Timeout)
/// - [`RateLimited`](Self::RateLimited)
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum TransportError {
    /// Connection refused, DNS failure, broken body stream, HTTP 502-504.
    #[error("Network error: {detail}")]
    Network { detail: String },

    /// The request exceeded its timeout.
    #[error("Request timeout: {detail}")]
    Timeout { detail: String },

    /// HTTP 429.
    #[error("Rate limited{}", retry_suffix(.retry_after))]
    RateLimited {
        /// Seconds to wait, from the `Retry-After` header.
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    /// The API token is missing, malformed or expired.
    #[error("Invalid credentials{}", message_suffix(.raw_message))]
    InvalidCredentials { raw_message: Option<String> },

    /// The token is valid but lacks permission for the resource.
    #[error("Permission denied{}", message_suffix(.raw_message))]
    PermissionDenied { raw_message: Option<String> },

    /// The addressed resource (zone, account, hostname) does not exist.
    #[error("Resource '{path}' not found{}", message_suffix(.raw_message))]
    NotFound {
        path: String,
        raw_message: Option<String>,
    },

    /// Any other non-success response.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        /// First error code from the response envelope, if any.
        raw_code: Option<String>,
        message: String,
    },

    /// The transport could not be constructed.
    #[error("Configuration error: {detail}")]
    Configuration { detail: String },
}

impl TransportError {
    /// Whether the failure is transient and the request may succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

#[allow(clippy::ref_option)]
fn message_suffix(raw_message: &Option<String>) -> String {
    raw_message
        .as_deref()
        .map_or_else(String::new, |msg| format!(": {msg}"))
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
fn retry_suffix(retry_after: &Option<u64>) -> String {
    retry_after.map_or_else(String::new, |secs| format!(" (retry after {secs}s)"))
}
