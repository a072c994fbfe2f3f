//! Shared test utilities.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::env;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use cf_regional_hostnames::{
    Method, RegionalHostnameClient, ResourceScope, Transport, TransportError,
};
use serde_json::Value;

/// Skips the test when any of the environment variables is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Asserts that an `Option` is `Some` and unwraps it (failing the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Asserts that a `Result` is `Ok` and unwraps it (failing the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// A request as seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// In-memory transport: records every call and replays scripted responses
/// in order.
#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Result<Vec<u8>, TransportError>>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a successful response body.
    pub fn respond_json(&self, body: &str) {
        self.push(Ok(body.as_bytes().to_vec()));
    }

    /// Queues a transport failure.
    pub fn respond_error(&self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(&self, response: Result<Vec<u8>, TransportError>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// The single recorded call; fails the test if there is not exactly one.
    pub fn only_call(&self) -> RecordedCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls.into_iter().next().unwrap_or_else(|| unreachable!())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Vec<u8>, TransportError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                method,
                path: path.to_string(),
                body,
            });

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Network {
                    detail: format!("no scripted response for {path}"),
                })
            })
    }
}

/// A client wired to a fresh [`MockTransport`].
pub fn mock_client() -> (RegionalHostnameClient, Arc<MockTransport>) {
    let transport = MockTransport::new();
    let client = RegionalHostnameClient::new(transport.clone());
    (client, transport)
}

/// Live test context built from the environment.
pub struct LiveContext {
    pub client: RegionalHostnameClient,
    pub account: ResourceScope,
    pub zone: ResourceScope,
    pub domain: String,
}

impl LiveContext {
    pub fn from_env() -> Option<Self> {
        let api_token = env::var("CLOUDFLARE_API_TOKEN").ok()?;
        let account_id = env::var("CLOUDFLARE_ACCOUNT_ID").ok()?;
        let zone_id = env::var("CLOUDFLARE_ZONE_ID").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        let client = RegionalHostnameClient::cloudflare(api_token).ok()?;

        Some(Self {
            client,
            account: ResourceScope::account(account_id),
            zone: ResourceScope::zone(zone_id),
            domain,
        })
    }

    /// Unique hostname under the test domain.
    pub fn test_hostname(&self) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        format!("rh-test-{}.{}", &id[..8], self.domain)
    }
}
