//! Regional hostnames operations.
//!
//! API reference: <https://developers.cloudflare.com/data-localization/regional-services/get-started/#configure-regional-services-via-api>

use std::borrow::Cow;
use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::TransportConfig;
use crate::error::{RegionalHostnameError, Result};
use crate::http_client::CloudflareTransport;
use crate::scope::{ResourceScope, ScopeLevel};
use crate::traits::Transport;
use crate::types::{Region, RegionalHostname, ResponseEnvelope};

/// Client for the Data Localization regional hostnames endpoints.
///
/// Holds nothing but the transport handle, so it is cheap to clone and safe
/// to share between tasks.
#[derive(Clone)]
pub struct RegionalHostnameClient {
    transport: Arc<dyn Transport>,
}

impl RegionalHostnameClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client backed by a [`CloudflareTransport`] with default settings.
    pub fn cloudflare(api_token: impl Into<String>) -> Result<Self> {
        Self::cloudflare_with_config(api_token, TransportConfig::default())
    }

    pub fn cloudflare_with_config(
        api_token: impl Into<String>,
        config: TransportConfig,
    ) -> Result<Self> {
        let transport = CloudflareTransport::with_config(api_token, config)?;
        Ok(Self::new(Arc::new(transport)))
    }

    /// Lists the regions available to an account.
    pub async fn list_regions(&self, scope: &ResourceScope) -> Result<Vec<Region>> {
        let account_id = scope.require(ScopeLevel::Account)?;
        let path = format!(
            "/accounts/{}/addressing/regional_hostnames/regions",
            path_segment(account_id)
        );

        let raw = self.transport.execute(Method::GET, &path, None).await?;
        decode_list(&raw, "list regions")
    }

    /// Lists the regional hostnames of a zone.
    pub async fn list_regional_hostnames(
        &self,
        scope: &ResourceScope,
    ) -> Result<Vec<RegionalHostname>> {
        let path = hostnames_path(scope)?;

        let raw = self.transport.execute(Method::GET, &path, None).await?;
        decode_list(&raw, "list regional hostnames")
    }

    /// Creates a regional hostname.
    ///
    /// `created_on` is stripped from the request; the service assigns it and
    /// rejects requests that carry one.
    pub async fn create_regional_hostname(
        &self,
        scope: &ResourceScope,
        input: &RegionalHostname,
    ) -> Result<RegionalHostname> {
        const OPERATION: &str = "create regional hostname";

        let path = hostnames_path(scope)?;

        let body = RegionalHostname {
            created_on: None,
            ..input.clone()
        };
        let body = encode_body(&body, OPERATION)?;

        let raw = self
            .transport
            .execute(Method::POST, &path, Some(body))
            .await?;
        decode_one(&raw, OPERATION)
    }

    /// Fetches a regional hostname by name.
    pub async fn get_regional_hostname(
        &self,
        scope: &ResourceScope,
        hostname: &str,
    ) -> Result<RegionalHostname> {
        let path = hostname_path(scope, hostname)?;

        let raw = self.transport.execute(Method::GET, &path, None).await?;
        decode_one(&raw, "get regional hostname")
    }

    /// Moves a regional hostname to `input.region_key`.
    ///
    /// Only the region key is sent; the hostname addresses the resource and
    /// `created_on` is owned by the service.
    pub async fn update_regional_hostname(
        &self,
        scope: &ResourceScope,
        input: &RegionalHostname,
    ) -> Result<RegionalHostname> {
        const OPERATION: &str = "update regional hostname";

        #[derive(Serialize)]
        struct UpdateRegionalHostnameBody<'a> {
            region_key: &'a str,
        }

        let path = hostname_path(scope, &input.hostname)?;
        let body = encode_body(
            &UpdateRegionalHostnameBody {
                region_key: &input.region_key,
            },
            OPERATION,
        )?;

        let raw = self
            .transport
            .execute(Method::PATCH, &path, Some(body))
            .await?;
        decode_one(&raw, OPERATION)
    }

    /// Deletes a regional hostname.
    pub async fn delete_regional_hostname(
        &self,
        scope: &ResourceScope,
        hostname: &str,
    ) -> Result<()> {
        let path = hostname_path(scope, hostname)?;

        self.transport.execute(Method::DELETE, &path, None).await?;
        Ok(())
    }
}

impl std::fmt::Debug for RegionalHostnameClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionalHostnameClient").finish_non_exhaustive()
    }
}

/// `/zones/{zone_id}/addressing/regional_hostnames`
fn hostnames_path(scope: &ResourceScope) -> Result<String> {
    let zone_id = scope.require(ScopeLevel::Zone)?;
    Ok(format!(
        "/zones/{}/addressing/regional_hostnames",
        path_segment(zone_id)
    ))
}

/// `/zones/{zone_id}/addressing/regional_hostnames/{hostname}`
fn hostname_path(scope: &ResourceScope, hostname: &str) -> Result<String> {
    Ok(format!(
        "{}/{}",
        hostnames_path(scope)?,
        path_segment(hostname)
    ))
}

/// Escapes only the characters that would end or split a path segment.
/// Everything else, including the `*` of wildcard hostnames, is sent as-is.
fn path_segment(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['%', '/', '?', '#']) {
        return Cow::Borrowed(raw);
    }

    let mut escaped = String::with_capacity(raw.len() + 6);
    for ch in raw.chars() {
        match ch {
            '%' => escaped.push_str("%25"),
            '/' => escaped.push_str("%2F"),
            '?' => escaped.push_str("%3F"),
            '#' => escaped.push_str("%23"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

fn encode_body<B: Serialize>(body: &B, operation: &'static str) -> Result<Value> {
    serde_json::to_value(body).map_err(|source| RegionalHostnameError::Encode { operation, source })
}

fn decode_envelope<T: DeserializeOwned>(
    raw: &[u8],
    operation: &'static str,
) -> Result<ResponseEnvelope<T>> {
    serde_json::from_slice(raw).map_err(|source| {
        log::error!("Failed to decode {operation} response: {source}");
        RegionalHostnameError::Decode { operation, source }
    })
}

/// A missing or `null` result is an empty list.
fn decode_list<T: DeserializeOwned>(raw: &[u8], operation: &'static str) -> Result<Vec<T>> {
    let envelope: ResponseEnvelope<Vec<T>> = decode_envelope(raw, operation)?;
    let items = envelope.result.unwrap_or_default();
    log::debug!("{operation}: {} item(s)", items.len());
    Ok(items)
}

fn decode_one<T: DeserializeOwned>(raw: &[u8], operation: &'static str) -> Result<T> {
    let envelope: ResponseEnvelope<T> = decode_envelope(raw, operation)?;
    envelope.result.ok_or_else(|| RegionalHostnameError::Decode {
        operation,
        source: <serde_json::Error as serde::de::Error>::missing_field("result"),
    })
}
