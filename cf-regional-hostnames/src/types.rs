//! Domain values and wire shapes for the regional hostnames API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A data localization region available to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Region key, e.g. `eu` or `us`.
    pub key: String,
    /// Human readable label, e.g. `European Union`.
    pub label: String,
}

/// A hostname whose traffic is constrained to a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalHostname {
    /// DNS name, unique within the zone. Wildcards (`*.example.com`) are allowed.
    pub hostname: String,
    /// Key of the [`Region`] the hostname is pinned to.
    pub region_key: String,
    /// Assigned by the service; never sent on create.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub created_on: Option<DateTime<Utc>>,
}

impl RegionalHostname {
    pub fn new(hostname: impl Into<String>, region_key: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            region_key: region_key.into(),
            created_on: None,
        }
    }
}

/// Standard API response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<ResponseMessage>,
    #[serde(default)]
    #[allow(dead_code)]
    pub messages: Vec<ResponseMessage>,
}

/// Entry of the envelope's `errors` / `messages` arrays.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResponseMessage {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub message: String,
}

impl ResponseMessage {
    /// The code as a string; the API emits integers, some proxies strings.
    pub fn code_string(&self) -> Option<String> {
        match self.code.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

const fn default_success() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn hostname_without_created_on_omits_field() {
        let hostname = RegionalHostname::new("www.example.com", "eu");
        let json = serde_json::to_value(&hostname).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"hostname": "www.example.com", "region_key": "eu"})
        );
    }

    #[test]
    fn hostname_with_created_on_serializes_rfc3339() {
        let hostname = RegionalHostname {
            created_on: Utc.with_ymd_and_hms(2023, 1, 13, 23, 59, 45).single(),
            ..RegionalHostname::new("www.example.com", "eu")
        };
        let json = serde_json::to_value(&hostname).unwrap();
        assert_eq!(json["created_on"], "2023-01-13T23:59:45Z");
    }

    #[test]
    fn response_without_created_on_is_none() {
        let hostname: RegionalHostname =
            serde_json::from_str(r#"{"hostname":"a.example.com","region_key":"us"}"#).unwrap();
        assert_eq!(hostname, RegionalHostname::new("a.example.com", "us"));
    }

    #[test]
    fn envelope_tolerates_missing_metadata() {
        let env: ResponseEnvelope<Vec<Region>> =
            serde_json::from_str(r#"{"result":[{"key":"us","label":"United States"}]}"#).unwrap();
        assert!(env.success);
        assert_eq!(
            env.result.unwrap(),
            vec![Region {
                key: "us".to_string(),
                label: "United States".to_string()
            }]
        );
    }

    #[test]
    fn envelope_null_result() {
        let env: ResponseEnvelope<Vec<Region>> =
            serde_json::from_str(r#"{"success":true,"errors":[],"messages":[],"result":null}"#)
                .unwrap();
        assert!(env.result.is_none());
    }

    #[test]
    fn message_code_forms() {
        let env: ResponseEnvelope<()> = serde_json::from_str(
            r#"{"success":false,"errors":[{"code":1000,"message":"a"},{"code":"7003","message":"b"},{"message":"c"}]}"#,
        )
        .unwrap();
        let codes: Vec<_> = env.errors.iter().map(ResponseMessage::code_string).collect();
        assert_eq!(
            codes,
            vec![Some("1000".to_string()), Some("7003".to_string()), None]
        );
    }
}
