//! Resource scopes (account vs. zone) and the precondition check every
//! operation runs before touching the transport.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RegionalHostnameError, Result};

/// The kind of resource an endpoint is addressed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeLevel {
    /// `/accounts/{account_id}/...`
    Account,
    /// `/zones/{zone_id}/...`
    Zone,
}

impl fmt::Display for ScopeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account => f.write_str("account"),
            Self::Zone => f.write_str("zone"),
        }
    }
}

/// Target of an API call: an account or a zone, together with its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "level", content = "id", rename_all = "lowercase")]
pub enum ResourceScope {
    /// Account-level resource (e.g. the list of data localization regions).
    Account(String),
    /// Zone-level resource (e.g. the regional hostnames of a zone).
    Zone(String),
}

impl ResourceScope {
    pub fn account(id: impl Into<String>) -> Self {
        Self::Account(id.into())
    }

    pub fn zone(id: impl Into<String>) -> Self {
        Self::Zone(id.into())
    }

    pub fn level(&self) -> ScopeLevel {
        match self {
            Self::Account(_) => ScopeLevel::Account,
            Self::Zone(_) => ScopeLevel::Zone,
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Self::Account(id) | Self::Zone(id) => id,
        }
    }

    /// Checks that this scope is of the `required` kind and carries a
    /// non-empty identifier, returning the identifier on success.
    ///
    /// The level is checked before the identifier, so an empty zone ID
    /// passed to an account endpoint reports a scope mismatch.
    pub fn require(&self, required: ScopeLevel) -> Result<&str> {
        let supplied = self.level();
        if supplied != required {
            return Err(RegionalHostnameError::ScopeMismatch { required, supplied });
        }

        let id = self.identifier();
        if id.is_empty() {
            return Err(RegionalHostnameError::MissingIdentifier { level: required });
        }

        Ok(id)
    }
}

impl fmt::Display for ResourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.level(), self.identifier())
    }
}
