//! # cf-regional-hostnames
//!
//! Typed client for Cloudflare's Data Localization **regional hostnames**
//! API: list the regions available to an account, and create, read, update
//! and delete the regional hostnames of a zone.
//!
//! | Operation | Scope | Endpoint |
//! |-----------|-------|----------|
//! | [`list_regions`](RegionalHostnameClient::list_regions) | account | `GET /accounts/{id}/addressing/regional_hostnames/regions` |
//! | [`list_regional_hostnames`](RegionalHostnameClient::list_regional_hostnames) | zone | `GET /zones/{id}/addressing/regional_hostnames` |
//! | [`create_regional_hostname`](RegionalHostnameClient::create_regional_hostname) | zone | `POST /zones/{id}/addressing/regional_hostnames` |
//! | [`get_regional_hostname`](RegionalHostnameClient::get_regional_hostname) | zone | `GET /zones/{id}/addressing/regional_hostnames/{hostname}` |
//! | [`update_regional_hostname`](RegionalHostnameClient::update_regional_hostname) | zone | `PATCH /zones/{id}/addressing/regional_hostnames/{hostname}` |
//! | [`delete_regional_hostname`](RegionalHostnameClient::delete_regional_hostname) | zone | `DELETE /zones/{id}/addressing/regional_hostnames/{hostname}` |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cf_regional_hostnames::{RegionalHostname, RegionalHostnameClient, ResourceScope};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RegionalHostnameClient::cloudflare("your-api-token")?;
//!
//!     let regions = client
//!         .list_regions(&ResourceScope::account("account-id"))
//!         .await?;
//!     for region in &regions {
//!         println!("{} ({})", region.label, region.key);
//!     }
//!
//!     let zone = ResourceScope::zone("zone-id");
//!     let created = client
//!         .create_regional_hostname(&zone, &RegionalHostname::new("eu.example.com", "eu"))
//!         .await?;
//!     println!("created at {:?}", created.created_on);
//!
//!     client.delete_regional_hostname(&zone, "eu.example.com").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Custom transports
//!
//! The client only builds requests and decodes responses. Anything that
//! implements [`Transport`] can carry them, which is how the tests run
//! without a network.
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, RegionalHostnameError>`](RegionalHostnameError):
//!
//! - [`RegionalHostnameError::ScopeMismatch`] / [`RegionalHostnameError::MissingIdentifier`]
//!   — rejected before any request is sent
//! - [`RegionalHostnameError::Transport`] — the [`TransportError`] as reported
//! - [`RegionalHostnameError::Decode`] — the response was not the expected JSON
//!
//! The client never retries. [`CloudflareTransport`] retries network errors,
//! timeouts and rate limiting with exponential backoff.

mod client;
mod config;
mod error;
mod http_client;
mod scope;
mod traits;
mod types;
mod utils;

pub use client::RegionalHostnameClient;
pub use config::{CF_API_BASE, TransportConfig};
pub use error::{RegionalHostnameError, Result, TransportError};
pub use http_client::CloudflareTransport;
pub use scope::{ResourceScope, ScopeLevel};
pub use traits::Transport;
pub use types::{Region, RegionalHostname};

// Re-exported so `Transport` implementors don't need a direct reqwest dependency.
pub use reqwest::Method;
