//! Utility modules.

/// Serde helpers for the optional, server-assigned `created_on` timestamp.
pub mod datetime;

/// Keeps response bodies and tokens out of logs in full.
pub mod log_sanitizer;
