//! Upstream API clients used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the HTTP conversation with each upstream (Payload CMS
//! for authored content, NocoDB for dynamic table data) so route handlers can
//! stay focused on extraction and status mapping. Neither service keeps state
//! beyond its `reqwest` client; every call is a fresh proxied request.

pub mod cms;
pub mod nocodb;

/// Request/connect timeout pair shared by both upstream clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

pub(crate) fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
