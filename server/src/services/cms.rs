//! Payload CMS REST client.
//!
//! DESIGN
//! ======
//! Read-only client for the headless CMS that owns authored content: pages
//! with their block layout and the header global with its nav items. Pages
//! are addressed by slug and filtered to published versions, so drafts never
//! leave the CMS. Same shape as the NocoDB client: no caching, pure parsing
//! helpers, every call a live request.
//!
//! Block payloads are modeled just deeply enough to route them to the right
//! renderer; unrecognized `blockType` tags survive as [`Block::Unknown`] so a
//! newly configured CMS block degrades to nothing instead of a parse error.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{HttpTimeouts, env_parse_u64};

pub const DEFAULT_CMS_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CMS_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Cap on page listings; the sidebar shows everything, so this only guards
/// against runaway CMS content.
const PAGE_LIST_LIMIT: u64 = 100;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by CMS client operations.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// A required environment variable is not set.
    #[error("missing env var {var}")]
    MissingEnv { var: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request to the CMS failed before a response arrived.
    #[error("CMS request failed: {0}")]
    Request(String),

    /// The CMS returned a non-success HTTP status.
    #[error("CMS response error: status {status}")]
    Status { status: u16, body: String },

    /// The CMS response body could not be deserialized.
    #[error("CMS response parse failed: {0}")]
    Parse(String),
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeouts: HttpTimeouts,
}

impl CmsConfig {
    /// Build typed CMS config from environment variables.
    ///
    /// Required:
    /// - `PAYLOAD_URL`: base URL of the Payload instance
    ///
    /// Optional:
    /// - `PAYLOAD_API_TOKEN`: API key sent as `Authorization: users API-Key
    ///   <token>`; public published content needs none
    /// - `PAYLOAD_REQUEST_TIMEOUT_SECS`: default 30
    /// - `PAYLOAD_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::MissingEnv`] when `PAYLOAD_URL` is unset.
    pub fn from_env() -> Result<Self, CmsError> {
        let base_url = std::env::var("PAYLOAD_URL")
            .map_err(|_| CmsError::MissingEnv { var: "PAYLOAD_URL".into() })?
            .trim_end_matches('/')
            .to_string();
        let api_token = std::env::var("PAYLOAD_API_TOKEN").ok();
        let timeouts = HttpTimeouts {
            request_secs: env_parse_u64("PAYLOAD_REQUEST_TIMEOUT_SECS", DEFAULT_CMS_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("PAYLOAD_CONNECT_TIMEOUT_SECS", DEFAULT_CMS_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { base_url, api_token, timeouts })
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl CmsClient {
    /// Build a CMS client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PAYLOAD_URL` is missing or the HTTP client fails
    /// to build.
    pub fn from_env() -> Result<Self, CmsError> {
        Self::from_config(CmsConfig::from_env()?)
    }

    /// Build a CMS client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: CmsConfig) -> Result<Self, CmsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| CmsError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url, api_token: config.api_token })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Published page summaries for navigation, sorted by title.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status, or a
    /// malformed response body.
    pub async fn list_pages(&self) -> Result<Vec<PageSummary>, CmsError> {
        let url = format!("{}/api/pages", self.base_url);
        let params = [
            ("where[_status][equals]", "published".to_string()),
            ("limit", PAGE_LIST_LIMIT.to_string()),
            ("sort", "title".to_string()),
            ("depth", "0".to_string()),
        ];
        let body = self.send(self.http.get(&url).query(&params)).await?;
        parse_docs(&body)
    }

    /// One published page with its full block layout, or `None` when no
    /// published page carries the slug.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status, or a
    /// malformed response body.
    pub async fn page_by_slug(&self, slug: &str) -> Result<Option<PageDoc>, CmsError> {
        let url = format!("{}/api/pages", self.base_url);
        let params = [
            ("where[slug][equals]", slug.to_string()),
            ("where[_status][equals]", "published".to_string()),
            ("limit", "1".to_string()),
            ("depth", "1".to_string()),
        ];
        let body = self.send(self.http.get(&url).query(&params)).await?;
        Ok(parse_docs::<PageDoc>(&body)?.into_iter().next())
    }

    /// The header global with its configured nav items.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status, or a
    /// malformed response body.
    pub async fn header_global(&self) -> Result<HeaderGlobal, CmsError> {
        let url = format!("{}/api/globals/header", self.base_url);
        let body = self.send(self.http.get(&url).query(&[("depth", "1")])).await?;
        parse_json(&body)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, CmsError> {
        let request = match &self.api_token {
            Some(token) => request.header("Authorization", format!("users API-Key {token}")),
            None => request,
        };
        let response = request.send().await.map_err(|e| CmsError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| CmsError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(CmsError::Status { status, body: text });
        }
        Ok(text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Just enough of a page to list it in navigation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    pub title: String,
    pub slug: String,
}

/// A full page document: title plus the ordered block layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageDoc {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub layout: Vec<Block>,
}

/// One layout block. The CMS discriminates on `blockType`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "blockType")]
pub enum Block {
    #[serde(rename = "content")]
    Content(ContentBlockData),
    #[serde(rename = "tableBlock")]
    Table(TableBlockData),
    /// Any block kind this frontend has no renderer for.
    #[serde(other)]
    Unknown,
}

/// Authored prose block: optional heading plus Lexical rich text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlockData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Lexical editor state, passed through verbatim for the client renderer.
    #[serde(default)]
    pub content: Option<Value>,
    /// Named theme background: `light`, `dark`, `blue`, or `green`.
    #[serde(default)]
    pub background_color: Option<String>,
    /// Text alignment: `left`, `center`, or `right`.
    #[serde(default)]
    pub alignment: Option<String>,
}

/// Dynamic data block: renders a NocoDB table referenced by `source`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBlockData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `"baseId.tableId"` or a bare table name.
    pub source: String,
    #[serde(default)]
    pub page_size: Option<u64>,
}

/// The `header` global document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderGlobal {
    #[serde(default)]
    pub nav_items: Vec<NavItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub link: CmsLink,
}

/// A Payload link field: either a custom URL or a reference to a document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsLink {
    /// `reference` or `custom`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub new_tab: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub reference: Option<LinkReference>,
}

/// Target of a reference link. `value` is the populated document when the
/// query depth expanded it, otherwise a bare id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkReference {
    #[serde(rename = "relationTo")]
    pub relation_to: String,
    pub value: Value,
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
struct DocsEnvelope<T> {
    #[serde(default)]
    docs: Vec<T>,
}

fn parse_docs<T: serde::de::DeserializeOwned>(body: &str) -> Result<Vec<T>, CmsError> {
    let envelope: DocsEnvelope<T> = serde_json::from_str(body).map_err(|e| CmsError::Parse(e.to_string()))?;
    Ok(envelope.docs)
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, CmsError> {
    serde_json::from_str(body).map_err(|e| CmsError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "cms_test.rs"]
mod tests;
