//! NocoDB REST API client.
//!
//! DESIGN
//! ======
//! Thin HTTP wrapper over the NocoDB meta (v2) and data (v1) APIs, one method
//! per remote operation the table blocks need. The client holds no state
//! beyond its connection pool and token: no caching, no retries, every call
//! is a live request authenticated with the `xc-token` header. Pure parsing
//! helpers keep response handling testable without a network.
//!
//! The API version split mirrors NocoDB itself: metadata (bases, tables,
//! columns) lives under `/api/v2/meta`, row CRUD under the older
//! `/api/v1/db/data/{org}` tree with its fixed `noco` org segment, and
//! related-record listings under `/api/v2/tables/{id}/records`.

use std::time::Duration;

use schema::{BaseMeta, Row, RowsPage, SourceParseError, TableMeta, TableSource};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{HttpTimeouts, env_parse_u64};

pub const DEFAULT_NOCODB_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_NOCODB_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Fixed org segment of the v1 data API path.
const DATA_ORG: &str = "noco";

/// Page size for related-record listings when the caller does not set one.
const RELATED_DEFAULT_LIMIT: u64 = 100;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by NocoDB client operations.
#[derive(Debug, thiserror::Error)]
pub enum NocoError {
    /// A required environment variable is not set.
    #[error("missing env var {var}")]
    MissingEnv { var: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request to NocoDB failed before a response arrived.
    #[error("NocoDB request failed: {0}")]
    Request(String),

    /// NocoDB returned a non-success HTTP status.
    #[error("NocoDB response error: status {status}")]
    Status { status: u16, body: String },

    /// The NocoDB response body could not be deserialized.
    #[error("NocoDB response parse failed: {0}")]
    Parse(String),

    /// No table matched a by-name source reference.
    #[error("no table matches {0:?}")]
    TableNotFound(String),

    /// A dotted source reference was malformed.
    #[error(transparent)]
    SourceFormat(#[from] SourceParseError),
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NocoConfig {
    pub base_url: String,
    pub api_token: String,
    pub timeouts: HttpTimeouts,
}

impl NocoConfig {
    /// Build typed NocoDB config from environment variables.
    ///
    /// Required:
    /// - `NOCODB_URL`: base URL of the NocoDB instance
    /// - `NOCODB_API_TOKEN`: `xc-token` value
    ///
    /// Optional:
    /// - `NOCODB_REQUEST_TIMEOUT_SECS`: default 30
    /// - `NOCODB_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`NocoError::MissingEnv`] when a required variable is unset.
    pub fn from_env() -> Result<Self, NocoError> {
        let base_url = std::env::var("NOCODB_URL")
            .map_err(|_| NocoError::MissingEnv { var: "NOCODB_URL".into() })?
            .trim_end_matches('/')
            .to_string();
        let api_token = std::env::var("NOCODB_API_TOKEN")
            .map_err(|_| NocoError::MissingEnv { var: "NOCODB_API_TOKEN".into() })?;
        let timeouts = HttpTimeouts {
            request_secs: env_parse_u64("NOCODB_REQUEST_TIMEOUT_SECS", DEFAULT_NOCODB_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("NOCODB_CONNECT_TIMEOUT_SECS", DEFAULT_NOCODB_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { base_url, api_token, timeouts })
    }
}

// =============================================================================
// QUERY OPTIONS
// =============================================================================

/// Listing options forwarded to the v1 data API. Only set fields become
/// query parameters; NocoDB applies its own defaults for the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    /// NocoDB filter expression, e.g. `(Status,eq,open)`.
    pub where_clause: Option<String>,
    /// Comma-separated sort spec; `-` prefix sorts descending.
    pub sort: Option<String>,
}

impl RowQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(where_clause) = &self.where_clause {
            params.push(("where", where_clause.clone()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
        }
        params
    }
}

/// Pagination for related-record listings. Unset fields fall back to
/// offset 0 and a page of [`RELATED_DEFAULT_LIMIT`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelatedQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct NocoClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl NocoClient {
    /// Build a NocoDB client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or the HTTP client
    /// fails to build.
    pub fn from_env() -> Result<Self, NocoError> {
        Self::from_config(NocoConfig::from_env()?)
    }

    /// Build a NocoDB client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: NocoConfig) -> Result<Self, NocoError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| NocoError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url, api_token: config.api_token })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All bases the API token can see.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status, or a
    /// malformed response body.
    pub async fn list_bases(&self) -> Result<Vec<BaseMeta>, NocoError> {
        let url = format!("{}/api/v2/meta/bases", self.base_url);
        let body = self.send(self.http.get(&url)).await?;
        parse_list(&body)
    }

    /// Tables of one base. The returned metas carry no columns; use
    /// [`NocoClient::table_metadata`] for the full column list.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status, or a
    /// malformed response body.
    pub async fn list_tables(&self, base_id: &str) -> Result<Vec<TableMeta>, NocoError> {
        let url = format!("{}/api/v2/meta/bases/{base_id}/tables", self.base_url);
        let body = self.send(self.http.get(&url)).await?;
        parse_list(&body)
    }

    /// Scan every base for a table whose title or raw table name matches
    /// `name` case-insensitively. First match wins. Returns the table
    /// together with its owning base id.
    ///
    /// # Errors
    ///
    /// Returns an error if any underlying meta listing fails.
    pub async fn find_table_by_name(&self, name: &str) -> Result<Option<(TableMeta, String)>, NocoError> {
        for base in self.list_bases().await? {
            let tables = self.list_tables(&base.id).await?;
            if let Some(table) = tables.into_iter().find(|table| table_name_matches(table, name)) {
                return Ok(Some((table, base.id)));
            }
        }
        Ok(None)
    }

    /// Full table metadata including columns. Absorbs all failures into
    /// `None` so a broken block reference degrades to "table unavailable"
    /// instead of failing the whole page.
    pub async fn table_metadata(&self, table_id: &str) -> Option<TableMeta> {
        let url = format!("{}/api/v2/meta/tables/{table_id}", self.base_url);
        let result = self.send(self.http.get(&url)).await.and_then(|body| parse_json(&body));
        match result {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::error!(error = %e, table_id, "table metadata fetch failed");
                None
            }
        }
    }

    /// One page of rows through the v1 data API.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status, or a
    /// malformed response body.
    pub async fn list_rows(&self, base_id: &str, table_id: &str, query: &RowQuery) -> Result<RowsPage, NocoError> {
        let url = self.data_url(base_id, table_id);
        let body = self.send(self.http.get(&url).query(&query.to_params())).await?;
        parse_json(&body)
    }

    /// Insert one row. NocoDB fills defaults and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status, or a
    /// malformed response body.
    pub async fn create_row(&self, base_id: &str, table_id: &str, fields: &Row) -> Result<Row, NocoError> {
        let url = self.data_url(base_id, table_id);
        let body = self.send(self.http.post(&url).json(fields)).await?;
        parse_row(&body)
    }

    /// Patch one row by primary key value.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status, or a
    /// malformed response body.
    pub async fn update_row(
        &self,
        base_id: &str,
        table_id: &str,
        row_id: &str,
        fields: &Row,
    ) -> Result<Row, NocoError> {
        let url = format!("{}/{row_id}", self.data_url(base_id, table_id));
        let body = self.send(self.http.patch(&url).json(fields)).await?;
        parse_row(&body)
    }

    /// Delete one row by primary key value.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or non-success status.
    pub async fn delete_row(&self, base_id: &str, table_id: &str, row_id: &str) -> Result<(), NocoError> {
        let url = format!("{}/{row_id}", self.data_url(base_id, table_id));
        self.send(self.http.delete(&url)).await?;
        Ok(())
    }

    /// Rows of a related table through the v2 records API. Used to offer
    /// link targets when editing relational fields.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status, or a
    /// malformed response body.
    pub async fn related_records(&self, table_id: &str, query: RelatedQuery) -> Result<Vec<Row>, NocoError> {
        let url = format!("{}/api/v2/tables/{table_id}/records", self.base_url);
        let params = [
            ("offset", query.offset.unwrap_or(0).to_string()),
            ("limit", query.limit.unwrap_or(RELATED_DEFAULT_LIMIT).to_string()),
        ];
        let body = self.send(self.http.get(&url).query(&params)).await?;
        parse_list(&body)
    }

    /// Turn a block's `source` reference into a concrete base/table pair.
    /// Dotted sources parse directly; bare names go through a meta scan.
    ///
    /// # Errors
    ///
    /// Returns [`NocoError::SourceFormat`] for a malformed dotted source and
    /// [`NocoError::TableNotFound`] when a by-name lookup finds nothing.
    pub async fn resolve_source(&self, source: &str) -> Result<TableSource, NocoError> {
        if source.contains('.') {
            return Ok(source.parse()?);
        }
        match self.find_table_by_name(source).await? {
            Some((table, base_id)) => Ok(TableSource::new(base_id, table.id)),
            None => Err(NocoError::TableNotFound(source.to_owned())),
        }
    }

    fn data_url(&self, base_id: &str, table_id: &str) -> String {
        format!("{}/api/v1/db/data/{DATA_ORG}/{base_id}/{table_id}", self.base_url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, NocoError> {
        let response = request
            .header("xc-token", &self.api_token)
            .send()
            .await
            .map_err(|e| NocoError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| NocoError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(NocoError::Status { status, body: text });
        }
        Ok(text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct ListEnvelope<T> {
    #[serde(default)]
    list: Vec<T>,
}

fn parse_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, NocoError> {
    let envelope: ListEnvelope<T> = serde_json::from_str(body).map_err(|e| NocoError::Parse(e.to_string()))?;
    Ok(envelope.list)
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, NocoError> {
    serde_json::from_str(body).map_err(|e| NocoError::Parse(e.to_string()))
}

fn parse_row(body: &str) -> Result<Row, NocoError> {
    match serde_json::from_str::<serde_json::Value>(body).map_err(|e| NocoError::Parse(e.to_string()))? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(NocoError::Parse("expected a row object".into())),
    }
}

fn table_name_matches(table: &TableMeta, name: &str) -> bool {
    table.title.eq_ignore_ascii_case(name) || table.table_name.eq_ignore_ascii_case(name)
}

#[cfg(test)]
#[path = "nocodb_test.rs"]
mod tests;
