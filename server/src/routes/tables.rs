//! Table routes proxying NocoDB.
//!
//! All dynamic-table traffic flows through here: table blocks name a
//! `source`, the server resolves it against NocoDB metadata, and row CRUD is
//! forwarded verbatim. The NocoDB token never leaves the server.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use schema::{Row, RowsPage, TableColumn};
use serde::{Deserialize, Serialize};

use crate::services::nocodb::{NocoClient, NocoError, RelatedQuery, RowQuery};
use crate::state::AppState;

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Resolved table shape handed to table blocks: canonical address plus the
/// full column schema. Visibility and editability stay client decisions.
#[derive(Debug, Serialize)]
pub struct TableDescriptor {
    /// Canonical dotted source, even when the block referenced a bare name.
    pub source: String,
    pub title: String,
    pub columns: Vec<TableColumn>,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct RowListParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    #[serde(rename = "where")]
    pub where_clause: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RelatedListParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/tables/:source` — resolve a block source to its table schema.
pub async fn get_table(
    State(state): State<AppState>,
    Path(source): Path<String>,
) -> Result<Json<TableDescriptor>, StatusCode> {
    let noco = require_noco(&state)?;
    let resolved = noco.resolve_source(&source).await.map_err(noco_error_to_status)?;
    let meta = noco.table_metadata(&resolved.table_id).await.ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(TableDescriptor { source: resolved.to_string(), title: meta.title, columns: meta.columns }))
}

/// `GET /api/tables/:source/rows` — one page of rows.
pub async fn list_rows(
    State(state): State<AppState>,
    Path(source): Path<String>,
    Query(params): Query<RowListParams>,
) -> Result<Json<RowsPage>, StatusCode> {
    let noco = require_noco(&state)?;
    let resolved = noco.resolve_source(&source).await.map_err(noco_error_to_status)?;
    let query = RowQuery {
        limit: params.limit,
        offset: params.offset,
        where_clause: params.where_clause,
        sort: params.sort,
    };
    let page = noco
        .list_rows(&resolved.base_id, &resolved.table_id, &query)
        .await
        .map_err(noco_error_to_status)?;
    Ok(Json(page))
}

/// `POST /api/tables/:source/rows` — insert one row.
pub async fn create_row(
    State(state): State<AppState>,
    Path(source): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Row>), StatusCode> {
    let noco = require_noco(&state)?;
    let fields = row_fields(body)?;
    let resolved = noco.resolve_source(&source).await.map_err(noco_error_to_status)?;
    let created = noco
        .create_row(&resolved.base_id, &resolved.table_id, &fields)
        .await
        .map_err(noco_error_to_status)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PATCH /api/tables/:source/rows/:row_id` — patch one row.
pub async fn update_row(
    State(state): State<AppState>,
    Path((source, row_id)): Path<(String, String)>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Row>, StatusCode> {
    let noco = require_noco(&state)?;
    let fields = row_fields(body)?;
    let resolved = noco.resolve_source(&source).await.map_err(noco_error_to_status)?;
    let updated = noco
        .update_row(&resolved.base_id, &resolved.table_id, &row_id, &fields)
        .await
        .map_err(noco_error_to_status)?;
    Ok(Json(updated))
}

/// `DELETE /api/tables/:source/rows/:row_id` — delete one row.
pub async fn delete_row(
    State(state): State<AppState>,
    Path((source, row_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let noco = require_noco(&state)?;
    let resolved = noco.resolve_source(&source).await.map_err(noco_error_to_status)?;
    noco.delete_row(&resolved.base_id, &resolved.table_id, &row_id)
        .await
        .map_err(noco_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `GET /api/related/:table_id` — link targets for relational fields.
pub async fn related_records(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
    Query(params): Query<RelatedListParams>,
) -> Result<Json<Vec<Row>>, StatusCode> {
    let noco = require_noco(&state)?;
    let query = RelatedQuery { limit: params.limit, offset: params.offset };
    let records = noco.related_records(&table_id, query).await.map_err(noco_error_to_status)?;
    Ok(Json(records))
}

// =============================================================================
// HELPERS
// =============================================================================

fn require_noco(state: &AppState) -> Result<Arc<NocoClient>, StatusCode> {
    state.noco.clone().ok_or(StatusCode::SERVICE_UNAVAILABLE)
}

/// Row bodies must be JSON objects; anything else is a client error.
fn row_fields(body: serde_json::Value) -> Result<Row, StatusCode> {
    match body {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

pub(crate) fn noco_error_to_status(err: NocoError) -> StatusCode {
    tracing::error!(error = %err, "NocoDB request failed");
    match err {
        NocoError::TableNotFound(_) | NocoError::Status { status: 404, .. } => StatusCode::NOT_FOUND,
        NocoError::SourceFormat(_) => StatusCode::BAD_REQUEST,
        NocoError::Request(_) | NocoError::Status { .. } | NocoError::Parse(_) => StatusCode::BAD_GATEWAY,
        NocoError::MissingEnv { .. } | NocoError::HttpClientBuild(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[cfg(test)]
#[path = "tables_test.rs"]
mod tests;
