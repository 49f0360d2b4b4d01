//! REST API helpers for communicating with the server proxy.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since block data is
//! fetched after hydration.
//!
//! ERROR HANDLING
//! ==============
//! Read helpers return `Option` so a missing page or an unconfigured table
//! backend degrades to placeholder UI instead of crashing hydration. Write
//! helpers return `Result<_, String>` so row dialogs can surface the failure
//! in a toast.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{HeaderGlobal, PageDoc, PageSummary, Row, RowsPage, TableDescriptor};
#[cfg(feature = "hydrate")]
use serde::Deserialize;

#[cfg(any(test, feature = "hydrate"))]
fn page_endpoint(slug: &str) -> String {
    format!("/api/pages/{slug}")
}

#[cfg(any(test, feature = "hydrate"))]
fn table_endpoint(source: &str) -> String {
    format!("/api/tables/{source}")
}

#[cfg(any(test, feature = "hydrate"))]
fn rows_collection_endpoint(source: &str) -> String {
    format!("/api/tables/{source}/rows")
}

#[cfg(any(test, feature = "hydrate"))]
fn rows_endpoint(source: &str, limit: u32, offset: u32) -> String {
    format!("{}?limit={limit}&offset={offset}", rows_collection_endpoint(source))
}

#[cfg(any(test, feature = "hydrate"))]
fn row_endpoint(source: &str, row_id: &str) -> String {
    format!("/api/tables/{source}/rows/{row_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn related_endpoint(table_id: &str) -> String {
    format!("/api/related/{table_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn create_row_failed_message(status: u16) -> String {
    format!("create row failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn update_row_failed_message(status: u16) -> String {
    format!("update row failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn delete_row_failed_message(status: u16) -> String {
    format!("delete row failed: {status}")
}

/// Fetch all published pages from `/api/pages` for navigation.
/// Returns `None` on failure or on the server.
pub async fn fetch_pages() -> Option<Vec<PageSummary>> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/pages").send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<Vec<PageSummary>>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Fetch one published page by slug from `/api/pages/{slug}`.
/// Returns `None` when no published page matches.
pub async fn fetch_page(slug: &str) -> Option<PageDoc> {
    #[cfg(feature = "hydrate")]
    {
        let url = page_endpoint(slug);
        let resp = gloo_net::http::Request::get(&url).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<PageDoc>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = slug;
        None
    }
}

/// Fetch the site-wide header global from `/api/globals/header`.
pub async fn fetch_header() -> Option<HeaderGlobal> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/globals/header").send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<HeaderGlobal>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Fetch resolved table metadata from `/api/tables/{source}`.
/// Returns `None` if the source cannot be resolved or NocoDB is unreachable.
pub async fn fetch_table(source: &str) -> Option<TableDescriptor> {
    #[cfg(feature = "hydrate")]
    {
        let url = table_endpoint(source);
        let resp = gloo_net::http::Request::get(&url).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<TableDescriptor>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = source;
        None
    }
}

/// Fetch one page of rows from `/api/tables/{source}/rows`.
pub async fn fetch_rows(source: &str, limit: u32, offset: u32) -> Option<RowsPage> {
    #[cfg(feature = "hydrate")]
    {
        let url = rows_endpoint(source, limit, offset);
        let resp = gloo_net::http::Request::get(&url).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<RowsPage>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (source, limit, offset);
        None
    }
}

/// Fetch candidate link targets from `/api/related/{table_id}`. The server
/// answers a bare row array, not a paged listing.
pub async fn fetch_related(table_id: &str) -> Option<Vec<Row>> {
    #[cfg(feature = "hydrate")]
    {
        let url = related_endpoint(table_id);
        let resp = gloo_net::http::Request::get(&url).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<Vec<Row>>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = table_id;
        None
    }
}

/// Create a row via `POST /api/tables/{source}/rows`.
///
/// # Errors
///
/// Returns an error string if the HTTP request fails or the server responds
/// with a non-OK status.
pub async fn create_row(source: &str, fields: &Row) -> Result<Row, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = rows_collection_endpoint(source);
        let resp = gloo_net::http::Request::post(&url)
            .json(fields)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(create_row_failed_message(resp.status()));
        }
        resp.json::<Row>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (source, fields);
        Err("not available on server".to_owned())
    }
}

/// Update a row via `PATCH /api/tables/{source}/rows/{row_id}`.
///
/// # Errors
///
/// Returns an error string if the HTTP request fails or the server responds
/// with a non-OK status.
pub async fn update_row(source: &str, row_id: &str, fields: &Row) -> Result<Row, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = row_endpoint(source, row_id);
        let resp = gloo_net::http::Request::patch(&url)
            .json(fields)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(update_row_failed_message(resp.status()));
        }
        resp.json::<Row>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (source, row_id, fields);
        Err("not available on server".to_owned())
    }
}

#[cfg(feature = "hydrate")]
#[derive(Debug, Deserialize)]
struct DeleteRowResponse {
    ok: bool,
}

/// Delete a row via `DELETE /api/tables/{source}/rows/{row_id}`.
///
/// # Errors
///
/// Returns an error string if the HTTP request fails, the server responds
/// with a non-OK status, or the server reports the delete as not applied.
pub async fn delete_row(source: &str, row_id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let url = row_endpoint(source, row_id);
        let resp = gloo_net::http::Request::delete(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(delete_row_failed_message(resp.status()));
        }
        let body: DeleteRowResponse = resp.json().await.map_err(|e| e.to_string())?;
        if !body.ok {
            return Err("delete row failed".to_owned());
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (source, row_id);
        Err("not available on server".to_owned())
    }
}
