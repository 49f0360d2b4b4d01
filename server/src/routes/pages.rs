//! Content routes proxying the CMS.
//!
//! Thin pass-through: the client renders whatever block layout the CMS
//! published, so these handlers only translate errors into HTTP statuses.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::services::cms::{CmsError, HeaderGlobal, PageDoc, PageSummary};
use crate::state::AppState;

/// `GET /api/pages` — published page summaries for navigation.
pub async fn list_pages(State(state): State<AppState>) -> Result<Json<Vec<PageSummary>>, StatusCode> {
    let pages = state.cms.list_pages().await.map_err(cms_error_to_status)?;
    Ok(Json(pages))
}

/// `GET /api/pages/:slug` — one published page with its block layout.
pub async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PageDoc>, StatusCode> {
    let page = state
        .cms
        .page_by_slug(&slug)
        .await
        .map_err(cms_error_to_status)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(page))
}

/// `GET /api/globals/header` — the header global with its nav items.
pub async fn get_header(State(state): State<AppState>) -> Result<Json<HeaderGlobal>, StatusCode> {
    let header = state.cms.header_global().await.map_err(cms_error_to_status)?;
    Ok(Json(header))
}

pub(crate) fn cms_error_to_status(err: CmsError) -> StatusCode {
    tracing::error!(error = %err, "CMS request failed");
    match err {
        CmsError::Status { status: 404, .. } => StatusCode::NOT_FOUND,
        CmsError::Request(_) | CmsError::Status { .. } | CmsError::Parse(_) => StatusCode::BAD_GATEWAY,
        CmsError::MissingEnv { .. } | CmsError::HttpClientBuild(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
