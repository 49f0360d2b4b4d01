use super::*;
use crate::state::test_helpers::test_app_state;
use httpmock::prelude::*;
use serde_json::json;

#[test]
fn cms_error_maps_upstream_404_to_not_found() {
    let err = CmsError::Status { status: 404, body: String::new() };
    assert_eq!(cms_error_to_status(err), StatusCode::NOT_FOUND);
}

#[test]
fn cms_error_maps_failures_to_bad_gateway() {
    assert_eq!(cms_error_to_status(CmsError::Request("timeout".into())), StatusCode::BAD_GATEWAY);
    assert_eq!(cms_error_to_status(CmsError::Parse("bad json".into())), StatusCode::BAD_GATEWAY);
    let upstream = CmsError::Status { status: 500, body: String::new() };
    assert_eq!(cms_error_to_status(upstream), StatusCode::BAD_GATEWAY);
}

#[test]
fn cms_error_maps_config_problems_to_unavailable() {
    let err = CmsError::MissingEnv { var: "PAYLOAD_URL".into() };
    assert_eq!(cms_error_to_status(err), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn list_pages_passes_summaries_through() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/pages");
        then.status(200).json_body(json!({"docs": [{"title": "Home", "slug": "home"}]}));
    });

    let state = test_app_state(&server.base_url(), None);
    let Json(pages) = list_pages(State(state)).await.unwrap();
    assert_eq!(pages, vec![PageSummary { title: "Home".into(), slug: "home".into() }]);
}

#[tokio::test]
async fn get_page_translates_miss_into_404() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/pages");
        then.status(200).json_body(json!({"docs": []}));
    });

    let state = test_app_state(&server.base_url(), None);
    let err = get_page(State(state), Path("ghost".into())).await.unwrap_err();
    assert_eq!(err, StatusCode::NOT_FOUND);
}
