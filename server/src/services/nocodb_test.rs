use super::*;
use httpmock::Method::PATCH;
use httpmock::prelude::*;
use serde_json::json;

fn test_client(server: &MockServer) -> NocoClient {
    NocoClient::from_config(NocoConfig {
        base_url: server.base_url(),
        api_token: "test-token".into(),
        timeouts: HttpTimeouts { request_secs: 5, connect_secs: 2 },
    })
    .unwrap()
}

fn row(value: serde_json::Value) -> Row {
    value.as_object().expect("row fixture must be an object").clone()
}

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_nocodb_env() {
    unsafe {
        std::env::remove_var("NOCODB_URL");
        std::env::remove_var("NOCODB_API_TOKEN");
        std::env::remove_var("NOCODB_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("NOCODB_CONNECT_TIMEOUT_SECS");
    }
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn from_env_requires_vars_then_reads_overrides() {
    unsafe { clear_nocodb_env() };
    let err = NocoConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("NOCODB_URL"));

    unsafe {
        std::env::set_var("NOCODB_URL", "https://noco.example.test/");
        std::env::set_var("NOCODB_API_TOKEN", "xc-secret");
        std::env::set_var("NOCODB_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("NOCODB_CONNECT_TIMEOUT_SECS", "7");
    }

    let cfg = NocoConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://noco.example.test");
    assert_eq!(cfg.api_token, "xc-secret");
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: 42, connect_secs: 7 });

    unsafe { clear_nocodb_env() };
}

// =============================================================================
// QUERY PARAMS
// =============================================================================

#[test]
fn row_query_empty_produces_no_params() {
    assert!(RowQuery::default().to_params().is_empty());
}

#[test]
fn row_query_full_produces_all_params() {
    let query = RowQuery {
        limit: Some(10),
        offset: Some(20),
        where_clause: Some("(Status,eq,open)".into()),
        sort: Some("-Title".into()),
    };
    assert_eq!(
        query.to_params(),
        vec![
            ("limit", "10".to_string()),
            ("offset", "20".to_string()),
            ("where", "(Status,eq,open)".to_string()),
            ("sort", "-Title".to_string()),
        ]
    );
}

// =============================================================================
// META API
// =============================================================================

#[tokio::test]
async fn list_bases_sends_token_and_parses_list() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v2/meta/bases").header("xc-token", "test-token");
        then.status(200).json_body(json!({
            "list": [{"id": "b1", "title": "CRM", "status": "active"}]
        }));
    });

    let bases = test_client(&server).list_bases().await.unwrap();

    mock.assert();
    assert_eq!(bases.len(), 1);
    assert_eq!(bases[0].id, "b1");
    assert_eq!(bases[0].title, "CRM");
}

#[tokio::test]
async fn list_tables_hits_base_scoped_path() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v2/meta/bases/b1/tables");
        then.status(200).json_body(json!({
            "list": [{"id": "t1", "title": "Invoices", "table_name": "invoices"}]
        }));
    });

    let tables = test_client(&server).list_tables("b1").await.unwrap();

    mock.assert();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].id, "t1");
    assert!(tables[0].columns.is_empty());
}

#[tokio::test]
async fn find_table_by_name_is_case_insensitive_across_bases() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v2/meta/bases");
        then.status(200).json_body(json!({
            "list": [{"id": "b1", "title": "Empty"}, {"id": "b2", "title": "CRM"}]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v2/meta/bases/b1/tables");
        then.status(200).json_body(json!({"list": []}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v2/meta/bases/b2/tables");
        then.status(200).json_body(json!({
            "list": [
                {"id": "t1", "title": "Contacts", "table_name": "contacts"},
                {"id": "t2", "title": "Invoices", "table_name": "invoices"}
            ]
        }));
    });

    let found = test_client(&server).find_table_by_name("INVOICES").await.unwrap();

    let (table, base_id) = found.expect("table should be found");
    assert_eq!(table.id, "t2");
    assert_eq!(base_id, "b2");
}

#[tokio::test]
async fn find_table_by_name_returns_none_on_miss() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v2/meta/bases");
        then.status(200).json_body(json!({"list": [{"id": "b1", "title": "CRM"}]}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v2/meta/bases/b1/tables");
        then.status(200).json_body(json!({"list": []}));
    });

    let found = test_client(&server).find_table_by_name("nope").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn table_metadata_parses_columns() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v2/meta/tables/t1");
        then.status(200).json_body(json!({
            "id": "t1",
            "title": "Invoices",
            "table_name": "invoices",
            "base_id": "b1",
            "columns": [
                {"id": "c1", "title": "Id", "column_name": "id", "uidt": "Number", "pk": true, "ai": true},
                {"id": "c2", "title": "Customer", "uidt": "LinkToAnotherRecord",
                 "colOptions": {"type": "has_one", "fk_related_model_id": "t9"}}
            ]
        }));
    });

    let meta = test_client(&server).table_metadata("t1").await.expect("metadata should load");

    assert_eq!(meta.columns.len(), 2);
    assert_eq!(meta.columns[0].uidt, schema::UiDataType::Number);
    assert!(meta.columns[0].pk);
    assert_eq!(meta.columns[1].related_table_id(), Some("t9"));
}

#[tokio::test]
async fn table_metadata_absorbs_failures_into_none() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v2/meta/tables/missing");
        then.status(404).body("not found");
    });

    assert!(test_client(&server).table_metadata("missing").await.is_none());
}

// =============================================================================
// DATA API
// =============================================================================

#[tokio::test]
async fn list_rows_builds_v1_path_and_forwards_params() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/db/data/noco/b1/t1")
            .query_param("limit", "10")
            .query_param("offset", "20")
            .query_param("where", "(Status,eq,open)")
            .query_param("sort", "-Title");
        then.status(200).json_body(json!({
            "list": [{"Id": 1, "Title": "First"}],
            "pageInfo": {"totalRows": 21, "page": 3, "pageSize": 10, "isFirstPage": false, "isLastPage": true}
        }));
    });

    let query = RowQuery {
        limit: Some(10),
        offset: Some(20),
        where_clause: Some("(Status,eq,open)".into()),
        sort: Some("-Title".into()),
    };
    let page = test_client(&server).list_rows("b1", "t1", &query).await.unwrap();

    mock.assert();
    assert_eq!(page.list.len(), 1);
    assert_eq!(page.page_info.total_rows, Some(21));
    assert_eq!(page.page_info.is_last_page, Some(true));
}

#[tokio::test]
async fn create_row_posts_fields_and_returns_stored_row() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/db/data/noco/b1/t1")
            .json_body(json!({"Title": "New"}));
        then.status(200).json_body(json!({"Id": 7, "Title": "New"}));
    });

    let fields = row(json!({"Title": "New"}));
    let created = test_client(&server).create_row("b1", "t1", &fields).await.unwrap();

    mock.assert();
    assert_eq!(created.get("Id"), Some(&json!(7)));
}

#[tokio::test]
async fn update_row_patches_by_row_id() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/api/v1/db/data/noco/b1/t1/42")
            .json_body(json!({"Title": "Renamed"}));
        then.status(200).json_body(json!({"Id": 42, "Title": "Renamed"}));
    });

    let fields = row(json!({"Title": "Renamed"}));
    let updated = test_client(&server).update_row("b1", "t1", "42", &fields).await.unwrap();

    mock.assert();
    assert_eq!(updated.get("Title"), Some(&json!("Renamed")));
}

#[tokio::test]
async fn delete_row_ignores_numeric_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/api/v1/db/data/noco/b1/t1/42");
        then.status(200).body("1");
    });

    test_client(&server).delete_row("b1", "t1", "42").await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn non_success_status_surfaces_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/db/data/noco/b1/t1");
        then.status(422).body("bad filter");
    });

    let err = test_client(&server).list_rows("b1", "t1", &RowQuery::default()).await.unwrap_err();
    match err {
        NocoError::Status { status, body } => {
            assert_eq!(status, 422);
            assert_eq!(body, "bad filter");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn related_records_applies_default_paging() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v2/tables/t9/records")
            .query_param("offset", "0")
            .query_param("limit", "100");
        then.status(200).json_body(json!({"list": [{"Id": 1, "Name": "Acme"}]}));
    });

    let records = test_client(&server).related_records("t9", RelatedQuery::default()).await.unwrap();

    mock.assert();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("Name"), Some(&json!("Acme")));
}

// =============================================================================
// SOURCE RESOLUTION
// =============================================================================

#[tokio::test]
async fn resolve_source_parses_dotted_without_network() {
    let server = MockServer::start();
    let source = test_client(&server).resolve_source("b1.t1").await.unwrap();
    assert_eq!(source, TableSource::new("b1", "t1"));
}

#[tokio::test]
async fn resolve_source_rejects_malformed_dotted() {
    let server = MockServer::start();
    let err = test_client(&server).resolve_source("a.b.c").await.unwrap_err();
    assert!(matches!(err, NocoError::SourceFormat(_)));
}

#[tokio::test]
async fn resolve_source_falls_back_to_name_lookup() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v2/meta/bases");
        then.status(200).json_body(json!({"list": [{"id": "b1", "title": "CRM"}]}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v2/meta/bases/b1/tables");
        then.status(200).json_body(json!({
            "list": [{"id": "t1", "title": "Invoices", "table_name": "invoices"}]
        }));
    });

    let source = test_client(&server).resolve_source("invoices").await.unwrap();
    assert_eq!(source, TableSource::new("b1", "t1"));
}

#[tokio::test]
async fn resolve_source_unknown_name_errors() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v2/meta/bases");
        then.status(200).json_body(json!({"list": []}));
    });

    let err = test_client(&server).resolve_source("ghost").await.unwrap_err();
    assert!(matches!(err, NocoError::TableNotFound(name) if name == "ghost"));
}

// =============================================================================
// PARSING
// =============================================================================

#[test]
fn parse_list_tolerates_missing_list_key() {
    let bases: Vec<BaseMeta> = parse_list("{}").unwrap();
    assert!(bases.is_empty());
}

#[test]
fn parse_row_rejects_non_objects() {
    let err = parse_row("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, NocoError::Parse(_)));
}
