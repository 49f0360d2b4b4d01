use super::*;

#[test]
fn page_endpoint_formats_expected_path() {
    assert_eq!(page_endpoint("about"), "/api/pages/about");
}

#[test]
fn table_endpoint_accepts_dotted_and_named_sources() {
    assert_eq!(table_endpoint("p1abc.m2def"), "/api/tables/p1abc.m2def");
    assert_eq!(table_endpoint("projects"), "/api/tables/projects");
}

#[test]
fn rows_endpoint_carries_paging_query() {
    assert_eq!(rows_endpoint("p1.m2", 10, 30), "/api/tables/p1.m2/rows?limit=10&offset=30");
}

#[test]
fn rows_collection_endpoint_has_no_query() {
    assert_eq!(rows_collection_endpoint("p1.m2"), "/api/tables/p1.m2/rows");
}

#[test]
fn row_endpoint_addresses_single_row() {
    assert_eq!(row_endpoint("p1.m2", "42"), "/api/tables/p1.m2/rows/42");
}

#[test]
fn related_endpoint_formats_expected_path() {
    assert_eq!(related_endpoint("m2def"), "/api/related/m2def");
}

#[test]
fn failure_messages_format_status() {
    assert_eq!(create_row_failed_message(422), "create row failed: 422");
    assert_eq!(update_row_failed_message(502), "update row failed: 502");
    assert_eq!(delete_row_failed_message(503), "delete row failed: 503");
}
