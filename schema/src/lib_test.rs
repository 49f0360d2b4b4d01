use super::*;

fn text_column(id: &str, title: &str) -> TableColumn {
    TableColumn {
        id: id.to_owned(),
        title: title.to_owned(),
        column_name: Some(title.to_lowercase()),
        uidt: UiDataType::SingleLineText,
        dt: None,
        pk: false,
        rqd: false,
        unique: false,
        ai: false,
        cdf: None,
        dtxp: None,
        dtxs: None,
        description: None,
        fk_model_id: None,
        col_options: None,
    }
}

// =============================================================
// UiDataType parsing
// =============================================================

#[test]
fn uidt_parses_known_tags() {
    assert_eq!(UiDataType::from("LongText".to_owned()), UiDataType::LongText);
    assert_eq!(UiDataType::from("URL".to_owned()), UiDataType::Url);
    assert_eq!(UiDataType::from("PhoneNumber".to_owned()), UiDataType::PhoneNumber);
    assert_eq!(UiDataType::from("LinkToAnotherRecord".to_owned()), UiDataType::LinkToAnotherRecord);
}

#[test]
fn uidt_preserves_unknown_tags() {
    let uidt = UiDataType::from("GeoData".to_owned());
    assert_eq!(uidt, UiDataType::Other("GeoData".to_owned()));
    assert_eq!(uidt.as_str(), "GeoData");
}

#[test]
fn uidt_round_trips_through_string() {
    for raw in ["SingleLineText", "Checkbox", "DateTime", "URL", "SomeFutureType"] {
        let uidt = UiDataType::from(raw.to_owned());
        assert_eq!(String::from(uidt), raw);
    }
}

#[test]
fn uidt_deserializes_from_json_string() {
    let uidt: UiDataType = serde_json::from_str("\"Attachment\"").unwrap();
    assert_eq!(uidt, UiDataType::Attachment);
}

// =============================================================
// Input type lookup
// =============================================================

#[test]
fn input_type_maps_text_kinds_to_text() {
    assert_eq!(UiDataType::SingleLineText.html_input_type(), "text");
    assert_eq!(UiDataType::LongText.html_input_type(), "text");
    assert_eq!(UiDataType::Other("GeoData".to_owned()).html_input_type(), "text");
}

#[test]
fn input_type_maps_contact_kinds() {
    assert_eq!(UiDataType::Email.html_input_type(), "email");
    assert_eq!(UiDataType::Url.html_input_type(), "url");
    assert_eq!(UiDataType::PhoneNumber.html_input_type(), "tel");
}

#[test]
fn input_type_maps_numeric_kinds_to_number() {
    for uidt in [
        UiDataType::Number,
        UiDataType::Decimal,
        UiDataType::Currency,
        UiDataType::Percent,
        UiDataType::Rating,
        UiDataType::Duration,
    ] {
        assert_eq!(uidt.html_input_type(), "number");
    }
}

#[test]
fn input_type_distinguishes_date_and_datetime() {
    assert_eq!(UiDataType::Date.html_input_type(), "date");
    assert_eq!(UiDataType::DateTime.html_input_type(), "datetime-local");
    assert_eq!(UiDataType::Time.html_input_type(), "time");
}

#[test]
fn relational_kinds_detected() {
    assert!(UiDataType::LinkToAnotherRecord.is_relational());
    assert!(UiDataType::Links.is_relational());
    assert!(!UiDataType::Lookup.is_relational());
}

// =============================================================
// Column helpers
// =============================================================

#[test]
fn primary_key_column_finds_first_pk() {
    let mut id_col = text_column("c1", "Id");
    id_col.pk = true;
    let cols = vec![text_column("c0", "Name"), id_col, text_column("c2", "Notes")];

    let pk = primary_key_column(&cols).expect("pk column");
    assert_eq!(pk.id, "c1");
}

#[test]
fn primary_key_column_none_when_absent() {
    let cols = vec![text_column("c0", "Name")];
    assert!(primary_key_column(&cols).is_none());
}

#[test]
fn visible_columns_drop_system_columns() {
    let cols = vec![
        text_column("c0", "Name"),
        text_column("c1", "CreatedAt"),
        text_column("c2", "UpdatedAt"),
        text_column("c3", "Notes"),
    ];
    // column_name is lowercased by the fixture: created_at / updated_at.
    let mut with_names = cols;
    with_names[1].column_name = Some("created_at".to_owned());
    with_names[2].column_name = Some("Updated_At".to_owned());

    let visible = visible_columns(&with_names);
    let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c0", "c3"]);
}

#[test]
fn visible_columns_keep_columns_without_names() {
    let mut col = text_column("c0", "Formula");
    col.column_name = None;
    let cols = vec![col];
    assert_eq!(visible_columns(&cols).len(), 1);
}

#[test]
fn editable_rejects_pk_and_autoincrement() {
    let mut pk = text_column("c0", "Id");
    pk.pk = true;
    let mut ai = text_column("c1", "Seq");
    ai.ai = true;
    let plain = text_column("c2", "Name");

    assert!(!pk.is_editable());
    assert!(!ai.is_editable());
    assert!(plain.is_editable());
}

#[test]
fn related_table_id_reads_col_options() {
    let mut col = text_column("c0", "Author");
    col.uidt = UiDataType::LinkToAnotherRecord;
    col.col_options = Some(ColumnOptions {
        kind: Some("has_one".to_owned()),
        fk_related_model_id: Some("tbl_authors".to_owned()),
        ..ColumnOptions::default()
    });

    assert_eq!(col.related_table_id(), Some("tbl_authors"));
    assert_eq!(text_column("c1", "Name").related_table_id(), None);
}

// =============================================================
// Metadata deserialization
// =============================================================

#[test]
fn table_column_deserializes_nocodb_meta_shape() {
    let json = serde_json::json!({
        "id": "col_1",
        "title": "Due Date",
        "column_name": "due_date",
        "uidt": "DateTime",
        "dt": "timestamp",
        "pk": false,
        "rqd": true,
        "colOptions": { "type": "has_many", "fk_related_model_id": "tbl_x" }
    });

    let col: TableColumn = serde_json::from_value(json).unwrap();
    assert_eq!(col.uidt, UiDataType::DateTime);
    assert!(col.rqd);
    assert!(!col.ai);
    assert_eq!(col.related_table_id(), Some("tbl_x"));
}

#[test]
fn table_meta_defaults_columns_to_empty() {
    let json = serde_json::json!({
        "id": "tbl_1",
        "title": "Projects",
        "table_name": "projects",
        "base_id": "base_1"
    });

    let table: TableMeta = serde_json::from_value(json).unwrap();
    assert!(table.columns.is_empty());
    assert_eq!(table.base_id.as_deref(), Some("base_1"));
}

#[test]
fn rows_page_deserializes_camel_case_page_info() {
    let json = serde_json::json!({
        "list": [{ "Id": 1, "Name": "first" }],
        "pageInfo": { "totalRows": 41, "page": 1, "pageSize": 25, "isFirstPage": true, "isLastPage": false }
    });

    let page: RowsPage = serde_json::from_value(json).unwrap();
    assert_eq!(page.list.len(), 1);
    assert_eq!(page.page_info.total_rows, Some(41));
    assert_eq!(page.page_info.is_first_page, Some(true));
    assert_eq!(page.page_info.is_last_page, Some(false));
}

#[test]
fn rows_page_tolerates_missing_fields() {
    let page: RowsPage = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(page.list.is_empty());
    assert_eq!(page.page_info, PageInfo::default());
}

// =============================================================
// TableSource
// =============================================================

#[test]
fn source_parses_dotted_form() {
    let source: TableSource = "p123.t456".parse().unwrap();
    assert_eq!(source.base_id, "p123");
    assert_eq!(source.table_id, "t456");
    assert_eq!(source.to_string(), "p123.t456");
}

#[test]
fn source_rejects_missing_dot() {
    let err = "projects".parse::<TableSource>().unwrap_err();
    assert_eq!(err, SourceParseError::Malformed { input: "projects".to_owned() });
}

#[test]
fn source_rejects_extra_dot() {
    assert!("a.b.c".parse::<TableSource>().is_err());
}

#[test]
fn source_rejects_empty_halves() {
    assert!(".t456".parse::<TableSource>().is_err());
    assert!("p123.".parse::<TableSource>().is_err());
    assert!(".".parse::<TableSource>().is_err());
}
