use super::*;
use serde_json::json;

// =============================================================
// first_attachment
// =============================================================

#[test]
fn first_attachment_parses_stored_array() {
    let raw = r#"[{"title":"report.pdf","mimetype":"application/pdf","size":2048}]"#;
    let info = first_attachment(raw).unwrap();
    assert_eq!(info.title, "report.pdf");
    assert_eq!(info.size_bytes, 2048.0);
}

#[test]
fn first_attachment_accepts_bare_descriptor() {
    let info = first_attachment(r#"{"title":"a.png","size":512}"#).unwrap();
    assert_eq!(info.title, "a.png");
}

#[test]
fn first_attachment_defaults_missing_fields() {
    let info = first_attachment(r#"[{"size":100}]"#).unwrap();
    assert_eq!(info.title, "file");
    let info = first_attachment(r#"[{"title":"x"}]"#).unwrap();
    assert_eq!(info.size_bytes, 0.0);
}

#[test]
fn first_attachment_rejects_non_attachment_strings() {
    assert_eq!(first_attachment(""), None);
    assert_eq!(first_attachment("hello"), None);
    assert_eq!(first_attachment("[]"), None);
    assert_eq!(first_attachment("[1, 2]"), None);
}

// =============================================================
// Encoding and formatting
// =============================================================

#[test]
fn format_size_kb_rounds_to_tenths() {
    assert_eq!(format_size_kb(2048.0), "(2.0 KB)");
    assert_eq!(format_size_kb(1234.0), "(1.2 KB)");
    assert_eq!(format_size_kb(0.0), "(0.0 KB)");
}

#[test]
fn encode_attachment_round_trips_through_first_attachment() {
    let encoded = encode_attachment("photo.jpg", "image/jpeg", 4096.0, "data:image/jpeg;base64,AAAA");
    let info = first_attachment(&encoded).unwrap();
    assert_eq!(info.title, "photo.jpg");
    assert_eq!(info.size_bytes, 4096.0);

    let parsed: serde_json::Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(parsed[0]["mimetype"], "image/jpeg");
    assert_eq!(parsed[0]["data"], "data:image/jpeg;base64,AAAA");
}

// =============================================================
// Cell summaries
// =============================================================

#[test]
fn attachment_summary_names_single_file() {
    assert_eq!(attachment_summary(&json!([{"title": "a.png"}])), "a.png");
}

#[test]
fn attachment_summary_counts_extra_files() {
    let value = json!([{"title": "a.png"}, {"title": "b.png"}, {"title": "c.png"}]);
    assert_eq!(attachment_summary(&value), "a.png +2");
}

#[test]
fn attachment_summary_parses_string_cells() {
    assert_eq!(attachment_summary(&json!(r#"[{"title":"inner.txt"}]"#)), "inner.txt");
}

#[test]
fn attachment_summary_ignores_other_values() {
    assert_eq!(attachment_summary(&json!(42)), "");
    assert_eq!(attachment_summary(&json!("plain text")), "");
    assert_eq!(attachment_summary(&json!([])), "");
}
