//! Shared NocoDB table model used by both `server` and `client`.
//!
//! This crate owns the column/table metadata shapes returned by the NocoDB
//! meta API and the pure helpers that turn a column description into
//! rendering decisions (visibility, editability, input type). Row payloads
//! stay flexible (`serde_json` maps) because the remote schema is only known
//! at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single row as returned by the NocoDB data API: column title -> value.
pub type Row = serde_json::Map<String, Value>;

/// Column names NocoDB manages itself; hidden from rendered tables and forms.
pub const SYSTEM_COLUMN_NAMES: [&str; 4] = ["created_at", "updated_at", "created_by", "updated_by"];

// =============================================================================
// UI DATA TYPE
// =============================================================================

/// NocoDB's `uidt` tag: the semantic type of a column as the spreadsheet UI
/// sees it, independent of the underlying SQL type.
///
/// Unknown tags are preserved verbatim in [`UiDataType::Other`] so new NocoDB
/// column kinds degrade to plain text fields instead of failing to parse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UiDataType {
    SingleLineText,
    LongText,
    MultiLineText,
    Text,
    Number,
    Decimal,
    Currency,
    Percent,
    Rating,
    Duration,
    Checkbox,
    Date,
    DateTime,
    Time,
    Email,
    Url,
    PhoneNumber,
    SingleSelect,
    MultiSelect,
    Attachment,
    LinkToAnotherRecord,
    Links,
    Lookup,
    Rollup,
    Formula,
    Other(String),
}

impl UiDataType {
    /// The canonical uidt string as NocoDB spells it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::SingleLineText => "SingleLineText",
            Self::LongText => "LongText",
            Self::MultiLineText => "MultiLineText",
            Self::Text => "Text",
            Self::Number => "Number",
            Self::Decimal => "Decimal",
            Self::Currency => "Currency",
            Self::Percent => "Percent",
            Self::Rating => "Rating",
            Self::Duration => "Duration",
            Self::Checkbox => "Checkbox",
            Self::Date => "Date",
            Self::DateTime => "DateTime",
            Self::Time => "Time",
            Self::Email => "Email",
            Self::Url => "URL",
            Self::PhoneNumber => "PhoneNumber",
            Self::SingleSelect => "SingleSelect",
            Self::MultiSelect => "MultiSelect",
            Self::Attachment => "Attachment",
            Self::LinkToAnotherRecord => "LinkToAnotherRecord",
            Self::Links => "Links",
            Self::Lookup => "Lookup",
            Self::Rollup => "Rollup",
            Self::Formula => "Formula",
            Self::Other(raw) => raw,
        }
    }

    /// Fixed lookup from uidt to the HTML `<input type>` used for plain
    /// (non-widget) rendering contexts.
    #[must_use]
    pub fn html_input_type(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Url => "url",
            Self::PhoneNumber => "tel",
            Self::Number | Self::Decimal | Self::Currency | Self::Percent | Self::Rating | Self::Duration => "number",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::DateTime => "datetime-local",
            Self::Time => "time",
            _ => "text",
        }
    }

    /// True for link-style columns that point at rows of another table.
    #[must_use]
    pub fn is_relational(&self) -> bool {
        matches!(self, Self::LinkToAnotherRecord | Self::Links)
    }
}

impl From<String> for UiDataType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "SingleLineText" => Self::SingleLineText,
            "LongText" => Self::LongText,
            "MultiLineText" => Self::MultiLineText,
            "Text" => Self::Text,
            "Number" => Self::Number,
            "Decimal" => Self::Decimal,
            "Currency" => Self::Currency,
            "Percent" => Self::Percent,
            "Rating" => Self::Rating,
            "Duration" => Self::Duration,
            "Checkbox" => Self::Checkbox,
            "Date" => Self::Date,
            "DateTime" => Self::DateTime,
            "Time" => Self::Time,
            "Email" => Self::Email,
            "URL" => Self::Url,
            "PhoneNumber" => Self::PhoneNumber,
            "SingleSelect" => Self::SingleSelect,
            "MultiSelect" => Self::MultiSelect,
            "Attachment" => Self::Attachment,
            "LinkToAnotherRecord" => Self::LinkToAnotherRecord,
            "Links" => Self::Links,
            "Lookup" => Self::Lookup,
            "Rollup" => Self::Rollup,
            "Formula" => Self::Formula,
            _ => Self::Other(raw),
        }
    }
}

impl From<UiDataType> for String {
    fn from(uidt: UiDataType) -> Self {
        uidt.as_str().to_owned()
    }
}

impl fmt::Display for UiDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// COLUMN MODEL
// =============================================================================

/// Relational options attached to link-style columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOptions {
    /// Relation shape: `has_one`, `has_many`, or `many_to_many`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_related_model_id: Option<String>,
    /// Column on the related table used as the display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_label_column_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_mm_model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_mm_child_column_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_mm_parent_column_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_parent_column_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_child_column_id: Option<String>,
}

/// One column of a NocoDB table, as returned by the v2 meta API.
///
/// Booleans default to `false` and descriptive fields to `None`; the meta API
/// omits everything it considers unset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    pub uidt: UiDataType,
    /// Underlying SQL data type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<String>,
    /// Primary key.
    #[serde(default)]
    pub pk: bool,
    /// Required (NOT NULL).
    #[serde(default)]
    pub rqd: bool,
    #[serde(default)]
    pub unique: bool,
    /// Auto increment.
    #[serde(default)]
    pub ai: bool,
    /// Column default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdf: Option<String>,
    /// Data type extra params (select options, precision, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtxp: Option<String>,
    /// Data type extra scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtxs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning table id for relational columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_model_id: Option<String>,
    #[serde(rename = "colOptions", default, skip_serializing_if = "Option::is_none")]
    pub col_options: Option<ColumnOptions>,
}

impl TableColumn {
    /// Whether the field may be edited in a form. Primary key and
    /// auto-increment columns are read-only.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        !(self.pk || self.ai)
    }

    /// Related table id for link-style columns, if the meta carries one.
    #[must_use]
    pub fn related_table_id(&self) -> Option<&str> {
        self.col_options.as_ref().and_then(|o| o.fk_related_model_id.as_deref())
    }
}

/// First primary-key column, if the table declares one.
#[must_use]
pub fn primary_key_column(columns: &[TableColumn]) -> Option<&TableColumn> {
    columns.iter().find(|col| col.pk)
}

/// Columns to show in tables and forms: everything except NocoDB's own
/// bookkeeping columns. Columns without a `column_name` are kept. Input
/// order is preserved.
#[must_use]
pub fn visible_columns(columns: &[TableColumn]) -> Vec<&TableColumn> {
    columns
        .iter()
        .filter(|col| {
            col.column_name
                .as_ref()
                .is_none_or(|name| !SYSTEM_COLUMN_NAMES.contains(&name.to_lowercase().as_str()))
        })
        .collect()
}

// =============================================================================
// BASE / TABLE METADATA
// =============================================================================

/// A NocoDB base (project) as listed by the meta API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseMeta {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A table within a base. The list endpoint omits `columns`; the single-table
/// read populates them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableMeta {
    pub id: String,
    pub title: String,
    pub table_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub columns: Vec<TableColumn>,
}

// =============================================================================
// ROW LISTING
// =============================================================================

/// Pagination block attached to row listings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_first_page: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_last_page: Option<bool>,
}

/// One page of rows plus its pagination block.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RowsPage {
    #[serde(default)]
    pub list: Vec<Row>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
}

// =============================================================================
// TABLE SOURCE
// =============================================================================

/// Error from parsing a `"baseId.tableId"` source string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SourceParseError {
    /// The string is not exactly two non-empty dot-separated parts.
    #[error("invalid table source {input:?}: expected \"baseId.tableId\"")]
    Malformed { input: String },
}

/// A fully resolved table address: which base, which table.
///
/// Blocks may reference tables either by this dotted form or by a bare table
/// name that the server resolves via the meta API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSource {
    pub base_id: String,
    pub table_id: String,
}

impl TableSource {
    #[must_use]
    pub fn new(base_id: impl Into<String>, table_id: impl Into<String>) -> Self {
        Self { base_id: base_id.into(), table_id: table_id.into() }
    }
}

impl FromStr for TableSource {
    type Err = SourceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(base_id), Some(table_id), None) if !base_id.is_empty() && !table_id.is_empty() => {
                Ok(Self::new(base_id, table_id))
            }
            _ => Err(SourceParseError::Malformed { input: s.to_owned() }),
        }
    }
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.base_id, self.table_id)
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
