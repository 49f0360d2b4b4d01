//! Shared wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These types intentionally mirror the server's proxy payloads so serde
//! round-trips stay lossless: CMS page documents keep their Payload field
//! names and table descriptors reuse the `schema` column model unchanged.
//! Unknown block types deserialize to [`Block::Unknown`] and render nothing
//! rather than failing the whole page.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use schema::{PageInfo, Row, RowsPage, TableColumn};

/// Slim page listing entry used for sidebar navigation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    /// Display title.
    pub title: String,
    /// URL slug; `"home"` maps to the site root.
    pub slug: String,
}

/// A full published page: title plus its ordered block layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageDoc {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub layout: Vec<Block>,
}

/// One layout block, dispatched on the CMS `blockType` discriminator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "blockType")]
pub enum Block {
    #[serde(rename = "content")]
    Content(ContentBlockData),
    #[serde(rename = "tableBlock")]
    Table(TableBlockData),
    /// Any block type this client has no renderer for.
    #[serde(other)]
    Unknown,
}

/// Rich-text content block fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlockData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Lexical editor state as raw JSON.
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub alignment: Option<String>,
}

/// Live table block fields. `source` is either `"baseId.tableId"` or a bare
/// table name the server resolves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBlockData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub source: String,
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// The `header` global: site-wide navigation links.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderGlobal {
    #[serde(default)]
    pub nav_items: Vec<NavItem>,
}

/// One navigation entry wrapping a CMS link.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub link: CmsLink,
}

/// A Payload link field: either a custom URL or a reference to a document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsLink {
    /// `"custom"` or `"reference"`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub new_tab: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub reference: Option<LinkReference>,
}

/// Target of a reference link. `value` is the full document when the CMS
/// populated the relation and a bare id string otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkReference {
    #[serde(rename = "relationTo")]
    pub relation_to: String,
    pub value: Value,
}

/// Table metadata as served by `/api/tables/{source}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Canonical `"baseId.tableId"` source.
    pub source: String,
    pub title: String,
    pub columns: Vec<TableColumn>,
}

impl CmsLink {
    /// Resolve the link to an `href`. Unresolvable links degrade to `"#"`
    /// instead of broken navigation.
    #[must_use]
    pub fn resolve_href(&self) -> String {
        if self.kind.as_deref() == Some("custom") {
            return self.url.clone().unwrap_or_else(|| "#".to_owned());
        }
        match &self.reference {
            Some(reference) => reference.href(),
            None => self.url.clone().unwrap_or_else(|| "#".to_owned()),
        }
    }
}

impl LinkReference {
    /// Internal path for a referenced document. Pages live at `/{slug}` with
    /// `home` at the root; other collections are prefixed with their name.
    #[must_use]
    pub fn href(&self) -> String {
        let slug = self.value.as_object().and_then(|doc| doc.get("slug")).and_then(Value::as_str);
        match slug {
            Some(slug) if self.relation_to == "pages" => page_href(slug),
            Some(slug) => format!("/{}/{slug}", self.relation_to),
            None => "#".to_owned(),
        }
    }
}

/// Path for a page slug; the `home` page is the site root.
#[must_use]
pub fn page_href(slug: &str) -> String {
    if slug == "home" { "/".to_owned() } else { format!("/{slug}") }
}
