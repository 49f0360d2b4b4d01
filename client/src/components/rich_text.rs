//! Lexical rich-text rendering.
//!
//! DESIGN
//! ======
//! Payload stores rich text as a Lexical editor state (a JSON node tree).
//! `lexical_to_html` walks that tree and emits a small, fixed HTML subset:
//! paragraphs, headings, lists, quotes, links, and inline format marks. All
//! text content and attribute values are escaped here, so the output is safe
//! to hand to `inner_html`.

#[cfg(test)]
#[path = "rich_text_test.rs"]
mod rich_text_test;

use leptos::prelude::*;
use serde_json::Value;

const FORMAT_BOLD: u64 = 1;
const FORMAT_ITALIC: u64 = 2;
const FORMAT_STRIKETHROUGH: u64 = 4;
const FORMAT_UNDERLINE: u64 = 8;
const FORMAT_CODE: u64 = 16;

/// Rendered Lexical content.
#[component]
pub fn RichText(content: Value) -> impl IntoView {
    let rendered = lexical_to_html(&content);
    view! { <div class="rich-text" inner_html=rendered></div> }
}

/// Convert a Lexical editor state into HTML.
///
/// Unknown node types degrade to their children so new editor features show
/// their text instead of vanishing. Non-object input renders as nothing.
#[must_use]
pub fn lexical_to_html(value: &Value) -> String {
    let mut out = String::new();
    if let Some(children) = value
        .get("root")
        .and_then(|root| root.get("children"))
        .and_then(Value::as_array)
    {
        render_nodes(children, &mut out);
    }
    out
}

fn render_nodes(nodes: &[Value], out: &mut String) {
    for node in nodes {
        render_node(node, out);
    }
}

fn render_node(node: &Value, out: &mut String) {
    let kind = node.get("type").and_then(Value::as_str).unwrap_or("");
    let children = node.get("children").and_then(Value::as_array).map_or(&[][..], Vec::as_slice);

    match kind {
        "text" => render_text(node, out),
        "linebreak" => out.push_str("<br>"),
        "horizontalrule" => out.push_str("<hr>"),
        "paragraph" => wrap_children("p", children, out),
        "quote" => wrap_children("blockquote", children, out),
        "heading" => {
            let tag = node
                .get("tag")
                .and_then(Value::as_str)
                .filter(|tag| matches!(*tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6"))
                .unwrap_or("h2");
            wrap_children(tag, children, out);
        }
        "list" => {
            let tag = if node.get("listType").and_then(Value::as_str) == Some("number") { "ol" } else { "ul" };
            wrap_children(tag, children, out);
        }
        "listitem" => wrap_children("li", children, out),
        "link" | "autolink" => {
            let href = node
                .get("fields")
                .and_then(|fields| fields.get("url"))
                .or_else(|| node.get("url"))
                .and_then(Value::as_str)
                .unwrap_or("#");
            out.push_str("<a href=\"");
            out.push_str(&escape_html(sanitize_href(href)));
            out.push_str("\">");
            render_nodes(children, out);
            out.push_str("</a>");
        }
        _ => render_nodes(children, out),
    }
}

fn render_text(node: &Value, out: &mut String) {
    let text = node.get("text").and_then(Value::as_str).unwrap_or("");
    let format = node.get("format").and_then(Value::as_u64).unwrap_or(0);

    let mut html = escape_html(text);
    if format & FORMAT_CODE != 0 {
        html = format!("<code>{html}</code>");
    }
    if format & FORMAT_STRIKETHROUGH != 0 {
        html = format!("<s>{html}</s>");
    }
    if format & FORMAT_UNDERLINE != 0 {
        html = format!("<u>{html}</u>");
    }
    if format & FORMAT_ITALIC != 0 {
        html = format!("<em>{html}</em>");
    }
    if format & FORMAT_BOLD != 0 {
        html = format!("<strong>{html}</strong>");
    }
    out.push_str(&html);
}

fn wrap_children(tag: &str, children: &[Value], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    render_nodes(children, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Reject scriptable URL schemes.
fn sanitize_href(href: &str) -> &str {
    let scheme = href.trim_start().to_ascii_lowercase();
    if scheme.starts_with("javascript:") || scheme.starts_with("data:") {
        "#"
    } else {
        href
    }
}

/// Escape text for safe embedding in HTML content and attribute values.
pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
