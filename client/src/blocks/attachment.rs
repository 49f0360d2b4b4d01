//! Attachment upload widget.
//!
//! DESIGN
//! ======
//! NocoDB stores attachment cells as a JSON array of file descriptors. This
//! widget handles a single file: picking one reads it as a data URL in the
//! browser and encodes `[{title, mimetype, size, data}]` into the draft
//! string; an existing attachment shows its name and size with a remove
//! button that clears the draft entry.

#[cfg(test)]
#[path = "attachment_test.rs"]
mod attachment_test;

use std::collections::BTreeMap;

use leptos::prelude::*;
use serde_json::Value;

use schema::TableColumn;

use super::field_renderer::field_dom_id;

/// Name and size of the first stored attachment.
#[derive(Clone, Debug, PartialEq)]
pub struct AttachmentInfo {
    pub title: String,
    pub size_bytes: f64,
}

/// Parse the first attachment out of a draft string. Accepts the stored
/// array form and a bare descriptor object.
#[must_use]
pub fn first_attachment(raw: &str) -> Option<AttachmentInfo> {
    let parsed: Value = serde_json::from_str(raw).ok()?;
    let descriptor = match &parsed {
        Value::Array(items) => items.first()?.as_object()?,
        Value::Object(map) => map,
        _ => return None,
    };
    Some(AttachmentInfo {
        title: descriptor.get("title").and_then(Value::as_str).unwrap_or("file").to_owned(),
        size_bytes: descriptor.get("size").and_then(Value::as_f64).unwrap_or(0.0),
    })
}

/// Format a byte count the way the grid shows it: `(12.3 KB)`.
#[must_use]
pub fn format_size_kb(size_bytes: f64) -> String {
    format!("({:.1} KB)", size_bytes / 1024.0)
}

/// Encode a freshly read file into the stored attachment JSON.
#[must_use]
pub fn encode_attachment(title: &str, mimetype: &str, size_bytes: f64, data_url: &str) -> String {
    serde_json::json!([{
        "title": title,
        "mimetype": mimetype,
        "size": size_bytes,
        "data": data_url,
    }])
    .to_string()
}

/// Cell summary for attachment values: first file name, plus a count when
/// several files are stored.
#[must_use]
pub fn attachment_summary(value: &Value) -> String {
    let items = match value {
        Value::Array(items) => items.clone(),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => items,
            Ok(Value::Object(map)) => vec![Value::Object(map)],
            _ => return String::new(),
        },
        Value::Object(map) => vec![Value::Object(map.clone())],
        _ => return String::new(),
    };
    let Some(first) = items.first().and_then(Value::as_object) else {
        return String::new();
    };
    let title = first.get("title").and_then(Value::as_str).unwrap_or("file");
    if items.len() > 1 {
        format!("{title} +{}", items.len() - 1)
    } else {
        title.to_owned()
    }
}

/// File picker bound to a draft entry keyed by the column title.
#[component]
pub fn AttachmentField(column: TableColumn, draft: RwSignal<BTreeMap<String, String>>) -> impl IntoView {
    let field_id = field_dom_id(&column);
    let key = column.title.clone();
    let uploading = RwSignal::new(false);

    let read_key = key.clone();
    let value = Signal::derive(move || draft.get().get(&read_key).cloned().unwrap_or_default());
    let current = Signal::derive(move || first_attachment(&value.get()));

    let clear_key = key.clone();
    let on_clear = Callback::new(move |()| {
        draft.update(|fields| {
            fields.insert(clear_key.clone(), String::new());
        });
    });

    let change_key = key.clone();
    let on_change = Callback::new(move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            let Some(file) = input.files().and_then(|list| list.get(0)) else {
                return;
            };
            let Ok(reader) = web_sys::FileReader::new() else {
                return;
            };
            uploading.set(true);

            let title = file.name();
            let mimetype = file.type_();
            let size_bytes = file.size();
            let reader_for_result = reader.clone();
            let insert_key = change_key.clone();
            let onloadend = wasm_bindgen::closure::Closure::once(move |_: web_sys::Event| {
                if let Some(data_url) = reader_for_result.result().ok().and_then(|v| v.as_string()) {
                    let encoded = encode_attachment(&title, &mimetype, size_bytes, &data_url);
                    draft.update(|fields| {
                        fields.insert(insert_key, encoded);
                    });
                }
                uploading.set(false);
            });
            reader.set_onloadend(Some(onloadend.as_ref().unchecked_ref()));
            onloadend.forget();
            if reader.read_as_data_url(&file).is_err() {
                uploading.set(false);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&ev, &change_key);
        }
    });

    view! {
        <div class="attachment-field">
            <Show
                when=move || current.get().is_some()
                fallback=move || {
                    view! {
                        <input
                            id=field_id.clone()
                            class="field-input attachment-field__picker"
                            type="file"
                            disabled=move || uploading.get()
                            on:change=move |ev| on_change.run(ev)
                        />
                        <Show when=move || uploading.get()>
                            <span class="attachment-field__status">"Uploading..."</span>
                        </Show>
                    }
                }
            >
                {move || {
                    current
                        .get()
                        .map(|info| {
                            view! {
                                <div class="attachment-field__current">
                                    <span class="attachment-field__name">{info.title}</span>
                                    <span class="attachment-field__size">{format_size_kb(info.size_bytes)}</span>
                                    <button
                                        type="button"
                                        class="btn attachment-field__remove"
                                        title="Remove attachment"
                                        on:click=move |_| on_clear.run(())
                                    >
                                        "✕"
                                    </button>
                                </div>
                            }
                        })
                }}
            </Show>
        </div>
    }
}
