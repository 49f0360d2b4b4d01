//! Column-type driven form widgets.
//!
//! DESIGN
//! ======
//! NocoDB's `uidt` tag decides which widget a column gets in the row editor:
//! long text becomes a textarea, checkboxes a real checkbox, selects a
//! dropdown fed from the column's declared options, link columns a picker
//! fed from the related table, attachments the upload widget, and
//! everything else a typed `<input>`. Draft values travel as strings (the
//! way form inputs produce them) and are converted to typed JSON on submit.

#[cfg(test)]
#[path = "field_renderer_test.rs"]
mod field_renderer_test;

use std::collections::BTreeMap;

use leptos::prelude::*;
use serde_json::Value;

use schema::{Row, TableColumn, UiDataType};

use super::attachment::AttachmentField;

/// Which widget a column renders as in the row editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldWidget {
    /// Single-line `<input>`; the element type follows
    /// [`UiDataType::html_input_type`].
    Input,
    TextArea,
    Checkbox,
    Select,
    Related,
    Attachment,
}

impl FieldWidget {
    /// Pick the widget for a column. Link columns only get the related
    /// picker when the meta names a related table; otherwise they degrade
    /// to a plain input.
    #[must_use]
    pub fn for_column(column: &TableColumn) -> Self {
        if column.uidt.is_relational() && column.related_table_id().is_some() {
            return Self::Related;
        }
        match column.uidt {
            UiDataType::LongText | UiDataType::MultiLineText => Self::TextArea,
            UiDataType::Checkbox => Self::Checkbox,
            UiDataType::SingleSelect => Self::Select,
            UiDataType::Attachment => Self::Attachment,
            _ => Self::Input,
        }
    }
}

/// DOM id for a column's form control.
#[must_use]
pub fn field_dom_id(column: &TableColumn) -> String {
    format!("field-{}", column.column_name.as_deref().unwrap_or(&column.id))
}

/// Whether a draft string counts as a checked checkbox.
#[must_use]
pub fn checkbox_checked(raw: &str) -> bool {
    matches!(raw, "true" | "1")
}

/// `step` attribute for numeric inputs: whole numbers for counts, ratings,
/// and durations; hundredths for money-like columns.
#[must_use]
pub fn input_step(uidt: &UiDataType) -> Option<&'static str> {
    match uidt {
        UiDataType::Number | UiDataType::Rating | UiDataType::Duration => Some("1"),
        UiDataType::Decimal | UiDataType::Currency | UiDataType::Percent => Some("0.01"),
        _ => None,
    }
}

/// `min`/`max` attributes; ratings are clamped to the 0..=5 scale.
#[must_use]
pub fn input_range(uidt: &UiDataType) -> Option<(&'static str, &'static str)> {
    match uidt {
        UiDataType::Rating => Some(("0", "5")),
        _ => None,
    }
}

/// Placeholder text for a column's control.
#[must_use]
pub fn input_placeholder(column: &TableColumn) -> String {
    match column.uidt {
        UiDataType::Duration => "Duration in seconds".to_owned(),
        UiDataType::SingleSelect | UiDataType::MultiSelect => format!("Select {}", column.title),
        _ => format!("Enter {}", column.title),
    }
}

/// Parse a select column's `dtxp` option list (`'A','B','C'`).
#[must_use]
pub fn select_options(dtxp: Option<&str>) -> Vec<String> {
    dtxp.map_or_else(Vec::new, |raw| {
        raw.split(',')
            .map(|part| part.trim().trim_matches('\'').to_owned())
            .filter(|part| !part.is_empty())
            .collect()
    })
}

/// Turn a stored cell value into the string a form input edits.
#[must_use]
pub fn input_value_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// Convert a draft string back into the JSON value sent to the data API.
///
/// Numbers parse when they can and fall back to the raw string so the
/// backend reports the validation error instead of the client guessing.
#[must_use]
pub fn submit_value(uidt: &UiDataType, raw: &str) -> Value {
    match uidt {
        UiDataType::Checkbox => Value::Bool(checkbox_checked(raw)),
        UiDataType::Number
        | UiDataType::Rating
        | UiDataType::Duration
        | UiDataType::Decimal
        | UiDataType::Currency
        | UiDataType::Percent => parse_number(raw),
        UiDataType::Attachment => parse_attachment(raw),
        UiDataType::LinkToAnotherRecord | UiDataType::Links if raw.is_empty() => Value::Null,
        _ => Value::String(raw.to_owned()),
    }
}

fn parse_number(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }
    raw.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map_or_else(|| Value::String(raw.to_owned()), Value::Number)
}

fn parse_attachment(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

/// Human label for a related record: a title-ish field if present, then any
/// string value, then the numeric id.
#[must_use]
pub fn related_row_label(row: &Row) -> String {
    for key in ["Title", "title", "Name", "name"] {
        if let Some(label) = row.get(key).and_then(Value::as_str) {
            if !label.is_empty() {
                return label.to_owned();
            }
        }
    }
    if let Some(label) = row.values().find_map(Value::as_str) {
        if !label.is_empty() {
            return label.to_owned();
        }
    }
    row.get("Id")
        .and_then(Value::as_i64)
        .map_or_else(|| "(record)".to_owned(), |id| format!("#{id}"))
}

/// One form control bound to a draft entry keyed by the column title.
#[component]
pub fn FieldInput(column: TableColumn, draft: RwSignal<BTreeMap<String, String>>) -> impl IntoView {
    let widget = FieldWidget::for_column(&column);
    let field_id = field_dom_id(&column);
    let placeholder = input_placeholder(&column);
    let key = column.title.clone();

    let read_key = key.clone();
    let value = Signal::derive(move || draft.get().get(&read_key).cloned().unwrap_or_default());
    let write_key = key.clone();
    let set_value = Callback::new(move |next: String| {
        draft.update(|fields| {
            fields.insert(write_key.clone(), next);
        });
    });

    match widget {
        FieldWidget::TextArea => view! {
            <textarea
                id=field_id
                class="field-input field-input--textarea"
                rows="4"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| set_value.run(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),

        FieldWidget::Checkbox => view! {
            <input
                id=field_id
                class="field-input field-input--checkbox"
                type="checkbox"
                prop:checked=move || checkbox_checked(&value.get())
                on:change=move |ev| {
                    let next = if event_target_checked(&ev) { "true" } else { "false" };
                    set_value.run(next.to_owned());
                }
            />
        }
        .into_any(),

        FieldWidget::Select => {
            let options = select_options(column.dtxp.as_deref());
            if options.is_empty() {
                // The meta declared no choices; fall back to free text.
                view! {
                    <input
                        id=field_id
                        class="field-input"
                        type="text"
                        placeholder=placeholder
                        prop:value=move || value.get()
                        on:input=move |ev| set_value.run(event_target_value(&ev))
                    />
                }
                .into_any()
            } else {
                let empty_label = placeholder.clone();
                view! {
                    <select
                        id=field_id
                        class="field-input field-input--select"
                        on:change=move |ev| set_value.run(event_target_value(&ev))
                    >
                        <option value="" selected=move || value.get().is_empty()>
                            {empty_label}
                        </option>
                        {options
                            .into_iter()
                            .map(|option| {
                                let attr_value = option.clone();
                                let display = option.clone();
                                let selected = move || value.get() == option;
                                view! {
                                    <option value=attr_value selected=selected>
                                        {display}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </select>
                }
                .into_any()
            }
        }

        FieldWidget::Related => view! { <RelatedSelect column=column draft=draft/> }.into_any(),

        FieldWidget::Attachment => view! { <AttachmentField column=column draft=draft/> }.into_any(),

        FieldWidget::Input => {
            let input_type = column.uidt.html_input_type();
            let step = input_step(&column.uidt);
            let (min, max) = input_range(&column.uidt).map_or((None, None), |(lo, hi)| (Some(lo), Some(hi)));
            view! {
                <input
                    id=field_id
                    class="field-input"
                    type=input_type
                    step=step
                    min=min
                    max=max
                    placeholder=placeholder
                    prop:value=move || value.get()
                    on:input=move |ev| set_value.run(event_target_value(&ev))
                />
            }
            .into_any()
        }
    }
}

/// Dropdown of rows from the related table, labeled by `related_row_label`.
#[component]
fn RelatedSelect(column: TableColumn, draft: RwSignal<BTreeMap<String, String>>) -> impl IntoView {
    let field_id = field_dom_id(&column);
    let key = column.title.clone();
    let table_id = column.related_table_id().unwrap_or_default().to_owned();

    let read_key = key.clone();
    let value = Signal::derive(move || draft.get().get(&read_key).cloned().unwrap_or_default());
    let write_key = key.clone();
    let set_value = Callback::new(move |next: String| {
        draft.update(|fields| {
            fields.insert(write_key.clone(), next);
        });
    });

    let related = LocalResource::new(move || {
        let table_id = table_id.clone();
        async move { crate::net::api::fetch_related(&table_id).await }
    });

    view! {
        <Suspense fallback=move || view! { <p class="field-input__status">"Loading records..."</p> }>
            {move || {
                related
                    .get()
                    .map(|maybe| {
                        let labels = maybe
                            .map(|rows| rows.iter().map(related_row_label).collect::<Vec<_>>())
                            .unwrap_or_default();
                        view! {
                            <select
                                id=field_id.clone()
                                class="field-input field-input--select"
                                on:change=move |ev| set_value.run(event_target_value(&ev))
                            >
                                <option value="" selected=move || value.get().is_empty()>
                                    "None"
                                </option>
                                {labels
                                    .into_iter()
                                    .map(|label| {
                                        let attr_value = label.clone();
                                        let display = label.clone();
                                        let selected = move || value.get() == label;
                                        view! {
                                            <option value=attr_value selected=selected>
                                                {display}
                                            </option>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </select>
                        }
                    })
            }}
        </Suspense>
    }
}
