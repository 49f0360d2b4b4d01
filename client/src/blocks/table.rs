//! Live NocoDB table block with row CRUD.
//!
//! ARCHITECTURE
//! ============
//! Two `LocalResource`s drive the block: one resolves the table descriptor
//! (columns) once, the other refetches rows whenever the page offset or the
//! refresh counter changes. Row edits happen in a dialog over a string
//! draft keyed by column title; `build_row_fields` converts the draft to
//! typed JSON on save. Mutation outcomes surface as toasts and bump the
//! refresh counter so the grid reloads.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::collections::BTreeMap;

use leptos::prelude::*;
use serde_json::Value;

use schema::{PageInfo, Row, TableColumn, UiDataType, visible_columns};

use crate::blocks::attachment::attachment_summary;
use crate::blocks::field_renderer::{FieldInput, checkbox_checked, input_value_of, related_row_label, submit_value};
use crate::components::toaster::show_toast;
use crate::net::types::TableBlockData;
use crate::state::toast::{ToastKind, ToastState};

/// Rows per page when the block does not configure one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// =============================================================================
// PURE HELPERS
// =============================================================================

/// Seed the editor draft from an existing row: one string per editable
/// column. An empty row yields empty drafts for a create form.
#[must_use]
pub fn draft_from_row(columns: &[TableColumn], row: &Row) -> BTreeMap<String, String> {
    columns
        .iter()
        .filter(|column| column.is_editable())
        .map(|column| {
            let raw = row.get(&column.title).map(input_value_of).unwrap_or_default();
            (column.title.clone(), raw)
        })
        .collect()
}

/// Convert the editor draft back into the JSON object sent to the server.
/// Only editable columns present in the draft are included.
#[must_use]
pub fn build_row_fields(columns: &[TableColumn], draft: &BTreeMap<String, String>) -> Row {
    let mut fields = Row::new();
    for column in columns {
        if !column.is_editable() {
            continue;
        }
        if let Some(raw) = draft.get(&column.title) {
            fields.insert(column.title.clone(), submit_value(&column.uidt, raw));
        }
    }
    fields
}

/// The row's primary key rendered as a path segment, if the table has a
/// primary key and the row carries a scalar value for it.
#[must_use]
pub fn primary_key_value(columns: &[TableColumn], row: &Row) -> Option<String> {
    let pk = schema::primary_key_column(columns)?;
    match row.get(&pk.title)? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Grid cell text for a value under a column.
#[must_use]
pub fn display_cell(column: &TableColumn, value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match column.uidt {
        UiDataType::Checkbox => {
            let checked = match value {
                Value::Bool(flag) => *flag,
                Value::String(raw) => checkbox_checked(raw),
                Value::Number(number) => number.as_i64() == Some(1),
                _ => false,
            };
            if checked { "\u{2713}".to_owned() } else { String::new() }
        }
        UiDataType::Attachment => attachment_summary(value),
        _ => scalar_display(value),
    }
}

fn scalar_display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => items.iter().map(scalar_display).collect::<Vec<_>>().join(", "),
        Value::Object(map) => related_row_label(map),
    }
}

/// Whether a next page exists. Prefers the backend's `isLastPage`, then the
/// row total, then falls back to "the page came back full".
#[must_use]
pub fn can_page_next(info: &PageInfo, offset: u32, page_size: u32, rows_on_page: usize) -> bool {
    if let Some(last) = info.is_last_page {
        return !last;
    }
    if let Some(total) = info.total_rows {
        return u64::from(offset) + u64::from(page_size) < total;
    }
    rows_on_page as u64 == u64::from(page_size)
}

/// Pager caption: `"11-20 of 57"`, or `"No rows"` for an empty page.
#[must_use]
pub fn row_range_label(info: &PageInfo, offset: u32, rows_on_page: usize) -> String {
    if rows_on_page == 0 {
        return "No rows".to_owned();
    }
    let start = u64::from(offset) + 1;
    let end = u64::from(offset) + rows_on_page as u64;
    match info.total_rows {
        Some(total) => format!("{start}-{end} of {total}"),
        None => format!("{start}-{end}"),
    }
}

// =============================================================================
// COMPONENTS
// =============================================================================

/// A CMS table block: header, grid, pager, and the row dialogs.
#[component]
pub fn TableBlock(data: TableBlockData) -> impl IntoView {
    let page_size = data.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

    let offset = RwSignal::new(0u32);
    let refresh = RwSignal::new(0u32);
    let show_editor = RwSignal::new(false);
    let editing_row_id = RwSignal::new(None::<String>);
    let draft = RwSignal::new(BTreeMap::<String, String>::new());
    let confirm_delete = RwSignal::new(None::<String>);

    let meta_source = data.source.clone();
    let descriptor = LocalResource::new(move || {
        let source = meta_source.clone();
        async move { crate::net::api::fetch_table(&source).await }
    });

    let rows_source = data.source.clone();
    let rows = LocalResource::new(move || {
        let source = rows_source.clone();
        let _ = refresh.get();
        let offset_now = offset.get();
        async move { crate::net::api::fetch_rows(&source, page_size, offset_now).await }
    });

    let on_editor_cancel = Callback::new(move |()| show_editor.set(false));
    let on_delete_cancel = Callback::new(move |()| confirm_delete.set(None));

    let heading = data.title.clone();
    let description = data.description.clone();
    let dialog_source = data.source.clone();

    view! {
        <section class="table-block">
            <header class="table-block__header">
                {heading.map(|title| view! { <h2 class="table-block__title">{title}</h2> })}
                {description.map(|text| view! { <p class="table-block__description">{text}</p> })}
            </header>

            <Suspense fallback=move || {
                view! { <p class="table-block__status">"Loading table..."</p> }
            }>
                {move || {
                    descriptor
                        .get()
                        .map(|maybe| match maybe {
                            None => {
                                view! {
                                    <p class="table-block__status table-block__status--error">
                                        "Table unavailable."
                                    </p>
                                }
                                    .into_any()
                            }
                            Some(meta) => {
                                let columns: Vec<TableColumn> =
                                    visible_columns(&meta.columns).into_iter().cloned().collect();
                                let editable: Vec<TableColumn> =
                                    columns.iter().filter(|c| c.is_editable()).cloned().collect();
                                let all_columns = meta.columns.clone();
                                let can_create = !editable.is_empty();

                                let create_seed = editable.clone();
                                let open_create = move |_| {
                                    draft.set(draft_from_row(&create_seed, &Row::new()));
                                    editing_row_id.set(None);
                                    show_editor.set(true);
                                };

                                let grid_columns = columns.clone();
                                let grid_editable = editable.clone();
                                let dialog_columns = editable.clone();
                                let editor_source = dialog_source.clone();
                                let delete_source = dialog_source.clone();

                                view! {
                                    <div class="table-block__toolbar">
                                        {can_create
                                            .then(|| {
                                                view! {
                                                    <button
                                                        class="btn btn--primary table-block__add"
                                                        on:click=open_create
                                                    >
                                                        "+ Add Row"
                                                    </button>
                                                }
                                            })}
                                    </div>

                                    <Suspense fallback=move || {
                                        view! { <p class="table-block__status">"Loading rows..."</p> }
                                    }>
                                        {move || {
                                            rows.get()
                                                .map(|maybe_rows| match maybe_rows {
                                                    None => {
                                                        view! {
                                                            <p class="table-block__status table-block__status--error">
                                                                "Rows unavailable."
                                                            </p>
                                                        }
                                                            .into_any()
                                                    }
                                                    Some(page) => {
                                                        render_grid(
                                                            grid_columns.clone(),
                                                            grid_editable.clone(),
                                                            all_columns.clone(),
                                                            page,
                                                            offset,
                                                            page_size,
                                                            draft,
                                                            editing_row_id,
                                                            show_editor,
                                                            confirm_delete,
                                                        )
                                                            .into_any()
                                                    }
                                                })
                                        }}
                                    </Suspense>

                                    <Show when=move || show_editor.get()>
                                        <RowEditorDialog
                                            columns=dialog_columns.clone()
                                            source=editor_source.clone()
                                            editing=editing_row_id
                                            draft=draft
                                            on_cancel=on_editor_cancel
                                            refresh=refresh
                                        />
                                    </Show>
                                    <Show when=move || confirm_delete.get().is_some()>
                                        <DeleteRowDialog
                                            source=delete_source.clone()
                                            row_id=confirm_delete
                                            on_cancel=on_delete_cancel
                                            refresh=refresh
                                        />
                                    </Show>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </section>
    }
}

/// Render the grid, actions column, and pager for one page of rows.
#[allow(clippy::too_many_arguments)]
fn render_grid(
    columns: Vec<TableColumn>,
    editable: Vec<TableColumn>,
    all_columns: Vec<TableColumn>,
    page: schema::RowsPage,
    offset: RwSignal<u32>,
    page_size: u32,
    draft: RwSignal<BTreeMap<String, String>>,
    editing_row_id: RwSignal<Option<String>>,
    show_editor: RwSignal<bool>,
    confirm_delete: RwSignal<Option<String>>,
) -> impl IntoView {
    let offset_now = offset.get();
    let shown = page.list.len();
    let range = row_range_label(&page.page_info, offset_now, shown);
    let next_ok = can_page_next(&page.page_info, offset_now, page_size, shown);
    let prev_ok = offset_now > 0;

    let header_cells = columns
        .iter()
        .map(|column| view! { <th class="table-block__head">{column.title.clone()}</th> })
        .collect::<Vec<_>>();

    let body = if page.list.is_empty() {
        let span = (columns.len() + 1).to_string();
        view! {
            <tr>
                <td class="table-block__empty" colspan=span>
                    "No rows yet."
                </td>
            </tr>
        }
        .into_any()
    } else {
        page.list
            .iter()
            .map(|row| {
                let row_id = primary_key_value(&all_columns, row);
                let cells = columns
                    .iter()
                    .map(|column| {
                        view! {
                            <td class="table-block__cell">
                                {display_cell(column, row.get(&column.title))}
                            </td>
                        }
                    })
                    .collect::<Vec<_>>();
                let edit_draft = draft_from_row(&editable, row);
                view! {
                    <tr class="table-block__row">
                        {cells}
                        <td class="table-block__cell table-block__cell--actions">
                            {row_id
                                .map(|id| {
                                    let edit_id = id.clone();
                                    let delete_id = id;
                                    let edit_draft = edit_draft.clone();
                                    view! {
                                        <button
                                            class="btn table-block__action"
                                            on:click=move |_| {
                                                draft.set(edit_draft.clone());
                                                editing_row_id.set(Some(edit_id.clone()));
                                                show_editor.set(true);
                                            }
                                        >
                                            "Edit"
                                        </button>
                                        <button
                                            class="btn btn--danger table-block__action"
                                            on:click=move |_| confirm_delete.set(Some(delete_id.clone()))
                                        >
                                            "Delete"
                                        </button>
                                    }
                                })}
                        </td>
                    </tr>
                }
            })
            .collect::<Vec<_>>()
            .into_any()
    };

    view! {
        <div class="table-block__scroll">
            <table class="table-block__table">
                <thead>
                    <tr>
                        {header_cells}
                        <th class="table-block__head table-block__head--actions"></th>
                    </tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
        </div>

        <div class="table-block__pager">
            <button
                class="btn table-block__page-btn"
                disabled=!prev_ok
                on:click=move |_| offset.update(|o| *o = o.saturating_sub(page_size))
            >
                "Prev"
            </button>
            <span class="table-block__range">{range}</span>
            <button
                class="btn table-block__page-btn"
                disabled=!next_ok
                on:click=move |_| offset.update(|o| *o += page_size)
            >
                "Next"
            </button>
        </div>
    }
}

/// Modal dialog for creating or editing a row.
#[component]
fn RowEditorDialog(
    columns: Vec<TableColumn>,
    source: String,
    editing: RwSignal<Option<String>>,
    draft: RwSignal<BTreeMap<String, String>>,
    on_cancel: Callback<()>,
    refresh: RwSignal<u32>,
) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    let submit_columns = columns.clone();
    let submit_source = source;
    let submit = Callback::new(move |()| {
        let fields = build_row_fields(&submit_columns, &draft.get_untracked());
        let source = submit_source.clone();
        let row_id = editing.get_untracked();
        leptos::task::spawn_local(async move {
            let outcome = match row_id.as_deref() {
                Some(id) => crate::net::api::update_row(&source, id, &fields).await.map(|_| ()),
                None => crate::net::api::create_row(&source, &fields).await.map(|_| ()),
            };
            match outcome {
                Ok(()) => {
                    show_toast(toasts, ToastKind::Success, "Row saved");
                    refresh.update(|n| *n += 1);
                }
                Err(message) => show_toast(toasts, ToastKind::Error, message),
            }
        });
        on_cancel.run(());
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{move || if editing.get().is_some() { "Edit Row" } else { "Add Row" }}</h2>
                {columns
                    .iter()
                    .map(|column| {
                        view! {
                            <label class="dialog__label">
                                {column.title.clone()}
                                <FieldInput column=column.clone() draft=draft/>
                            </label>
                        }
                    })
                    .collect::<Vec<_>>()}
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| submit.run(())>
                        "Save"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Confirmation dialog before a row delete.
#[component]
fn DeleteRowDialog(
    source: String,
    row_id: RwSignal<Option<String>>,
    on_cancel: Callback<()>,
    refresh: RwSignal<u32>,
) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    let submit = Callback::new(move |()| {
        let Some(id) = row_id.get_untracked() else {
            return;
        };
        let source = source.clone();
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_row(&source, &id).await {
                Ok(()) => {
                    show_toast(toasts, ToastKind::Success, "Row deleted");
                    refresh.update(|n| *n += 1);
                }
                Err(message) => show_toast(toasts, ToastKind::Error, message),
            }
        });
        on_cancel.run(());
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Delete Row"</h2>
                <p class="dialog__danger">"This will permanently delete this row."</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--danger" on:click=move |_| submit.run(())>
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}
