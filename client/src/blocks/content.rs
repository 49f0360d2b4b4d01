//! Rich-text content block.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use leptos::prelude::*;

use crate::components::rich_text::RichText;
use crate::net::types::ContentBlockData;

/// Background modifier class. Unknown values fall back to the light theme
/// so editor typos never produce an unstyled section.
pub(crate) fn background_class(value: Option<&str>) -> &'static str {
    match value {
        Some("dark") => "content-block--dark",
        Some("blue") => "content-block--blue",
        Some("green") => "content-block--green",
        _ => "content-block--light",
    }
}

/// Text alignment modifier class; left is the default.
pub(crate) fn alignment_class(value: Option<&str>) -> &'static str {
    match value {
        Some("center") => "content-block--align-center",
        Some("right") => "content-block--align-right",
        _ => "content-block--align-left",
    }
}

/// A styled section with optional title, description, and Lexical body.
#[component]
pub fn ContentBlock(data: ContentBlockData) -> impl IntoView {
    let classes = format!(
        "content-block {} {}",
        background_class(data.background_color.as_deref()),
        alignment_class(data.alignment.as_deref()),
    );

    view! {
        <section class=classes>
            {data.title.map(|title| view! { <h2 class="content-block__title">{title}</h2> })}
            {data
                .description
                .map(|description| view! { <p class="content-block__description">{description}</p> })}
            {data.content.map(|content| view! { <RichText content=content/> })}
        </section>
    }
}
