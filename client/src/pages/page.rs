//! CMS page rendering: fetch a page document by slug and walk its layout.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_params_map;

use crate::blocks::content::ContentBlock;
use crate::blocks::table::TableBlock;
use crate::net::types::Block;

/// Route component for `/:slug`. Re-renders the page whenever the slug
/// segment changes.
#[component]
pub fn DynamicPage() -> impl IntoView {
    let params = use_params_map();

    view! {
        {move || {
            let slug = params.read().get("slug").unwrap_or_default();
            view! { <PageView slug=slug/> }
        }}
    }
}

/// Fetch the page document for `slug` and render its blocks in order.
#[component]
pub fn PageView(slug: String) -> impl IntoView {
    let fetch_slug = slug.clone();
    let doc = LocalResource::new(move || {
        let slug = fetch_slug.clone();
        async move { crate::net::api::fetch_page(&slug).await }
    });

    view! {
        <Suspense fallback=move || {
            view! { <p class="page__status">"Loading page..."</p> }
        }>
            {move || {
                doc.get()
                    .map(|maybe| match maybe {
                        None => {
                            view! {
                                <section class="page page--missing">
                                    <h1>"Page not found"</h1>
                                    <p>"No published page exists at this address."</p>
                                </section>
                            }
                                .into_any()
                        }
                        Some(doc) => {
                            view! {
                                <Title text=doc.title.clone()/>
                                <article class="page">
                                    {doc.layout.into_iter().map(render_block).collect::<Vec<_>>()}
                                </article>
                            }
                                .into_any()
                        }
                    })
            }}
        </Suspense>
    }
}

/// Dispatch one layout block to its component. Unknown block types render
/// nothing so new CMS blocks never break existing pages.
fn render_block(block: Block) -> AnyView {
    match block {
        Block::Content(data) => view! { <ContentBlock data=data/> }.into_any(),
        Block::Table(data) => view! { <TableBlock data=data/> }.into_any(),
        Block::Unknown => ().into_any(),
    }
}
