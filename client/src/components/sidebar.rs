//! Collapsible sidebar listing every published page.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::net::types::page_href;
use crate::state::ui::UiState;

/// Page navigation sidebar. The page list comes from `/api/pages`; the entry
/// matching the current route is highlighted.
#[component]
pub fn Sidebar() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let pages = LocalResource::new(|| crate::net::api::fetch_pages());
    let pathname = use_location().pathname;

    view! {
        <Show when=move || ui.get().sidebar_expanded>
            <aside class="sidebar">
                <div class="sidebar__brand">
                    <a class="sidebar__title" href="/">
                        "Dyno"
                    </a>
                    <span class="sidebar__subtitle">"Payload CMS"</span>
                </div>

                <nav class="sidebar__nav">
                    <Suspense fallback=move || view! { <p class="sidebar__status">"Loading pages..."</p> }>
                        {move || {
                            pages
                                .get()
                                .map(|maybe| match maybe {
                                    None => {
                                        view! { <p class="sidebar__status">"Navigation unavailable."</p> }.into_any()
                                    }
                                    Some(list) if list.is_empty() => {
                                        view! { <p class="sidebar__status">"No pages yet."</p> }.into_any()
                                    }
                                    Some(list) => {
                                        view! {
                                            <ul class="sidebar__list">
                                                {list
                                                    .into_iter()
                                                    .map(|page| {
                                                        let href = page_href(&page.slug);
                                                        let active_href = href.clone();
                                                        view! {
                                                            <li class="sidebar__item">
                                                                <a
                                                                    class="sidebar__link"
                                                                    class:sidebar__link--active=move || {
                                                                        pathname.get() == active_href
                                                                    }
                                                                    href=href
                                                                >
                                                                    {page.title}
                                                                </a>
                                                            </li>
                                                        }
                                                    })
                                                    .collect::<Vec<_>>()}
                                            </ul>
                                        }
                                            .into_any()
                                    }
                                })
                        }}
                    </Suspense>
                </nav>

                <footer class="sidebar__footer">"Dyno v0.1"</footer>
            </aside>
        </Show>
    }
}
