//! Site header with CMS-driven navigation and the theme toggle.

use leptos::prelude::*;

use crate::state::ui::UiState;

/// Top bar: sidebar toggle, brand link, header-global navigation, theme
/// toggle. Navigation comes from the CMS `header` global and silently
/// renders nothing while it loads or when the fetch fails.
#[component]
pub fn Header() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let header = LocalResource::new(|| crate::net::api::fetch_header());

    view! {
        <header class="site-header">
            <button
                class="btn site-header__menu"
                on:click=move |_| ui.update(|u| u.sidebar_expanded = !u.sidebar_expanded)
                title="Toggle sidebar"
            >
                "☰"
            </button>
            <a class="site-header__brand" href="/">
                "Dyno"
            </a>

            <nav class="site-header__nav">
                <Suspense fallback=|| ()>
                    {move || {
                        header
                            .get()
                            .and_then(|global| global)
                            .map(|global| {
                                global
                                    .nav_items
                                    .into_iter()
                                    .map(|item| {
                                        let href = item.link.resolve_href();
                                        let label = item.link.label.clone();
                                        let target = if item.link.new_tab.unwrap_or(false) { Some("_blank") } else { None };
                                        let rel = target.map(|_| "noreferrer");
                                        view! {
                                            <a class="site-header__link" href=href target=target rel=rel>
                                                {label}
                                            </a>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            })
                    }}
                </Suspense>
            </nav>

            <span class="site-header__spacer"></span>

            <button
                class="btn site-header__dark-toggle"
                on:click=move |_| {
                    let current = ui.get().dark_mode;
                    let next = crate::util::dark_mode::toggle(current);
                    ui.update(|u| u.dark_mode = next);
                }
                title="Toggle dark mode"
            >
                {move || if ui.get().dark_mode { "☀" } else { "☾" }}
            </button>
        </header>
    }
}
