//! The site root: renders the CMS page with slug `home`.

use leptos::prelude::*;

use crate::pages::page::PageView;

#[component]
pub fn HomePage() -> impl IntoView {
    view! { <PageView slug="home".to_owned()/> }
}
