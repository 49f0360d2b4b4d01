//! # client
//!
//! Leptos + WASM frontend for the Dyno site. Renders CMS-driven pages as
//! block layouts and mounts live NocoDB-backed table blocks with row CRUD.
//!
//! This crate contains pages, blocks, components, application state, and the
//! REST client for the `server` proxy endpoints. It is compiled twice: once
//! with `ssr` for server-side HTML and once with `hydrate` for the browser.

pub mod app;
pub mod blocks;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
