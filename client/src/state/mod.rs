//! Client-side application state provided through Leptos contexts.
//!
//! ARCHITECTURE
//! ============
//! `ui` holds chrome state (theme, sidebar) and `toast` holds the transient
//! notification queue. Both are plain structs wrapped in `RwSignal` contexts
//! by the root `App` component; page data itself lives in per-component
//! `LocalResource`s rather than global state.

pub mod toast;
pub mod ui;
