//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render site chrome and shared content surfaces while reading
//! shared state from Leptos context providers. Block-specific rendering
//! lives in `blocks`.

pub mod header;
pub mod rich_text;
pub mod sidebar;
pub mod toaster;
