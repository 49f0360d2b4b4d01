//! Local UI chrome state (theme, sidebar expansion).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of fetched CMS data so layout
//! controls can change without touching any block rendering code.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// UI state for the theme toggle and sidebar.
#[derive(Clone, Debug)]
pub struct UiState {
    pub dark_mode: bool,
    pub sidebar_expanded: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self { dark_mode: false, sidebar_expanded: true }
    }
}
