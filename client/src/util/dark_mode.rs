//! Theme initialization and toggle.
//!
//! Reads the visitor's theme from `localStorage` and applies a `data-theme`
//! attribute to the `<html>` element; content block backgrounds and chrome
//! colors key off that attribute. Toggle writes the choice back. Requires a
//! browser environment; SSR paths no-op so server rendering stays
//! deterministic.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "dyno-theme";

/// Stored value for the dark theme. Anything else in storage means light.
#[cfg(feature = "hydrate")]
const DARK: &str = "dark";

/// Read the theme preference.
///
/// Returns `true` for dark if the visitor chose it earlier, or if the system
/// prefers dark and nothing is stored yet.
pub fn read_preference() -> bool {
    #[cfg(feature = "hydrate")]
    {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return false,
        };

        // An explicit choice wins over the system preference.
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(stored)) = storage.get_item(STORAGE_KEY) {
                return stored == DARK;
            }
        }

        window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .map_or(false, |mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Apply the `data-theme` attribute on the `<html>` element.
pub fn apply(dark: bool) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = doc.document_element() {
                let _ = el.set_attribute("data-theme", if dark { DARK } else { "light" });
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = dark;
    }
}

/// Toggle the theme and persist the new choice.
pub fn toggle(current_dark: bool) -> bool {
    let next = !current_dark;
    apply(next);
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.set_item(STORAGE_KEY, if next { DARK } else { "light" });
            }
        }
    }
    next
}
