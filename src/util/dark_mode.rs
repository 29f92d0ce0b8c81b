//! Dark mode preference persistence and application.
//!
//! Stores the choice in `localStorage` and reflects it as a `data-theme`
//! attribute on `<html>`. SSR paths no-op so server rendering stays
//! deterministic.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "studyboard_dark";

/// Read the stored preference, falling back to the system color scheme.
pub fn read_preference() -> bool {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return false;
        };
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(value)) = storage.get_item(STORAGE_KEY) {
                return value == "true";
            }
        }
        window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .map_or(false, |query| query.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Reflect the preference on the document element.
pub fn apply(enabled: bool) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(element) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = element.set_attribute("data-theme", if enabled { "dark" } else { "light" });
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = enabled;
    }
}

/// Flip the preference, apply it, and persist the new value.
pub fn toggle(current: bool) -> bool {
    let next = !current;
    apply(next);
    #[cfg(feature = "hydrate")]
    {
        if let Ok(Some(storage)) = web_sys::window().map_or(Ok(None), |w| w.local_storage()) {
            let _ = storage.set_item(STORAGE_KEY, if next { "true" } else { "false" });
        }
    }
    next
}
