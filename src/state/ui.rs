//! UI chrome state shared across pages.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Presentation preferences for the current browser user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub dark_mode: bool,
}
