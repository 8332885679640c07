//! Local UI chrome state.
//!
//! DESIGN
//! ======
//! Keeps presentation concerns out of auth state so the theme toggle can
//! live on every page without touching session logic.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use crate::util::theme::Theme;

/// UI state shared by every page, provided as `RwSignal<UiState>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub theme: Theme,
}
