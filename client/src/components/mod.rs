//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome while reading/writing shared state from
//! Leptos context providers.

pub mod sign_out_button;
pub mod theme_toggle;
