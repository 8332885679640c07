//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `ui`) and owned by the root `App`
//! component, which provides each as an `RwSignal` context.

pub mod auth;
pub mod ui;
