//! # client
//!
//! Leptos frontend for PolyLaunch: the landing page, the Google login page,
//! and the authenticated dashboard placeholder.
//!
//! This crate contains pages, components, application state, the theme
//! controller, and the JSON types shared with the `server` crate. It renders
//! on the server under `ssr` and hydrates in the browser under `hydrate`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: attach to the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
