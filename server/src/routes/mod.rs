//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the auth API and stitches it with Leptos SSR rendering
//! under a single Axum router. Pages sit behind the session gate; the API
//! routes answer for themselves.

pub mod auth;
pub mod gate;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::middleware;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use client::state::auth::ServerSession;

use crate::services::session::SessionUser;
use crate::state::AppState;

/// Auth API routes consumed by the Leptos client.
fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/get-session", get(auth::get_session))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/sign-in/social", post(auth::sign_in_social))
        .route("/api/auth/sign-in/{provider}", get(auth::sign_in_redirect))
        .route("/api/auth/callback/{provider}", get(auth::oauth_callback))
        .route("/api/auth/sign-out", post(auth::sign_out))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Combine the API with a page router placed behind the session gate.
pub fn app(state: AppState, pages: Router) -> Router {
    let gated = pages.layer(middleware::from_fn_with_state(state.clone(), gate::require_session));
    api_routes(state)
        .merge(gated)
        .layer(TraceLayer::new_for_http())
}

/// Leptos SSR frontend: API routes + gated Leptos pages + `/pkg` assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section or `LEPTOS_*` variables).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    Ok(app(state, leptos_pages(conf.leptos_options)).layer(CompressionLayer::new()))
}

/// Leptos page router: SSR routes, `/pkg` assets and the file fallback.
pub(crate) fn leptos_pages(leptos_options: LeptosOptions) -> Router {
    let routes = generate_route_list(client::app::App);

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Router::new()
        .leptos_routes_with_context(&leptos_options, routes, provide_server_session, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .fallback(leptos_axum::file_and_error_handler(client::app::shell))
        .with_state(leptos_options)
}

/// Hand the session accepted by the gate to the renderer.
fn provide_server_session() {
    let user = use_context::<Parts>().and_then(|parts| parts.extensions.get::<SessionUser>().cloned());
    if let Some(user) = user {
        provide_context(ServerSession(auth::session_response(&user).user));
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
pub(crate) mod test_support;
