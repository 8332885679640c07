//! Session gate for protected pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Layered over the page router. A request for a protected page without a
//! live session is answered with a redirect to `/login` before the page
//! renderer ever sees it. An accepted session rides along in the request
//! extensions so the renderer can show who is signed in without a second
//! lookup.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::SignedCookieJar;

use super::auth::{LOGIN_PATH, resolve_session};
use crate::state::AppState;

/// Path prefixes that require a session.
pub const PROTECTED_PREFIXES: &[&str] = &["/dashboard"];

/// Whether `path` is a protected page or lives beneath one.
#[must_use]
pub fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// Middleware: redirect anonymous visitors of protected pages to `/login`.
pub async fn require_session(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if !is_protected(request.uri().path()) {
        return next.run(request).await;
    }

    match resolve_session(&state, &jar).await {
        Ok(Some(user)) => {
            tracing::debug!(user_id = %user.id, label = %user.display_label(), "session accepted");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => Redirect::temporary(LOGIN_PATH).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "session lookup failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
