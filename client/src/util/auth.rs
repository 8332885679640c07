//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server gate already keeps anonymous visitors off protected routes.
//! These helpers cover the browser side: learning who is signed in after
//! hydration, and leaving a protected page once its session is gone.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Where unauthenticated visitors of protected pages are sent.
pub const LOGIN_PATH: &str = "/login";

/// Whether a protected page should leave for `/login`.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Resolve the session once, in the browser, and settle `auth`.
pub fn load_session(auth: RwSignal<AuthState>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let user = crate::net::api::fetch_session().await.map(|s| s.user);
        if user.is_none() {
            log::debug!("no active session");
        }
        auth.update(|a| a.resolve(user));
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = auth;
    }
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(LOGIN_PATH, NavigateOptions::default());
        }
    });
}

/// Full-page navigation. Leaving for the identity provider, or dropping the
/// signed-in page after sign-out, must not go through the client router.
pub fn assign_location(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                log::warn!("navigation to {url} failed: {e:?}");
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
    }
}
