//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Label shown when no user is known.
pub const ANONYMOUS_LABEL: &str = "User";

/// Authentication state tracking the current user and loading status.
///
/// Starts out loading: the session is unknown until the first
/// `/api/auth/get-session` round trip completes.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

/// Session already resolved by the server for the current request.
///
/// Provided as context during server rendering of gated pages, so the first
/// paint already knows who is signed in.
#[derive(Clone, Debug)]
pub struct ServerSession(pub User);

impl AuthState {
    /// State seeded from a session known up front; stays loading otherwise.
    #[must_use]
    pub fn seeded(user: Option<User>) -> Self {
        let mut state = Self::default();
        if user.is_some() {
            state.resolve(user);
        }
        state
    }

    /// Settle the state with the result of a session lookup.
    pub fn resolve(&mut self, user: Option<User>) {
        self.user = user;
        self.loading = false;
    }

    /// Label for the signed-in user, as computed by the server.
    #[must_use]
    pub fn label(&self) -> &str {
        self.user.as_ref().map_or(ANONYMOUS_LABEL, |u| u.label.as_str())
    }
}
