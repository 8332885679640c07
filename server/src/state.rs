//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the SQLite pool, the immutable auth configuration, the signed-cookie
//! key derived from the auth secret, and the configured identity providers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::SqlitePool;

use crate::config::AuthConfig;
use crate::services::identity::{GoogleProvider, IdentityProvider, Provider};

/// Identity providers enabled by configuration, keyed by kind.
#[derive(Clone, Default)]
pub struct Providers {
    inner: HashMap<Provider, Arc<dyn IdentityProvider>>,
}

impl Providers {
    /// Build the provider set from auth configuration.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        let mut providers = Self::default();
        if let Some(google) = &config.google {
            providers.insert(Arc::new(GoogleProvider::new(
                google.client_id.clone(),
                google.client_secret.clone(),
            )));
        }
        providers
    }

    pub fn insert(&mut self, provider: Arc<dyn IdentityProvider>) {
        self.inner.insert(provider.provider(), provider);
    }

    #[must_use]
    pub fn get(&self, provider: Provider) -> Option<&Arc<dyn IdentityProvider>> {
        self.inner.get(&provider)
    }
}

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth: Arc<AuthConfig>,
    pub providers: Providers,
    cookie_key: Key,
}

impl AppState {
    /// The auth secret must already be validated as at least 32 bytes;
    /// shorter input makes key derivation panic.
    #[must_use]
    pub fn new(pool: SqlitePool, auth: AuthConfig, providers: Providers) -> Self {
        let cookie_key = Key::derive_from(auth.secret.as_bytes());
        Self { pool, auth: Arc::new(auth), providers, cookie_key }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
