//! REST API helpers for the auth endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so auth failures
//! degrade UI behavior without crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::SessionResponse;
#[cfg(any(test, feature = "hydrate"))]
use super::types::SocialSignInRequest;

#[cfg(any(test, feature = "hydrate"))]
const GET_SESSION_ENDPOINT: &str = "/api/auth/get-session";
#[cfg(any(test, feature = "hydrate"))]
const SIGN_IN_SOCIAL_ENDPOINT: &str = "/api/auth/sign-in/social";
#[cfg(any(test, feature = "hydrate"))]
const SIGN_OUT_ENDPOINT: &str = "/api/auth/sign-out";

#[cfg(any(test, feature = "hydrate"))]
fn sign_in_payload(provider: &str, callback: &str) -> SocialSignInRequest {
    SocialSignInRequest { provider: provider.to_owned(), callback_url: Some(callback.to_owned()) }
}

#[cfg(any(test, feature = "hydrate"))]
fn sign_in_failed_message(status: u16) -> String {
    format!("sign-in request failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn sign_out_failed_message(status: u16) -> String {
    format!("sign-out request failed: {status}")
}

/// Fetch the current session from `/api/auth/get-session`.
/// Returns `None` if not authenticated, on failure, or on the server.
pub async fn fetch_session() -> Option<SessionResponse> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(GET_SESSION_ENDPOINT).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<Option<SessionResponse>>().await.ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Begin a social sign-in via `POST /api/auth/sign-in/social`.
///
/// Returns the provider URL the browser should navigate to.
///
/// # Errors
///
/// Returns an error string if the HTTP request fails, the server responds
/// with a non-OK status, or the provider is not configured.
pub async fn sign_in_social(provider: &str, callback: &str) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(SIGN_IN_SOCIAL_ENDPOINT)
            .json(&sign_in_payload(provider, callback))
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(sign_in_failed_message(resp.status()));
        }
        let body: super::types::SocialSignInResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.url)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (provider, callback);
        Err("not available on server".to_owned())
    }
}

/// End the current session via `POST /api/auth/sign-out`.
///
/// # Errors
///
/// Returns an error string if the HTTP request fails or the server responds
/// with a non-OK status.
pub async fn sign_out() -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(SIGN_OUT_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(sign_out_failed_message(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}
