//! Shared JSON DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! The server serializes these exact types, so the browser and the API agree
//! on field names by construction. Field names follow the JSON the auth
//! endpoints have always spoken (`callbackURL`, `expiresAt`).

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Authenticated user as returned by `/api/auth/get-session` and `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    /// Display label: email, else name, else `"User"`.
    pub label: String,
}

/// Session metadata alongside the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Unix seconds after which the session is no longer honored.
    #[serde(rename = "expiresAt")]
    pub expires_at: i64,
}

/// Body of `GET /api/auth/get-session` when a session exists. The endpoint
/// answers `null` otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: User,
    pub session: SessionInfo,
}

/// Body of `POST /api/auth/sign-in/social`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSignInRequest {
    /// Provider id, e.g. `"google"`.
    pub provider: String,
    /// Same-origin path to land on after the provider round trip.
    #[serde(rename = "callbackURL", default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// Response to a social sign-in request: where to send the browser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSignInResponse {
    pub url: String,
    pub redirect: bool,
}

/// Response to `POST /api/auth/sign-out`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignOutResponse {
    pub success: bool,
}
