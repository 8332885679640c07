//! Auth routes: social sign-in, OAuth callback, session lookup, sign-out.
//!
//! Every cookie set here goes through a `SignedCookieJar` keyed from the
//! configured auth secret, so a forged or edited cookie reads as absent.

use std::sync::Arc;

use axum::extract::{FromRef, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use client::net::types::{SessionInfo, SessionResponse, SignOutResponse, SocialSignInRequest, SocialSignInResponse, User};
use serde::Deserialize;
use time::Duration;

use crate::services::identity::{IdentityProvider, Provider};
use crate::services::{accounts, session};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "polylaunch.session_token";
pub const OAUTH_STATE_COOKIE: &str = "polylaunch.oauth_state";
pub const OAUTH_CALLBACK_COOKIE: &str = "polylaunch.oauth_callback";

/// Where a completed sign-in lands when no usable callback was supplied.
pub const DEFAULT_CALLBACK: &str = "/";
/// Where a failed or cancelled sign-in lands.
pub const LOGIN_PATH: &str = "/login";

const OAUTH_STATE_TTL_MINUTES: i64 = 10;

fn cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut c = cookie(name, String::new(), secure);
    c.set_max_age(Duration::ZERO);
    c
}

/// Reduce a requested post-sign-in destination to a same-origin path.
///
/// Relative paths are kept as long as they cannot be read as a
/// protocol-relative URL. Absolute URLs are accepted only when they point at
/// `base_url`, and are cut down to their path. Anything else becomes
/// [`DEFAULT_CALLBACK`].
pub(crate) fn safe_callback(raw: Option<&str>, base_url: &str) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return DEFAULT_CALLBACK.to_owned();
    };
    let path = match raw.strip_prefix(base_url) {
        Some("") => "/",
        Some(rest) => rest,
        None => raw,
    };
    if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') {
        path.to_owned()
    } else {
        DEFAULT_CALLBACK.to_owned()
    }
}

// =============================================================================
// SESSION LOOKUP
// =============================================================================

/// Resolve the current session from a signed cookie jar.
///
/// Returns `None` when the cookie is missing, forged, or points at an
/// expired or deleted session.
pub(crate) async fn resolve_session(
    state: &AppState,
    jar: &SignedCookieJar,
) -> Result<Option<session::SessionUser>, sqlx::Error> {
    let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_owned()) else {
        return Ok(None);
    };
    if token.is_empty() {
        return Ok(None);
    }
    session::validate_session(&state.pool, &token).await
}

/// Wire form of a session for the client.
pub(crate) fn session_response(user: &session::SessionUser) -> SessionResponse {
    SessionResponse {
        user: User {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            image: user.image.clone(),
            label: user.display_label(),
        },
        session: SessionInfo { expires_at: user.expires_at },
    }
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = SignedCookieJar::from_headers(&parts.headers, Key::from_ref(&app_state));
        let user = resolve_session(&app_state, &jar)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(Self { user })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/get-session`: current session, or `null`.
pub async fn get_session(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    match resolve_session(&state, &jar).await {
        Ok(found) => Json(found.as_ref().map(session_response)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "session lookup failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn lookup_provider(state: &AppState, id: &str) -> Result<Arc<dyn IdentityProvider>, Response> {
    let provider: Provider = id
        .parse()
        .map_err(|_| (StatusCode::NOT_FOUND, "provider not found").into_response())?;
    state.providers.get(provider).cloned().ok_or_else(|| {
        tracing::warn!(%provider, "sign-in requested for unconfigured provider");
        (StatusCode::NOT_FOUND, "provider not found").into_response()
    })
}

/// Start an OAuth round trip: remember state and callback, return the URL.
fn begin_sign_in(
    state: &AppState,
    jar: SignedCookieJar,
    provider: &dyn IdentityProvider,
    callback: Option<&str>,
) -> (SignedCookieJar, String) {
    let secure = state.auth.cookie_secure;
    let oauth_state = session::generate_token();
    let callback = safe_callback(callback, &state.auth.base_url);
    let redirect_uri = state.auth.callback_url(provider.provider().as_str());
    let url = provider.authorize_url(&oauth_state, &redirect_uri);

    let mut state_cookie = cookie(OAUTH_STATE_COOKIE, oauth_state, secure);
    state_cookie.set_max_age(Duration::minutes(OAUTH_STATE_TTL_MINUTES));
    let mut callback_cookie = cookie(OAUTH_CALLBACK_COOKIE, callback, secure);
    callback_cookie.set_max_age(Duration::minutes(OAUTH_STATE_TTL_MINUTES));

    (jar.add(state_cookie).add(callback_cookie), url)
}

/// `POST /api/auth/sign-in/social`: JSON variant used by the login page.
pub async fn sign_in_social(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Json(body): Json<SocialSignInRequest>,
) -> Response {
    let provider = match lookup_provider(&state, &body.provider) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let (jar, url) = begin_sign_in(&state, jar, provider.as_ref(), body.callback_url.as_deref());
    (jar, Json(SocialSignInResponse { url, redirect: true })).into_response()
}

#[derive(Deserialize)]
pub struct SignInQuery {
    #[serde(rename = "callbackURL")]
    callback_url: Option<String>,
}

/// `GET /api/auth/sign-in/{provider}`: redirect variant for plain links.
pub async fn sign_in_redirect(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(provider_id): Path<String>,
    Query(query): Query<SignInQuery>,
) -> Response {
    let provider = match lookup_provider(&state, &provider_id) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let (jar, url) = begin_sign_in(&state, jar, provider.as_ref(), query.callback_url.as_deref());
    (jar, Redirect::temporary(&url)).into_response()
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// `GET /api/auth/callback/{provider}`: exchange code, upsert user, set
/// the session cookie, redirect to the remembered callback.
pub async fn oauth_callback(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(provider_id): Path<String>,
    Query(params): Query<CallbackQuery>,
) -> Response {
    let provider = match lookup_provider(&state, &provider_id) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let secure = state.auth.cookie_secure;

    if let Some(error) = params.error.as_deref() {
        tracing::warn!(%provider_id, %error, "provider returned an error");
        let jar = jar
            .add(expired_cookie(OAUTH_STATE_COOKIE, secure))
            .add(expired_cookie(OAUTH_CALLBACK_COOKIE, secure));
        return (jar, Redirect::temporary(LOGIN_PATH)).into_response();
    }

    // Verify OAuth CSRF state from cookie.
    let Some(callback_state) = params.state.as_deref() else {
        return (StatusCode::BAD_REQUEST, "missing oauth state").into_response();
    };
    let expected_state = jar
        .get(OAUTH_STATE_COOKIE)
        .map(|c| c.value().to_owned())
        .unwrap_or_default();
    if expected_state.is_empty() || expected_state != callback_state {
        return (StatusCode::UNAUTHORIZED, "invalid oauth state").into_response();
    }
    let Some(code) = params.code.as_deref() else {
        return (StatusCode::BAD_REQUEST, "missing authorization code").into_response();
    };

    let redirect_uri = state.auth.callback_url(provider.provider().as_str());
    let profile = match provider.fetch_profile(code, &redirect_uri).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, %provider_id, "profile fetch failed");
            return (StatusCode::BAD_GATEWAY, "sign-in with provider failed").into_response();
        }
    };

    let user_id = match accounts::upsert_user(&state.pool, provider.provider(), &profile).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "user upsert failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to create user").into_response();
        }
    };

    let token = match session::create_session(&state.pool, &user_id, state.auth.session_ttl_secs).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to create session").into_response();
        }
    };
    tracing::info!(%user_id, %provider_id, "signed in");

    let callback = safe_callback(
        jar.get(OAUTH_CALLBACK_COOKIE).as_ref().map(Cookie::value),
        &state.auth.base_url,
    );

    let mut session_cookie = cookie(SESSION_COOKIE, token, secure);
    session_cookie.set_max_age(Duration::seconds(state.auth.session_ttl_secs));
    let jar = jar
        .add(session_cookie)
        .add(expired_cookie(OAUTH_STATE_COOKIE, secure))
        .add(expired_cookie(OAUTH_CALLBACK_COOKIE, secure));
    (jar, Redirect::temporary(&callback)).into_response()
}

/// `POST /api/auth/sign-out`: delete the session if any, clear the cookie.
///
/// Succeeds without a session so a stale page can always sign out.
pub async fn sign_out(State(state): State<AppState>, jar: SignedCookieJar) -> impl IntoResponse {
    if let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_owned()) {
        if let Err(e) = session::delete_session(&state.pool, &token).await {
            tracing::warn!(error = %e, "session delete failed during sign-out");
        }
    }
    let jar = jar.add(expired_cookie(SESSION_COOKIE, state.auth.cookie_secure));
    (jar, Json(SignOutResponse { success: true }))
}

/// `GET /api/auth/me`: current user; `401` without a session.
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(session_response(&auth.user).user)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
