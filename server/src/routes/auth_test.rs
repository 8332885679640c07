use super::*;
use crate::routes::test_support::*;
use crate::state::test_helpers::{test_app_state, test_app_state_with_google};

const BASE: &str = "http://localhost:3000";

// =============================================================================
// safe_callback
// =============================================================================

#[test]
fn safe_callback_defaults_when_missing_or_blank() {
    assert_eq!(safe_callback(None, BASE), DEFAULT_CALLBACK);
    assert_eq!(safe_callback(Some("   "), BASE), DEFAULT_CALLBACK);
}

#[test]
fn safe_callback_keeps_relative_paths() {
    assert_eq!(safe_callback(Some("/dashboard"), BASE), "/dashboard");
    assert_eq!(safe_callback(Some("/dashboard?tab=kit"), BASE), "/dashboard?tab=kit");
}

#[test]
fn safe_callback_rejects_foreign_and_protocol_relative_targets() {
    assert_eq!(safe_callback(Some("https://evil.example/"), BASE), DEFAULT_CALLBACK);
    assert_eq!(safe_callback(Some("//evil.example"), BASE), DEFAULT_CALLBACK);
    assert_eq!(safe_callback(Some("/\\evil.example"), BASE), DEFAULT_CALLBACK);
    assert_eq!(safe_callback(Some("dashboard"), BASE), DEFAULT_CALLBACK);
}

#[test]
fn safe_callback_strips_own_origin() {
    assert_eq!(safe_callback(Some("http://localhost:3000/dashboard"), BASE), "/dashboard");
    assert_eq!(safe_callback(Some("http://localhost:3000"), BASE), "/");
    assert_eq!(safe_callback(Some("http://localhost:3000.evil.example/x"), BASE), DEFAULT_CALLBACK);
}

// =============================================================================
// get-session
// =============================================================================

#[tokio::test]
async fn get_session_without_cookie_is_null() {
    let app = test_app(test_app_state().await);
    let response = send(&app, get_request("/api/auth/get-session", "")).await;
    assert_eq!(response.status(), 200);
    assert_eq!(body_string(response).await, "null");
}

#[tokio::test]
async fn get_session_with_unsigned_cookie_is_null() {
    let app = test_app(test_app_state().await);
    let forged = format!("{SESSION_COOKIE}=deadbeef");
    let response = send(&app, get_request("/api/auth/get-session", &forged)).await;
    assert_eq!(body_string(response).await, "null");
}

#[tokio::test]
async fn me_without_session_is_unauthorized() {
    let app = test_app(test_app_state().await);
    let response = send(&app, get_request("/api/auth/me", "")).await;
    assert_eq!(response.status(), 401);
}

// =============================================================================
// sign-in
// =============================================================================

#[tokio::test]
async fn sign_in_unknown_provider_is_not_found() {
    let app = test_app(test_app_state_with_google().await);
    let response = send(
        &app,
        post_json("/api/auth/sign-in/social", "", &serde_json::json!({ "provider": "myspace" })),
    )
    .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn sign_in_unconfigured_provider_is_not_found() {
    let app = test_app(test_app_state().await);
    let response = send(
        &app,
        post_json(
            "/api/auth/sign-in/social",
            "",
            &serde_json::json!({ "provider": "google", "callbackURL": "/dashboard" }),
        ),
    )
    .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn sign_in_social_returns_provider_url_and_flow_cookies() {
    let app = test_app(test_app_state_with_google().await);
    let response = send(
        &app,
        post_json(
            "/api/auth/sign-in/social",
            "",
            &serde_json::json!({ "provider": "google", "callbackURL": "/dashboard" }),
        ),
    )
    .await;
    assert_eq!(response.status(), 200);

    let names: Vec<String> = set_cookies(response.headers()).into_iter().map(|(n, _)| n).collect();
    assert!(names.contains(&OAUTH_STATE_COOKIE.to_owned()));
    assert!(names.contains(&OAUTH_CALLBACK_COOKIE.to_owned()));
    assert!(!names.contains(&SESSION_COOKIE.to_owned()));

    let body: SocialSignInResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(body.redirect);
    assert!(body.url.starts_with("https://idp.test/authorize?state="));
    assert!(body.url.contains("redirect_uri=http://localhost:3000/api/auth/callback/google"));
}

#[tokio::test]
async fn sign_in_redirect_variant_sends_browser_to_provider() {
    let app = test_app(test_app_state_with_google().await);
    let response = send(&app, get_request("/api/auth/sign-in/google?callbackURL=/dashboard", "")).await;
    assert_eq!(response.status(), 307);
    assert!(location(&response).unwrap().starts_with("https://idp.test/authorize"));
}

// =============================================================================
// callback
// =============================================================================

#[tokio::test]
async fn full_round_trip_creates_a_session() {
    let app = test_app(test_app_state_with_google().await);
    let cookies = sign_in(&app).await;

    let response = send(&app, get_request("/api/auth/get-session", &cookies)).await;
    assert_eq!(response.status(), 200);
    let body: SessionResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body.user.email.as_deref(), Some("ada@example.com"));
    assert_eq!(body.user.label, "ada@example.com");

    let response = send(&app, get_request("/api/auth/me", &cookies)).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn callback_without_state_cookie_is_rejected() {
    let app = test_app(test_app_state_with_google().await);
    let response = send(&app, get_request("/api/auth/callback/google?code=ok&state=abc", "")).await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn callback_without_state_param_is_bad_request() {
    let app = test_app(test_app_state_with_google().await);
    let response = send(&app, get_request("/api/auth/callback/google?code=ok", "")).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn callback_with_provider_error_returns_to_login() {
    let app = test_app(test_app_state_with_google().await);
    let response = send(&app, get_request("/api/auth/callback/google?error=access_denied", "")).await;
    assert_eq!(response.status(), 307);
    assert_eq!(location(&response).as_deref(), Some(LOGIN_PATH));
}

#[tokio::test]
async fn callback_with_rejected_code_is_bad_gateway() {
    let app = test_app(test_app_state_with_google().await);
    let response = send(
        &app,
        post_json(
            "/api/auth/sign-in/social",
            "",
            &serde_json::json!({ "provider": "google" }),
        ),
    )
    .await;
    let flow_cookies = cookie_header(&set_cookies(response.headers()));
    let body: SocialSignInResponse = serde_json::from_str(&body_string(response).await).unwrap();
    let state = reqwest::Url::parse(&body.url)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap();

    let response = send(
        &app,
        get_request(&format!("/api/auth/callback/google?code=bad-code&state={state}"), &flow_cookies),
    )
    .await;
    assert_eq!(response.status(), 502);
    assert!(set_cookies(response.headers()).iter().all(|(name, _)| name != SESSION_COOKIE));
}

// =============================================================================
// sign-out
// =============================================================================

#[tokio::test]
async fn sign_out_invalidates_session() {
    let app = test_app(test_app_state_with_google().await);
    let cookies = sign_in(&app).await;

    let response = send(&app, post_json("/api/auth/sign-out", &cookies, &serde_json::json!({}))).await;
    assert_eq!(response.status(), 200);
    let cleared = set_cookies(response.headers());
    assert!(cleared.iter().any(|(name, _)| name == SESSION_COOKIE));
    let body: SignOutResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(body.success);

    // The old cookie no longer maps to a session.
    let response = send(&app, get_request("/api/auth/get-session", &cookies)).await;
    assert_eq!(body_string(response).await, "null");
}

#[tokio::test]
async fn sign_out_without_session_still_succeeds() {
    let app = test_app(test_app_state().await);
    let response = send(&app, post_json("/api/auth/sign-out", "", &serde_json::json!({}))).await;
    assert_eq!(response.status(), 200);
}

// =============================================================================
// session_response
// =============================================================================

#[test]
fn session_response_carries_display_label() {
    let user = session::SessionUser {
        id: "u1".into(),
        email: None,
        name: None,
        image: None,
        expires_at: 42,
    };
    let response = session_response(&user);
    assert_eq!(response.user.label, "User");
    assert_eq!(response.session.expires_at, 42);
}
