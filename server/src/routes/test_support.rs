//! Request helpers shared by router-level tests.

use axum::{Extension, Router};
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, header};
use axum::response::Response;
use axum::routing::get;
use tower::ServiceExt;

use super::app;
use crate::services::session::SessionUser;
use crate::state::AppState;

pub const PROTECTED_BODY: &str = "protected dashboard";

/// Stand-in for the Leptos page router.
pub fn stub_pages() -> Router {
    Router::new()
        .route("/", get(|| async { "landing" }))
        .route("/login", get(|| async { "login" }))
        .route("/dashboard", get(|| async { PROTECTED_BODY }))
        .route("/dashboard/settings", get(|| async { PROTECTED_BODY }))
        .route(
            "/dashboard/whoami",
            get(|Extension(user): Extension<SessionUser>| async move { user.display_label() }),
        )
}

pub fn test_app(state: AppState) -> Router {
    app(state, stub_pages())
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("router is infallible")
}

pub fn get_request(uri: &str, cookies: &str) -> Request<Body> {
    let mut builder = Request::get(uri);
    if !cookies.is_empty() {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, cookies: &str, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if !cookies.is_empty() {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// `name=value` pairs from every `Set-Cookie` header, in order.
pub fn set_cookies(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|raw| {
            let pair = raw.split(';').next()?;
            let (name, value) = pair.split_once('=')?;
            Some((name.trim().to_owned(), value.trim().to_owned()))
        })
        .collect()
}

/// Render cookies as a request `Cookie` header, skipping cleared ones.
pub fn cookie_header(cookies: &[(String, String)]) -> String {
    cookies
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Run the full sign-in round trip against the fake provider.
///
/// Returns the `Cookie` header value carrying the new session.
pub async fn sign_in(app: &Router) -> String {
    let response = send(
        app,
        post_json(
            "/api/auth/sign-in/social",
            "",
            &serde_json::json!({ "provider": "google", "callbackURL": "/dashboard" }),
        ),
    )
    .await;
    assert_eq!(response.status(), 200);
    let flow_cookies = cookie_header(&set_cookies(response.headers()));
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    let url = reqwest::Url::parse(body["url"].as_str().unwrap()).unwrap();
    let state = url
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap();

    let response = send(
        app,
        get_request(&format!("/api/auth/callback/google?code=ok&state={state}"), &flow_cookies),
    )
    .await;
    assert_eq!(response.status(), 307);
    assert_eq!(location(&response).as_deref(), Some("/dashboard"));
    cookie_header(&set_cookies(response.headers()))
}
