use super::*;
use crate::routes::auth::SESSION_COOKIE;
use crate::routes::test_support::*;
use crate::state::test_helpers::{test_app_state, test_app_state_with_google};

#[test]
fn dashboard_and_children_are_protected() {
    assert!(is_protected("/dashboard"));
    assert!(is_protected("/dashboard/"));
    assert!(is_protected("/dashboard/settings"));
}

#[test]
fn public_paths_are_not_protected() {
    assert!(!is_protected("/"));
    assert!(!is_protected("/login"));
    assert!(!is_protected("/dashboards"));
    assert!(!is_protected("/api/auth/get-session"));
}

#[tokio::test]
async fn anonymous_dashboard_redirects_to_login() {
    let app = test_app(test_app_state().await);
    let response = send(&app, get_request("/dashboard", "")).await;
    assert_eq!(response.status(), 307);
    assert_eq!(location(&response).as_deref(), Some("/login"));
    assert!(!body_string(response).await.contains(PROTECTED_BODY));
}

#[tokio::test]
async fn anonymous_nested_dashboard_redirects_to_login() {
    let app = test_app(test_app_state().await);
    let response = send(&app, get_request("/dashboard/settings", "")).await;
    assert_eq!(response.status(), 307);
    assert_eq!(location(&response).as_deref(), Some("/login"));
}

#[tokio::test]
async fn public_pages_render_without_session() {
    let app = test_app(test_app_state().await);
    for path in ["/", "/login"] {
        let response = send(&app, get_request(path, "")).await;
        assert_eq!(response.status(), 200, "{path}");
    }
}

#[tokio::test]
async fn forged_session_cookie_redirects() {
    let app = test_app(test_app_state_with_google().await);
    let forged = format!("{SESSION_COOKIE}=not-a-signed-token");
    let response = send(&app, get_request("/dashboard", &forged)).await;
    assert_eq!(response.status(), 307);
    assert_eq!(location(&response).as_deref(), Some("/login"));
}

#[tokio::test]
async fn signed_in_user_reaches_dashboard() {
    let app = test_app(test_app_state_with_google().await);
    let cookies = sign_in(&app).await;

    for path in ["/dashboard", "/dashboard/settings"] {
        let response = send(&app, get_request(path, &cookies)).await;
        assert_eq!(response.status(), 200, "{path}");
        assert_eq!(body_string(response).await, PROTECTED_BODY);
    }
}

#[tokio::test]
async fn healthz_is_open() {
    let app = test_app(test_app_state().await);
    let response = send(&app, get_request("/healthz", "")).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn accepted_session_reaches_page_handler() {
    let app = test_app(test_app_state_with_google().await);
    let cookies = sign_in(&app).await;
    let response = send(&app, get_request("/dashboard/whoami", &cookies)).await;
    assert_eq!(response.status(), 200);
    assert_eq!(body_string(response).await, "ada@example.com");
}
