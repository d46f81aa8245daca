//! Authentication API integration tests
//!
//! Tests for login, token refresh, logout and bearer authentication.

use axum::http::StatusCode;
use serde_json::{json, Value};
use swapp_auth::backend::auth::handlers::login::{
    CREDENTIALS_REQUIRED, INVALID_CREDENTIALS, LOGIN_SUCCESSFUL,
};
use swapp_auth::backend::auth::handlers::logout::{LOGOUT_FAILED, LOGOUT_SUCCESSFUL};
use swapp_auth::backend::auth::handlers::refresh::TOKEN_INVALID_OR_EXPIRED;
use swapp_auth::backend::middleware::auth::{CREDENTIALS_MISSING, TOKEN_INVALID};

use crate::common::{count_rows, path, test_config_builder, TestApp, DEFAULT_PASSWORD};

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    app.create_test_user("a@x.com", "11122233344").await;

    let response = app.login("a@x.com", DEFAULT_PASSWORD).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], LOGIN_SUCCESSFUL);
    assert!(body["access"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["refresh"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.create_test_user("a@x.com", "11122233344").await;

    let unknown = app.login("nobody@x.com", DEFAULT_PASSWORD).await;
    let wrong = app.login("a@x.com", "wrong-password").await;

    unknown.assert_status(StatusCode::UNAUTHORIZED);
    wrong.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.json::<Value>(), wrong.json::<Value>());
    assert_detail!(wrong.json::<Value>(), INVALID_CREDENTIALS);
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post(&path("/login"))
        .json(&json!({ "email": "a@x.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_detail!(response.json::<Value>(), CREDENTIALS_REQUIRED);
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;

    let response = app
        .server
        .post(&path("/token/refresh"))
        .json(&json!({ "refresh": user.refresh }))
        .await;

    response.assert_status_ok();
    let access = response.json::<Value>()["access"].as_str().unwrap().to_string();
    app.detail(&access).await.assert_status_ok();
}

#[tokio::test]
async fn test_expired_access_token_is_rejected_until_refreshed() {
    let config = test_config_builder()
        .token_ttls(1, 60)
        .build()
        .expect("valid config");
    let app = TestApp::with_config(config).await;
    let user = app.create_test_user("a@x.com", "11122233344").await;

    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;

    let response = app.detail(&user.access).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_detail!(response.json::<Value>(), TOKEN_INVALID);

    let refreshed = app
        .server
        .post(&path("/token/refresh"))
        .json(&json!({ "refresh": user.refresh }))
        .await;
    refreshed.assert_status_ok();
    let access = refreshed.json::<Value>()["access"].as_str().unwrap().to_string();
    app.detail(&access).await.assert_status_ok();
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;

    let response = app
        .server
        .post(&path("/token/refresh"))
        .json(&json!({ "refresh": user.access }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_detail!(response.json::<Value>(), TOKEN_INVALID_OR_EXPIRED);
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;

    let response = app
        .server
        .post(&path("/logout"))
        .authorization_bearer(&user.access)
        .json(&json!({ "refresh": user.refresh }))
        .await;
    response.assert_status_ok();
    assert_detail!(response.json::<Value>(), LOGOUT_SUCCESSFUL);
    assert_eq!(count_rows(&app.pool, "token_blacklist").await, 1);

    let reuse = app
        .server
        .post(&path("/token/refresh"))
        .json(&json!({ "refresh": user.refresh }))
        .await;
    reuse.assert_status(StatusCode::UNAUTHORIZED);

    let again = app
        .server
        .post(&path("/logout"))
        .authorization_bearer(&user.access)
        .json(&json!({ "refresh": user.refresh }))
        .await;
    again.assert_status(StatusCode::BAD_REQUEST);
    assert_detail!(again.json::<Value>(), LOGOUT_FAILED);
}

#[tokio::test]
async fn test_logout_rejects_another_users_token() {
    let app = TestApp::new().await;
    let ana = app.create_test_user("a@x.com", "11122233344").await;
    let bia = app.create_test_user("b@x.com", "55566677788").await;

    let response = app
        .server
        .post(&path("/logout"))
        .authorization_bearer(&ana.access)
        .json(&json!({ "refresh": bia.refresh }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(count_rows(&app.pool, "token_blacklist").await, 0);
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::new().await;

    let response = app.server.get(&path("/detail")).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_detail!(response.json::<Value>(), CREDENTIALS_MISSING);
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get(&path("/detail"))
        .authorization_bearer("not-a-jwt")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_detail!(response.json::<Value>(), TOKEN_INVALID);
}

#[tokio::test]
async fn test_protected_route_rejects_refresh_token() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;

    app.detail(&user.refresh)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/v1/users/nowhere").await;

    response.assert_status_not_found();
    assert!(response.json::<Value>().get("detail").is_some());
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}
