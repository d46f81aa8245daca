//! Registration API integration tests

use axum::http::StatusCode;
use serde_json::{json, Value};
use swapp_auth::backend::auth::handlers::register::USER_REGISTERED;
use swapp_auth::backend::auth::users::{CPF_TAKEN, EMAIL_TAKEN};
use swapp_auth::shared::error::REQUIRED;

use crate::common::{count_rows, registration_body, TestApp, DEFAULT_PASSWORD};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new().await;

    let response = app.register(registration_body("a@x.com", "11122233344")).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], USER_REGISTERED);
    assert_eq!(body["email"], "a@x.com");
    assert!(body["id"].as_i64().is_some());
    assert!(body.get("password").is_none());
    assert_eq!(count_rows(&app.pool, "users").await, 1);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    app.create_test_user("a@x.com", "11122233344").await;

    let response = app.register(registration_body("a@x.com", "55566677788")).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_field_error!(body, "email", EMAIL_TAKEN);
    assert_eq!(count_rows(&app.pool, "users").await, 1);
}

#[tokio::test]
async fn test_register_duplicate_cpf() {
    let app = TestApp::new().await;
    app.create_test_user("a@x.com", "11122233344").await;

    let response = app.register(registration_body("b@x.com", "11122233344")).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_field_error!(body, "cpf", CPF_TAKEN);
}

#[tokio::test]
async fn test_register_reports_every_missing_field() {
    let app = TestApp::new().await;

    let response = app.register(json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    for field in ["first_name", "last_name", "email", "password", "cpf"] {
        assert_field_error!(body, field, REQUIRED);
    }
    assert_eq!(count_rows(&app.pool, "users").await, 0);
}

#[tokio::test]
async fn test_register_rejects_malformed_fields_together() {
    let app = TestApp::new().await;

    let response = app
        .register(json!({
            "first_name": "Ana",
            "last_name": "Souza",
            "email": "not-an-email",
            "password": DEFAULT_PASSWORD,
            "cpf": "123",
            "birth_date": "31/12/1990",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_field_error!(body, "email");
    assert_field_error!(body, "cpf");
    assert_field_error!(body, "birth_date");
    assert!(body.get("first_name").is_none());
}

#[tokio::test]
async fn test_register_stores_bcrypt_hash() {
    let app = TestApp::new().await;
    app.create_test_user("a@x.com", "11122233344").await;

    let hash = crate::common::password_hash_of(&app.pool, "a@x.com").await;

    assert_ne!(hash, DEFAULT_PASSWORD);
    assert!(hash.starts_with("$2"));
}

#[tokio::test]
async fn test_register_accepts_optional_profile_fields() {
    let app = TestApp::new().await;
    let mut body = registration_body("a@x.com", "11122233344");
    body["city"] = json!("Recife");
    body["birth_date"] = json!("1990-05-17");

    app.register(body).await.assert_status(StatusCode::CREATED);

    let tokens: Value = app.login("a@x.com", DEFAULT_PASSWORD).await.json();
    let profile: Value = app.detail(tokens["access"].as_str().unwrap()).await.json();
    assert_eq!(profile["city"], "Recife");
    assert_eq!(profile["birth_date"], "1990-05-17");
}
