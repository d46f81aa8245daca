//! Account API integration tests
//!
//! Detail, partial update, picture upload, password change and deletion.

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{json, Value};
use swapp_auth::backend::auth::handlers::change_password::{
    PASSWORDS_DO_NOT_MATCH, PASSWORD_CHANGED, WRONG_CURRENT_PASSWORD,
};
use swapp_auth::backend::auth::handlers::delete::USER_DELETED;
use swapp_auth::backend::auth::handlers::update::PROFILE_UPDATED;
use swapp_auth::backend::auth::users::EMAIL_TAKEN;
use swapp_auth::backend::auth::validation::INVALID_IMAGE;

use crate::common::{
    count_rows, password_hash_of, path, png_bytes, test_config_builder, TestApp, DEFAULT_PASSWORD,
};

#[tokio::test]
async fn test_account_lifecycle() {
    let app = TestApp::new().await;

    let registered = app
        .register(json!({
            "first_name": "Ana",
            "last_name": "Souza",
            "email": "a@x.com",
            "password": "secret123",
            "cpf": "11122233344",
        }))
        .await;
    registered.assert_status(StatusCode::CREATED);

    let login = app.login("a@x.com", "secret123").await;
    login.assert_status_ok();
    let access = login.json::<Value>()["access"].as_str().unwrap().to_string();

    let detail = app.detail(&access).await;
    detail.assert_status_ok();
    let profile: Value = detail.json();
    assert_eq!(profile["email"], "a@x.com");
    assert_eq!(profile["cpf"], "11122233344");
    assert!(profile.get("password").is_none());
    assert!(profile.get("password_hash").is_none());

    let deleted = app
        .server
        .delete(&path("/delete"))
        .authorization_bearer(&access)
        .await;
    deleted.assert_status(StatusCode::NO_CONTENT);

    app.login("a@x.com", "secret123")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(count_rows(&app.pool, "users").await, 0);
}

#[tokio::test]
async fn test_deleted_account_tokens_are_rejected() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;

    app.server
        .delete(&path("/delete"))
        .authorization_bearer(&user.access)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.detail(&user.access)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.server
        .post(&path("/token/refresh"))
        .json(&json!({ "refresh": user.refresh }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;
    let hash_before = password_hash_of(&app.pool, "a@x.com").await;

    let response = app
        .server
        .put(&path("/update"))
        .authorization_bearer(&user.access)
        .json(&json!({ "city": "Recife", "first_name": "Beatriz" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], PROFILE_UPDATED);

    let profile: Value = app.detail(&user.access).await.json();
    assert_eq!(profile["city"], "Recife");
    assert_eq!(profile["first_name"], "Beatriz");
    assert_eq!(profile["last_name"], "Souza");
    assert_eq!(profile["email"], "a@x.com");
    assert_eq!(password_hash_of(&app.pool, "a@x.com").await, hash_before);
    app.login("a@x.com", DEFAULT_PASSWORD).await.assert_status_ok();
}

#[tokio::test]
async fn test_update_rejects_email_of_another_user() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;
    app.create_test_user("b@x.com", "55566677788").await;

    let response = app
        .server
        .put(&path("/update"))
        .authorization_bearer(&user.access)
        .json(&json!({ "email": "b@x.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_field_error!(response.json::<Value>(), "email", EMAIL_TAKEN);
}

#[tokio::test]
async fn test_update_accepts_own_email_unchanged() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;

    app.server
        .put(&path("/update"))
        .authorization_bearer(&user.access)
        .json(&json!({ "email": "a@x.com", "cpf": "11122233344" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_multipart_update_with_picture() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;

    let form = MultipartForm::new().add_text("city", "Olinda").add_part(
        "profile_picture",
        Part::bytes(png_bytes())
            .file_name("avatar.png")
            .mime_type("image/png"),
    );
    let response = app
        .server
        .put(&path("/update"))
        .authorization_bearer(&user.access)
        .multipart(form)
        .await;

    response.assert_status_ok();
    let profile: Value = app.detail(&user.access).await.json();
    assert_eq!(profile["city"], "Olinda");
    assert!(profile["profile_picture_url"]
        .as_str()
        .is_some_and(|url| url.starts_with("data:image/png;base64,")));
}

#[tokio::test]
async fn test_multipart_update_rejects_non_image() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;

    let form = MultipartForm::new().add_part(
        "profile_picture",
        Part::bytes(b"just some text".to_vec())
            .file_name("notes.png")
            .mime_type("image/png"),
    );
    let response = app
        .server
        .put(&path("/update"))
        .authorization_bearer(&user.access)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_field_error!(response.json::<Value>(), "profile_picture", INVALID_IMAGE);
    let profile: Value = app.detail(&user.access).await.json();
    assert!(profile["profile_picture_url"].is_null());
}

#[tokio::test]
async fn test_multipart_update_rejects_oversized_picture() {
    let config = test_config_builder()
        .max_image_bytes(8)
        .build()
        .expect("valid config");
    let app = TestApp::with_config(config).await;
    let user = app.create_test_user("a@x.com", "11122233344").await;

    let form = MultipartForm::new().add_part(
        "profile_picture",
        Part::bytes(png_bytes())
            .file_name("avatar.png")
            .mime_type("image/png"),
    );
    let response = app
        .server
        .put(&path("/update"))
        .authorization_bearer(&user.access)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_field_error!(
        response.json::<Value>(),
        "profile_picture",
        "Image must not exceed 8 bytes."
    );
    let profile: Value = app.detail(&user.access).await.json();
    assert!(profile["profile_picture_url"].is_null());
}

#[tokio::test]
async fn test_change_password_mismatch_keeps_hash() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;
    let before = password_hash_of(&app.pool, "a@x.com").await;

    let response = app
        .server
        .put(&path("/change-password"))
        .authorization_bearer(&user.access)
        .json(&json!({
            "currentPassword": DEFAULT_PASSWORD,
            "newPassword": "another-one",
            "confirmNewPassword": "different",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_field_error!(response.json::<Value>(), "confirmNewPassword", PASSWORDS_DO_NOT_MATCH);
    assert_eq!(password_hash_of(&app.pool, "a@x.com").await, before);
    app.login("a@x.com", DEFAULT_PASSWORD).await.assert_status_ok();
}

#[tokio::test]
async fn test_change_password_wrong_current() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;

    let response = app
        .server
        .put(&path("/change-password"))
        .authorization_bearer(&user.access)
        .json(&json!({
            "currentPassword": "not-it",
            "newPassword": "another-one",
            "confirmNewPassword": "another-one",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_field_error!(response.json::<Value>(), "currentPassword", WRONG_CURRENT_PASSWORD);
}

#[tokio::test]
async fn test_change_password_success() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;

    let response = app
        .server
        .put(&path("/change-password"))
        .authorization_bearer(&user.access)
        .json(&json!({
            "currentPassword": DEFAULT_PASSWORD,
            "newPassword": "another-one",
            "confirmNewPassword": "another-one",
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], PASSWORD_CHANGED);
    app.login("a@x.com", DEFAULT_PASSWORD)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.login("a@x.com", "another-one").await.assert_status_ok();
}

#[tokio::test]
async fn test_delete_response_message() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;

    let response = app
        .server
        .delete(&path("/delete"))
        .authorization_bearer(&user.access)
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    let text = response.text();
    if !text.is_empty() {
        assert_contains!(text, USER_DELETED);
    }
}
