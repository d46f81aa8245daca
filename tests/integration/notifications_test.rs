//! Notification integration tests
//!
//! Account actions queue an email that the background workers deliver
//! through the capturing mailer.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{path, registration_body, TestApp, DEFAULT_PASSWORD};

const WAIT: Duration = Duration::from_secs(2);

#[tokio::test]
async fn test_registration_sends_welcome_email() {
    let app = TestApp::new().await;

    app.register(registration_body("a@x.com", "11122233344"))
        .await
        .assert_status(StatusCode::CREATED);

    let sent = app.mailer.wait_for(1, WAIT).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@x.com");
    assert_eq!(sent[0].subject, "Welcome to SwApp!");
    assert_contains!(sent[0].text_body, "Hello Ana");
}

#[tokio::test]
async fn test_failed_request_sends_nothing() {
    let app = TestApp::new().await;

    app.register(json!({ "email": "a@x.com" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_account_changes_notify_the_user() {
    let app = TestApp::new().await;
    let user = app.create_test_user("a@x.com", "11122233344").await;

    app.server
        .put(&path("/update"))
        .authorization_bearer(&user.access)
        .json(&json!({ "email": "new@x.com" }))
        .await
        .assert_status_ok();
    app.server
        .put(&path("/change-password"))
        .authorization_bearer(&user.access)
        .json(&json!({
            "currentPassword": DEFAULT_PASSWORD,
            "newPassword": "another-one",
            "confirmNewPassword": "another-one",
        }))
        .await
        .assert_status_ok();
    app.server
        .delete(&path("/delete"))
        .authorization_bearer(&user.access)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let sent = app.mailer.wait_for(4, WAIT).await;
    let mut subjects: Vec<_> = sent.iter().map(|m| m.subject.as_str()).collect();
    subjects.sort_unstable();
    assert_eq!(
        subjects,
        vec![
            "Welcome to SwApp!",
            "Your SwApp account was deleted",
            "Your SwApp password was changed",
            "Your SwApp profile was updated",
        ]
    );
    assert!(sent
        .iter()
        .filter(|m| m.subject != "Welcome to SwApp!")
        .all(|m| m.to == "new@x.com"));
}
