//! Authentication test helpers
//!
//! Provides a test server over the full router plus shortcuts for the
//! register and login flows.

use std::sync::Arc;

use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use swapp_auth::backend::auth::handlers::types::LoginResponse;
use swapp_auth::backend::notifications::MemoryMailer;
use swapp_auth::backend::routes::create_router;
use swapp_auth::backend::server::build_state;
use swapp_auth::shared::AppConfig;

use super::database::{create_test_pool, test_config};

pub const DEFAULT_PASSWORD: &str = "secret123";
pub const API: &str = "/api/v1/users";

/// Test user credentials
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub access: String,
    pub refresh: String,
}

/// Running application backed by an in-memory database
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub mailer: Arc<MemoryMailer>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Same wiring as [`TestApp::new`] with a custom configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let pool = create_test_pool().await;
        let mailer = Arc::new(MemoryMailer::new());
        let state = build_state(config, pool.clone(), mailer.clone());
        let server = TestServer::new(create_router(state)).expect("Failed to start test server");
        Self { server, pool, mailer }
    }

    pub async fn register(&self, body: Value) -> TestResponse {
        self.server.post(&path("/register")).json(&body).await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.server
            .post(&path("/login"))
            .json(&json!({ "email": email, "password": password }))
            .await
    }

    /// Register with the default password and log in
    pub async fn create_test_user(&self, email: &str, cpf: &str) -> TestUser {
        let response = self.register(registration_body(email, cpf)).await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let id = response.json::<Value>()["id"].as_i64().expect("id in response");

        let tokens: LoginResponse = self.login(email, DEFAULT_PASSWORD).await.json();
        TestUser {
            id,
            email: email.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            access: tokens.access,
            refresh: tokens.refresh,
        }
    }

    pub async fn detail(&self, access: &str) -> TestResponse {
        self.server
            .get(&path("/detail"))
            .authorization_bearer(access)
            .await
    }
}

/// Full path of an account endpoint
pub fn path(route: &str) -> String {
    format!("{}{}", API, route)
}

/// Minimal valid registration body
pub fn registration_body(email: &str, cpf: &str) -> Value {
    json!({
        "first_name": "Ana",
        "last_name": "Souza",
        "email": email,
        "password": DEFAULT_PASSWORD,
        "cpf": cpf,
    })
}

/// Smallest byte string the service accepts as a PNG
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0, 0, 0, 13, b'I', b'H', b'D', b'R']);
    bytes
}
