//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer-token authentication for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware::from_fn_with_state, routing::get, Router};
//! use swapp_auth::backend::middleware::{auth_middleware, AuthUser};
//! use swapp_auth::backend::server::AppState;
//!
//! async fn me(AuthUser(user): AuthUser) -> String {
//!     user.email
//! }
//!
//! fn protected(state: AppState) -> Router<AppState> {
//!     Router::new()
//!         .route("/me", get(me))
//!         .route_layer(from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
