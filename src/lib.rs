//! SwApp Auth - Main Library
//!
//! The authentication and user-management service of the SwApp
//! marketplace: registration, JWT login with refresh and revocation,
//! profile maintenance with picture upload, account deletion, password
//! change, and transactional emails sent off the request path.
//!
//! # Module Structure
//!
//! - **`shared`** - Configuration and field-level validation errors
//! - **`backend`** - Axum server, persistence, tokens, handlers and
//!   notification workers
//!
//! # Usage
//!
//! ```rust,no_run
//! use swapp_auth::backend::server::create_app;
//! use swapp_auth::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Binaries
//!
//! - `swapp-auth-server` - The HTTP service
//! - `create_superuser` - Creates an administrator account
//!
//! # Error Handling
//!
//! - `shared::ConfigError` for configuration
//! - `backend::BackendError` for request handling
//! - `backend::error::StartupError` for server startup

/// Shared types and configuration
pub mod shared;

/// Backend server-side code
pub mod backend;
