//! Backend Module
//!
//! All server-side code of the SwApp authentication service.
//!
//! # Architecture
//!
//! - **`server`** - Initialization, application state, database setup
//! - **`routes`** - Route configuration and router assembly
//! - **`auth`** - Users, credentials, tokens and account handlers
//! - **`middleware`** - Bearer-token authentication
//! - **`notifications`** - Queued account emails and mail transports
//! - **`error`** - Backend error taxonomy and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication and user management
//! ├── middleware/     - Request middleware
//! ├── notifications/  - Email dispatch
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`; the error decides the status
//! code and the JSON body. Server-side causes are logged and replaced by a
//! generic message.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Account notification emails
pub mod notifications;

pub use error::BackendError;
pub use server::{create_app, AppState};
