//! Server Module
//!
//! This module contains the code that turns configuration into a running
//! Axum application.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── state.rs  - AppState and FromRef implementations
//! ├── config.rs - Database pool and migrations
//! ├── init.rs   - Mailer, dispatcher and app creation
//! └── health.rs - GET /health
//! ```
//!
//! # State Management
//!
//! `AppState` holds the configuration, the SQLite pool, the token service
//! and the notification queue handle. Handlers pull the pieces they need
//! through `FromRef`.

/// Application state management
pub mod state;

/// Database loading
pub mod config;

/// Server initialization
pub mod init;

/// Liveness endpoint
pub mod health;

pub use init::{build_mailer, build_state, create_app};
pub use state::AppState;
