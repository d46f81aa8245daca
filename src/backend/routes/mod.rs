//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports and documentation
//! ├── router.rs     - Main router creation
//! └── api_routes.rs - Account endpoints
//! ```
//!
//! # Routes
//!
//! - `GET /health`
//! - `POST {prefix}/register`, `POST {prefix}/login`, `POST {prefix}/token/refresh`
//! - `POST {prefix}/logout`, `PUT {prefix}/update`, `DELETE {prefix}/delete`,
//!   `GET {prefix}/detail`, `PUT {prefix}/change-password` (authenticated)
//!
//! `{prefix}` defaults to `/api/v1/users`.

/// Main router creation
pub mod router;

/// Account API routes
pub mod api_routes;

pub use router::create_router;
