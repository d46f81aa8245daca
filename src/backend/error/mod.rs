//! Backend Error Module
//!
//! This module defines the error types returned by HTTP handlers and the
//! server startup path.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError taxonomy and StartupError
//! └── conversion.rs - IntoResponse and extractor-rejection conversions
//! ```
//!
//! # Propagation Policy
//!
//! - Field validation failures are collected and returned wholesale.
//! - Authentication failures are deliberately generic.
//! - Persistence and hashing failures surface as generic 500s; the cause is
//!   only logged.
//! - Notification failures never reach this module at all; the dispatcher
//!   swallows and logs them on the worker side.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, StartupError, GENERIC_SERVER_ERROR};
