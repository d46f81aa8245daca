//! Shared Module
//!
//! This module contains types that every layer of the service depends on:
//! the explicitly constructed application configuration and the field-level
//! validation error map returned to clients.

/// Field-level validation errors
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::FieldErrors;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
