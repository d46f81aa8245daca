//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - In-memory database fixtures
//! - A test server wired to a capturing mailer
//! - Custom assertion macros

#![allow(dead_code)]

#[macro_use]
pub mod assertions;
pub mod auth_helpers;
pub mod database;

// Re-export commonly used utilities
pub use auth_helpers::*;
pub use database::*;
