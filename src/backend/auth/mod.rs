//! Authentication Module
//!
//! This module handles user registration, authentication, session tokens
//! and profile management.
//!
//! # Architecture
//!
//! - **`users`** - User model and database operations
//! - **`credentials`** - Password hashing and login verification
//! - **`sessions`** - JWT access/refresh token issuing and verification
//! - **`blacklist`** - Refresh token revocation
//! - **`validation`** - Field validators shared by the handlers
//! - **`handlers`** - HTTP handlers for the account endpoints
//!
//! # Authentication Flow
//!
//! 1. **Register**: fields validated, password hashed, user created
//! 2. **Login**: credentials verified, access and refresh tokens returned
//! 3. **Refresh**: refresh token exchanged for a new access token
//! 4. **Logout**: refresh token blacklisted
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt and never serialized
//! - Access tokens live 5 minutes, refresh tokens 1 day by default
//! - Invalid credentials return one generic 401

/// User data model and database operations
pub mod users;

/// Password hashing and verification
pub mod credentials;

/// JWT token generation and validation
pub mod sessions;

/// Refresh token revocation
pub mod blacklist;

/// Input validation
pub mod validation;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use sessions::{Claims, TokenPair, TokenService, TokenType};
pub use users::User;
