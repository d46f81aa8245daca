//! Shared Error Types
//!
//! This module defines the field-level validation error map shared by every
//! request validator in the service.
//!
//! # Wire Format
//!
//! A `FieldErrors` value serializes as a JSON object mapping each field name
//! to the list of messages collected for it:
//!
//! ```json
//! {
//!   "email": ["A user with this email already exists."],
//!   "cpf": ["CPF must contain exactly 11 digits."]
//! }
//! ```
//!
//! # Usage
//!
//! ```rust
//! use swapp_auth::shared::error::FieldErrors;
//!
//! let mut errors = FieldErrors::new();
//! errors.add("email", "Enter a valid email address.");
//! assert!(errors.has("email"));
//! assert!(errors.into_result().is_err());
//! ```
use serde::Serialize;
use std::collections::BTreeMap;

/// Message used for a required field that was not supplied.
pub const REQUIRED: &str = "This field is required.";

/// Message used for an optional field supplied as an empty string.
pub const BLANK: &str = "This field may not be blank.";

/// Field name → list of validation messages
///
/// Errors are collected wholesale and returned together; callers never act on
/// a partially validated payload.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Create an empty error map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map holding a single error
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a message against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Whether any error was recorded for `field`
    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Messages recorded for `field`
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with at least one error
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.errors.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}
