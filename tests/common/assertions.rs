//! Custom assertion macros and utilities
//!
//! Provides enhanced assertion macros for better test output and
//! more descriptive error messages.

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert that a JSON error body carries a message for `field`
#[macro_export]
macro_rules! assert_field_error {
    ($body:expr, $field:expr) => {
        assert!(
            $body[$field].as_array().map_or(false, |messages| !messages.is_empty()),
            "Expected field error for '{}', got: {}",
            $field,
            $body
        );
    };
    ($body:expr, $field:expr, $message:expr) => {
        assert_eq!($body[$field][0], $message, "Unexpected error body: {}", $body);
    };
}

/// Assert that a JSON body has `{"detail": $message}`
#[macro_export]
macro_rules! assert_detail {
    ($body:expr, $message:expr) => {
        assert_eq!($body["detail"], $message, "Unexpected error body: {}", $body);
    };
}
