//! API integration tests
//!
//! Integration tests for all account endpoints

mod account_test;
mod auth_test;
mod register_test;
