//! Integration tests

mod api;
mod notifications_test;
