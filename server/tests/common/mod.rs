//! Shared test harness for server integration tests

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

pub mod adapters;
pub mod fixtures;
