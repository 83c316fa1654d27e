//! ReviewDB server
//!
//! HTTP surface for review clients and the admin interaction endpoint of the
//! chat platform. Moderation logic lives in `reviewdb-core` and
//! `reviewdb-admin`; this crate wires them to axum, the SQLite adapter and
//! outbound webhooks.

#![forbid(unsafe_code)]

pub mod config;
pub mod extract;
pub mod handler;
pub mod oauth;
pub mod prelude;
pub mod routes;
pub mod state;
pub mod webhook;

pub use state::{Server, ServerState};

// vim: ts=4
