//! Shared types, adapter traits, and core utilities for ReviewDB.
//!
//! This crate contains the foundational types that are shared between the
//! server crate, the moderation crates and the storage adapter. Keeping them
//! in a separate crate lets the adapter compile in parallel with the
//! feature crates.

#![forbid(unsafe_code)]

pub mod error;
pub mod meta_adapter;
pub mod prelude;
pub mod types;
pub mod utils;

// vim: ts=4
