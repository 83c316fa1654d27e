//! Moderation core for ReviewDB.
//!
//! Every incoming review goes through the submission rate limit and the
//! ordered policy filter chain. Bans, appeals and review deletion are handled
//! by the lifecycle functions in [`moderation`], each of which leaves a row in
//! the append-only audit log.
//!
//! No state is kept between requests: everything is read from and written to
//! the storage adapter held by [`AppState`].

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod audit;
pub mod auth;
pub mod detect;
pub mod filter;
pub mod moderation;
pub mod notify;
pub mod prelude;
pub mod rate_limit;
pub mod review;

pub use app::{App, AppBuilder, AppState, ModerationConfig};
pub use auth::Actor;
pub use filter::PolicyOutcome;
pub use notify::{NotificationKind, Notifier};

// vim: ts=4
