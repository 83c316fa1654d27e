//! Admin interaction workflow
//!
//! Admins moderate from chat messages carrying buttons, select menus and
//! modals. Each control's identifier encodes the next action (see
//! [`action`]), so a workflow is resumed from the incoming interaction alone.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod action;
pub mod appeal;
pub mod interaction;
pub mod report;
pub mod router;
pub mod signature;

mod prelude;

pub use action::{DecodeError, ModAction};
pub use router::handle_interaction;
pub use signature::{Ed25519Verifier, SignatureVerifier};

// vim: ts=4
