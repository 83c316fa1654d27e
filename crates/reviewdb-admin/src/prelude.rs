pub use reviewdb_core::prelude::*;

// vim: ts=4
