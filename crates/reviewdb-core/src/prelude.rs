pub use crate::app::App;
pub use reviewdb_types::prelude::*;

// vim: ts=4
