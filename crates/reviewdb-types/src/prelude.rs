pub use crate::error::{Error, RdResult};
pub use crate::types::{AppealId, BanId, ReviewId, Timestamp, UserId};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
