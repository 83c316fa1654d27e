//! Review submission rate limit
//!
//! A pure read: counts the reviews an author wrote inside a rolling window.
//! Exceeding the limit is a normal policy outcome handled by the filter
//! chain, not an error.

use crate::prelude::*;

/// Number of reviews authored by `user_id` within `[now - window_secs, now]`
pub async fn count_recent_submissions(
	app: &App,
	user_id: UserId,
	window_secs: i64,
) -> RdResult<u32> {
	let since = Timestamp::now().add_seconds(-window_secs);
	let count = app.meta_adapter.count_reviews_since(user_id, since).await?;
	debug!(subject = %user_id, count, window_secs, "Recent submissions");
	Ok(count)
}

/// Hard cap check: more than `limit` submissions in the window is rejected
pub fn exceeds_limit(count: u32, limit: u32) -> bool {
	count > limit
}


// vim: ts=4
