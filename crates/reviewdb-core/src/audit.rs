//! Append-only audit log of moderation actions

use reviewdb_types::meta_adapter::{AuditAction, AuditLogEntry};

use crate::prelude::*;

/// Append an entry. Errors are returned so callers that must not lose the
/// trail (review deletion) can stop before the destructive step.
pub async fn record(
	app: &App,
	action: AuditAction,
	review_id: ReviewId,
	target_id: UserId,
	admin_id: UserId,
	comment: &str,
) -> RdResult<()> {
	let entry = AuditLogEntry {
		action,
		review_id,
		target_id,
		admin_id,
		comment: comment.into(),
		created_at: Timestamp::now(),
	};
	app.meta_adapter.append_audit_log(&entry).await.inspect_err(|err| {
		error!(
			action = action.as_str(),
			review = %review_id,
			target = %target_id,
			error = %err,
			"Failed to write audit log"
		);
	})?;
	info!(
		action = action.as_str(),
		review = %review_id,
		target = %target_id,
		admin = %admin_id,
		"Moderation action"
	);
	Ok(())
}

// vim: ts=4
