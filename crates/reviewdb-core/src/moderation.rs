//! Ban, appeal and review deletion lifecycle
//!
//! Every successful transition leaves an audit log row. Review deletion is
//! logged *before* the row is removed; if the log write fails, nothing is
//! deleted.

use reviewdb_types::meta_adapter::{
	Appeal, AppealOutcome, AuditAction, BanRecord, Identity, NewBan,
};
use reviewdb_types::types::SYSTEM_USER;

use crate::audit;
use crate::auth::Actor;
use crate::notify::{self, NotificationKind};
use crate::prelude::*;

/// Snapshot of the review a ban was issued for
#[derive(Clone, Debug)]
pub struct BanSubject<'a> {
	pub review_id: ReviewId,
	pub content: &'a str,
}

/// Human-readable duration, as shown to admins
pub fn describe_duration(days: i64) -> String {
	match days {
		d if d <= 0 => "permanently".to_string(),
		1 => "for 1 day".to_string(),
		d => format!("for {} days", d),
	}
}

/// Ban `target_id`. `days <= 0` issues a permanent ban.
///
/// Admin targets are refused with `TargetIsAdmin`. `admin` is `None` for bans
/// issued by the policy chain.
pub async fn issue_ban(
	app: &App,
	target_id: UserId,
	subject: BanSubject<'_>,
	days: i64,
	admin: Option<UserId>,
) -> RdResult<BanRecord> {
	let target = app.meta_adapter.read_identity(target_id).await?;
	if target.is_admin() {
		warn!(subject = %target_id, "Refusing to ban an admin");
		return Err(Error::TargetIsAdmin);
	}

	let ban_end = (days > 0).then(|| Timestamp::now().add_days(days));
	let ban = app
		.meta_adapter
		.create_ban(&NewBan {
			user_id: target_id,
			review_id: subject.review_id,
			review_content: subject.content.into(),
			admin_id: admin,
			ban_end,
		})
		.await?;

	if let Err(err) = audit::record(
		app,
		AuditAction::Ban,
		subject.review_id,
		target_id,
		admin.unwrap_or(SYSTEM_USER),
		subject.content,
	)
	.await
	{
		warn!(subject = %target_id, ban = %ban.ban_id, error = %err, "Ban stands without audit row");
	}

	info!(subject = %target_id, ban = %ban.ban_id, days, "Ban issued");
	Ok(ban)
}

/// Delete a review as its author, an admin or the operator
pub async fn delete_review(app: &App, review_id: ReviewId, actor: &Actor) -> RdResult<()> {
	let review = app.meta_adapter.read_review(review_id).await?;

	let permitted = match actor {
		Actor::Operator => true,
		Actor::Identity(ident) => ident.is_admin() || ident.id == review.author_id,
	};
	if !permitted {
		warn!(review = %review_id, actor = %actor.audit_id(), "Review deletion denied");
		return Err(Error::PermissionDenied);
	}

	audit::record(
		app,
		AuditAction::Delete,
		review_id,
		review.author_id,
		actor.audit_id(),
		&review.comment,
	)
	.await?;

	app.meta_adapter.delete_review(review_id).await
}

/// File an appeal against the identity's current ban
pub async fn submit_appeal(app: &App, ident: &Identity, text: &str) -> RdResult<Appeal> {
	let text = text.trim();
	if text.is_empty() || text.chars().count() > app.config.appeal_max_len {
		return Err(Error::ValidationError(format!(
			"appeal must be between 1 and {} characters",
			app.config.appeal_max_len
		)));
	}
	if !ident.is_blocked(Timestamp::now()) {
		return Err(Error::PolicyRejected("You are not banned".into()));
	}
	let Some(ban) = &ident.ban else {
		// Permanent sentinel kind without a ban record: nothing to appeal against
		return Err(Error::NotFound);
	};

	let appeal = app.meta_adapter.create_appeal(ident.id, ban.ban_id, text).await?;
	info!(subject = %ident.id, appeal = %appeal.appeal_id, ban = %ban.ban_id, "Appeal submitted");
	Ok(appeal)
}

/// Accept an appeal and lift the ban. A second call yields `AlreadyResolved`.
pub async fn accept_appeal(app: &App, appeal_id: AppealId, admin: UserId) -> RdResult<Appeal> {
	resolve(app, appeal_id, admin, AppealOutcome::Accepted).await
}

/// Deny an appeal; the ban stays in effect
pub async fn deny_appeal(
	app: &App,
	appeal_id: AppealId,
	admin: UserId,
	reason: Option<&str>,
) -> RdResult<Appeal> {
	let reason = reason.map(str::trim).filter(|r| !r.is_empty()).map(Into::into);
	resolve(app, appeal_id, admin, AppealOutcome::Denied { reason }).await
}

async fn resolve(
	app: &App,
	appeal_id: AppealId,
	admin: UserId,
	outcome: AppealOutcome,
) -> RdResult<Appeal> {
	let appeal = app.meta_adapter.resolve_appeal(appeal_id, &outcome).await.inspect_err(|err| {
		if matches!(err, Error::AlreadyResolved) {
			info!(appeal = %appeal_id, admin = %admin, "Appeal already resolved");
		}
	})?;

	let (action, comment) = match &outcome {
		AppealOutcome::Accepted => (AuditAction::AcceptAppeal, appeal.text.to_string()),
		AppealOutcome::Denied { reason } => {
			(AuditAction::DenyAppeal, reason.as_deref().unwrap_or_default().to_string())
		}
	};
	if let Err(err) = audit::record(app, action, ReviewId(0), appeal.user_id, admin, &comment).await
	{
		warn!(appeal = %appeal_id, error = %err, "Appeal resolved without audit row");
	}

	let content = match &outcome {
		AppealOutcome::Accepted => {
			format!("Your appeal #{} has been accepted. You are unbanned.", appeal.appeal_id)
		}
		AppealOutcome::Denied { reason: Some(reason) } => {
			format!("Your appeal #{} has been denied: {}", appeal.appeal_id, reason)
		}
		AppealOutcome::Denied { reason: None } => {
			format!("Your appeal #{} has been denied.", appeal.appeal_id)
		}
	};
	notify::send_notification(
		app,
		NotificationKind::AppealResolved,
		serde_json::json!({ "userId": appeal.user_id, "content": content }),
	)
	.await;

	Ok(appeal)
}


// vim: ts=4
