//! Review submission, listing, reporting and opt-out

use reviewdb_types::meta_adapter::{
	Identity, ListReviewOptions, NewReview, Review, ReviewType, ReviewView,
};
use reviewdb_types::types::POLICY_REVIEW;
use reviewdb_types::utils::truncate_chars;

use crate::auth;
use crate::filter::{self, FilterInput, PolicyOutcome};
use crate::moderation::{self, BanSubject};
use crate::notify::{self, NotificationKind};
use crate::prelude::*;
use crate::rate_limit;

/// Result of a submission. Policy rejections are outcomes, not errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddReviewOutcome {
	Added(ReviewId),
	Rejected(String),
	/// Rejected and the author got banned
	Banned(String),
}

pub async fn add_review(
	app: &App,
	token: &str,
	target_id: UserId,
	comment: &str,
	typ: ReviewType,
) -> RdResult<AddReviewOutcome> {
	let author = auth::authenticate(app, token).await?;

	let comment = comment.trim();
	let len = comment.chars().count();
	if len == 0 || len > app.config.review_max_len {
		return Err(Error::ValidationError(format!(
			"review must be between 1 and {} characters",
			app.config.review_max_len
		)));
	}

	let recent =
		rate_limit::count_recent_submissions(app, author.id, app.config.rate_limit_window).await?;
	let review = NewReview { author_id: author.id, target_id, comment: comment.into(), typ };

	let outcome = filter::evaluate(&FilterInput {
		author: &author,
		is_admin: author.is_admin(),
		review: &review,
		recent_submissions: recent,
		now: Timestamp::now(),
		config: &app.config,
	});

	match outcome {
		PolicyOutcome::Allow => {
			let review_id = app.meta_adapter.create_review(&review).await?;
			info!(subject = %author.id, target = %target_id, review = %review_id, "Review added");
			Ok(AddReviewOutcome::Added(review_id))
		}
		PolicyOutcome::Reject(reason) => Ok(AddReviewOutcome::Rejected(reason)),
		PolicyOutcome::Escalate(reason) => escalate(app, &author, &review, reason).await,
	}
}

async fn escalate(
	app: &App,
	author: &Identity,
	review: &NewReview,
	reason: String,
) -> RdResult<AddReviewOutcome> {
	let subject = BanSubject { review_id: POLICY_REVIEW, content: &review.comment };
	match moderation::issue_ban(app, author.id, subject, app.config.auto_ban_days, None).await {
		Ok(ban) => {
			let content = format!(
				"User <@{}> ({}) was automatically banned {}.\nReview to <@{}>: {}",
				author.id,
				author.name,
				moderation::describe_duration(app.config.auto_ban_days),
				review.target_id,
				truncate_chars(&review.comment, 1500),
			);
			notify::send_notification(
				app,
				NotificationKind::Ban,
				serde_json::json!({ "content": content, "banId": ban.ban_id }),
			)
			.await;
			Ok(AddReviewOutcome::Banned(reason))
		}
		// Admins pass the profanity tiers only as a rejection
		Err(Error::TargetIsAdmin) => Ok(AddReviewOutcome::Rejected(filter::MSG_PROFANITY.into())),
		Err(err) => Err(err),
	}
}

/// Reviews written about `target_id`, newest first
pub async fn list_reviews(app: &App, target_id: UserId, offset: u32) -> RdResult<Vec<ReviewView>> {
	let opts = ListReviewOptions { offset, limit: app.config.page_size };
	app.meta_adapter.list_reviews(target_id, &opts).await
}

/// What a report notification is built from
#[derive(Clone, Debug)]
pub struct ReportContext {
	pub reporter: Identity,
	pub review: Review,
	pub author: Identity,
}

/// Validate a report. The notification itself is composed by the admin crate.
pub async fn report_review(app: &App, token: &str, review_id: ReviewId) -> RdResult<ReportContext> {
	let reporter = auth::authenticate(app, token).await?;
	if reporter.is_blocked(Timestamp::now()) {
		return Err(Error::PolicyRejected("You cannot report reviews while banned".into()));
	}
	let review = app.meta_adapter.read_review(review_id).await?;
	let author = app.meta_adapter.read_identity(review.author_id).await?;
	info!(subject = %reporter.id, review = %review_id, "Review reported");
	Ok(ReportContext { reporter, review, author })
}

pub async fn set_opt_out(app: &App, token: &str, opted_out: bool) -> RdResult<()> {
	let ident = auth::authenticate(app, token).await?;
	app.meta_adapter.set_opt_out(ident.id, opted_out).await?;
	info!(subject = %ident.id, opted_out, "Opt-out changed");
	Ok(())
}

// vim: ts=4
