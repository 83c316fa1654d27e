//! Report notifications: the `Idle` message admins act on

use reviewdb_core::notify::{self, NotificationKind};
use reviewdb_core::review::ReportContext;
use reviewdb_types::utils::truncate_chars;

use crate::action::ModAction;
use crate::interaction::{Component, style};
use crate::prelude::*;

/// Message content and action buttons for a reported review
pub fn report_message(ctx: &ReportContext) -> serde_json::Value {
	let review = &ctx.review;
	let content = format!(
		"**Review reported** by <@{}> ({})\n\
		Author: <@{}> ({})\n\
		Target: <@{}>\n\
		Review {}: {}",
		ctx.reporter.id,
		ctx.reporter.name,
		review.author_id,
		ctx.author.name,
		review.target_id,
		review.review_id,
		truncate_chars(&review.comment, 1500),
	);

	let buttons = vec![
		Component::button(
			ModAction::DeleteReview { review_id: review.review_id }.encode(),
			"Delete review",
			style::DANGER,
		),
		Component::button(
			ModAction::BanSelect { target_id: review.author_id, review_id: review.review_id }
				.encode(),
			"Ban author",
			style::PRIMARY,
		),
		Component::button(
			ModAction::SelectDeleteAndBan {
				review_id: review.review_id,
				target_id: review.author_id,
			}
			.encode(),
			"Delete and ban",
			style::DANGER,
		),
	];

	serde_json::json!({
		"content": content,
		"components": [Component::action_row(buttons)],
	})
}

pub async fn notify_report(app: &App, ctx: &ReportContext) {
	notify::send_notification(app, NotificationKind::Report, report_message(ctx)).await;
}


// vim: ts=4
