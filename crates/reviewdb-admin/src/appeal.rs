//! Appeal notifications with accept and deny controls

use reviewdb_core::notify::{self, NotificationKind};
use reviewdb_types::meta_adapter::{Appeal, Identity};
use reviewdb_types::utils::truncate_chars;

use crate::action::ModAction;
use crate::interaction::{Component, style};
use crate::prelude::*;

pub fn appeal_message(ident: &Identity, appeal: &Appeal) -> serde_json::Value {
	let mut content = format!(
		"**Ban appeal #{}** from <@{}> ({})\n{}",
		appeal.appeal_id,
		ident.id,
		ident.name,
		truncate_chars(&appeal.text, 1500),
	);
	if let Some(ban) = &ident.ban {
		let until = ban.ban_end.map_or_else(|| "permanent".to_string(), |end| end.to_human());
		content.push_str(&format!(
			"\n\nBanned until: {}\nBanned for review {}: {}",
			until,
			ban.review_id,
			truncate_chars(&ban.review_content, 500),
		));
	}

	let buttons = vec![
		Component::button(
			ModAction::AcceptAppeal { appeal_id: appeal.appeal_id }.encode(),
			"Accept",
			style::SUCCESS,
		),
		Component::button(
			ModAction::TextDenyAppeal { appeal_id: appeal.appeal_id }.encode(),
			"Deny",
			style::DANGER,
		),
	];

	serde_json::json!({
		"content": content,
		"components": [Component::action_row(buttons)],
	})
}

pub async fn notify_appeal(app: &App, ident: &Identity, appeal: &Appeal) {
	notify::send_notification(app, NotificationKind::Appeal, appeal_message(ident, appeal)).await;
}


// vim: ts=4
