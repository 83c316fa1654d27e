//! Admin interaction router
//!
//! Workflow states, all reconstructed from the incoming interaction:
//!
//! ```text
//! Idle (buttons) ──► AwaitingSelection (duration menu) ──► Terminal
//!        │                                                    ▲
//!        ├─────────► AwaitingModalInput (deny reason) ────────┤
//!        └────────────────────────────────────────────────────┘
//! ```
//!
//! `None` means "no response": the caller answers with an empty 400.

use reviewdb_core::auth::Actor;
use reviewdb_core::moderation::{self, BanSubject, describe_duration};
use reviewdb_types::meta_adapter::Identity;

use crate::action::ModAction;
use crate::interaction::{Component, Interaction, InteractionResponse, InteractionType, SelectOption};
use crate::prelude::*;

/// Ban durations offered in the select menu, in days. 0 is permanent.
pub const DURATION_OPTIONS: &[(i64, &str)] = &[
	(1, "1 day"),
	(3, "3 days"),
	(7, "1 week"),
	(14, "2 weeks"),
	(30, "1 month"),
	(0, "Permanent"),
];

pub const DENY_REASON_FIELD: &str = "reason";

pub async fn handle_interaction(app: &App, interaction: &Interaction) -> Option<InteractionResponse> {
	match interaction.kind {
		InteractionType::MessageComponent | InteractionType::ModalSubmit => {}
		kind => {
			debug!(?kind, "Acknowledging interaction with pong");
			return Some(InteractionResponse::pong());
		}
	}

	let invoker = interaction.invoker()?;
	let admin = match app.meta_adapter.read_identity(invoker.id).await {
		Ok(ident) if ident.is_admin() => ident,
		Ok(_) => {
			warn!(subject = %invoker.id, "Interaction from non-admin");
			return None;
		}
		Err(err) => {
			warn!(subject = %invoker.id, error = %err, "Interaction from unknown identity");
			return None;
		}
	};

	let raw = interaction.custom_id()?;
	let action = match ModAction::decode(raw) {
		Ok(action) => action,
		Err(err) => {
			warn!(custom_id = raw, error = %err, "Invalid action");
			return None;
		}
	};
	info!(admin = %admin.id, %action, "Admin interaction");

	dispatch(app, &admin, action, interaction).await
}

async fn dispatch(
	app: &App,
	admin: &Identity,
	action: ModAction,
	interaction: &Interaction,
) -> Option<InteractionResponse> {
	let res = match action {
		ModAction::DeleteReview { review_id } => {
			let actor = Actor::Identity(admin.clone());
			match moderation::delete_review(app, review_id, &actor).await {
				Ok(()) => InteractionResponse::update_final(format!("Deleted review {}", review_id)),
				Err(err) => InteractionResponse::message(format!(
					"Failed to delete review {}: {}",
					review_id,
					describe_error(&err)
				)),
			}
		}
		ModAction::BanSelect { target_id, review_id } => duration_prompt(
			target_id,
			ModAction::BanUser { target_id, review_id },
		),
		ModAction::SelectDeleteAndBan { review_id, target_id } => duration_prompt(
			target_id,
			ModAction::DeleteAndBan { review_id, target_id },
		),
		ModAction::BanUser { target_id, review_id } => {
			let days = selected_duration(interaction)?;
			let snapshot = review_snapshot(app, review_id).await;
			let subject = BanSubject { review_id, content: &snapshot };
			let msg = match moderation::issue_ban(app, target_id, subject, days, Some(admin.id)).await
			{
				Ok(_) => format!("Banned <@{}> {}", target_id, describe_duration(days)),
				Err(err) => format!("Failed to ban <@{}>: {}", target_id, describe_error(&err)),
			};
			InteractionResponse::update_final(msg)
		}
		ModAction::DeleteAndBan { review_id, target_id } => {
			let days = selected_duration(interaction)?;
			let snapshot = review_snapshot(app, review_id).await;
			let subject = BanSubject { review_id, content: &snapshot };
			let ban = moderation::issue_ban(app, target_id, subject, days, Some(admin.id))
				.await
				.map(|_| ());
			let actor = Actor::Identity(admin.clone());
			let delete = moderation::delete_review(app, review_id, &actor).await;
			InteractionResponse::update_final(delete_and_ban_message(
				target_id, review_id, days, &ban, &delete,
			))
		}
		ModAction::AcceptAppeal { appeal_id } => {
			match moderation::accept_appeal(app, appeal_id, admin.id).await {
				Ok(appeal) => InteractionResponse::update_final(format!(
					"Appeal #{} accepted by <@{}>. <@{}> is unbanned.",
					appeal_id, admin.id, appeal.user_id
				)),
				Err(err) => InteractionResponse::message(format!(
					"Could not accept appeal #{}: {}",
					appeal_id,
					describe_error(&err)
				)),
			}
		}
		ModAction::TextDenyAppeal { appeal_id } => InteractionResponse::modal(
			ModAction::DenyAppeal { appeal_id }.encode(),
			format!("Deny appeal #{}", appeal_id),
			vec![Component::action_row(vec![Component::paragraph(
				DENY_REASON_FIELD,
				"Reason",
				1000,
			)])],
		),
		ModAction::DenyAppeal { appeal_id } => {
			let reason = interaction.field(DENY_REASON_FIELD);
			match moderation::deny_appeal(app, appeal_id, admin.id, reason).await {
				Ok(appeal) => InteractionResponse::update_final(format!(
					"Appeal #{} of <@{}> denied by <@{}>: {}",
					appeal_id,
					appeal.user_id,
					admin.id,
					reason.unwrap_or("no reason given")
				)),
				Err(err) => InteractionResponse::message(format!(
					"Could not deny appeal #{}: {}",
					appeal_id,
					describe_error(&err)
				)),
			}
		}
	};
	Some(res)
}

/// Error text shown to admins. Storage details stay in the logs.
pub fn describe_error(err: &Error) -> String {
	match err {
		Error::DbError | Error::Internal(_) => "something went wrong".to_string(),
		err => err.to_string(),
	}
}

/// Outcome message of a combined ban and delete.
/// Both operations can fail independently and every combination is reported.
pub fn delete_and_ban_message(
	target_id: UserId,
	review_id: ReviewId,
	days: i64,
	ban: &RdResult<()>,
	delete: &RdResult<()>,
) -> String {
	let duration = describe_duration(days);
	match (ban, delete) {
		(Ok(()), Ok(())) => {
			format!("Banned <@{}> {} and deleted review {}", target_id, duration, review_id)
		}
		(Ok(()), Err(del_err)) => format!(
			"Banned <@{}> {}, but failed to delete review {}: {}",
			target_id,
			duration,
			review_id,
			describe_error(del_err)
		),
		(Err(ban_err), Ok(())) => format!(
			"Deleted review {}, but failed to ban <@{}>: {}",
			review_id,
			target_id,
			describe_error(ban_err)
		),
		(Err(ban_err), Err(del_err)) => format!(
			"Failed to ban <@{}> and to delete review {}\nBan error: {}\nDelete error: {}",
			target_id,
			review_id,
			describe_error(ban_err),
			describe_error(del_err)
		),
	}
}

/// Duration select menu that re-dispatches as `next`
pub fn duration_menu(next: ModAction) -> Component {
	let options = DURATION_OPTIONS
		.iter()
		.map(|(days, label)| SelectOption { label: (*label).to_string(), value: days.to_string() })
		.collect();
	Component::action_row(vec![Component::select(next.encode(), "Ban duration", options)])
}

fn duration_prompt(target_id: UserId, next: ModAction) -> InteractionResponse {
	InteractionResponse::update_with(
		format!("Select ban duration for <@{}>", target_id),
		vec![duration_menu(next)],
	)
}

/// Only values offered in the menu are accepted
pub fn parse_duration(value: &str) -> Option<i64> {
	let days: i64 = value.parse().ok()?;
	DURATION_OPTIONS.iter().any(|(d, _)| *d == days).then_some(days)
}

fn selected_duration(interaction: &Interaction) -> Option<i64> {
	let value = interaction.first_value();
	let days = value.and_then(parse_duration);
	if days.is_none() {
		warn!(value = ?value, "Invalid ban duration selection");
	}
	days
}

/// Content of the review a ban is issued for, empty if it is already gone
async fn review_snapshot(app: &App, review_id: ReviewId) -> String {
	match app.meta_adapter.read_review(review_id).await {
		Ok(review) => review.comment.into(),
		Err(err) => {
			debug!(review = %review_id, error = %err, "No review snapshot for ban");
			String::new()
		}
	}
}


// vim: ts=4
