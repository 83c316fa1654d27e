//! Adapter that stores identities, reviews, bans, appeals and the audit log.
//!
//! The moderation crates own no persistent state. Everything goes through this
//! trait, and the correctness of the ban/appeal lifecycle relies on the
//! atomicity guarantees documented on the individual methods.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::prelude::*;

// Identities
//************

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
	Normal,
	Admin,
	/// Permanently banned
	Banned,
	System,
}

#[derive(Clone, Debug)]
pub struct Identity {
	pub id: UserId,
	pub name: Box<str>,
	pub avatar: Option<Box<str>>,
	pub kind: IdentityKind,
	pub opted_out: bool,
	/// Current ban episode, if any. Independent of `kind`: a time-bound ban
	/// only shows up here, a permanent one also sets `kind = Banned`.
	pub ban: Option<BanRecord>,
}

impl Identity {
	pub fn is_admin(&self) -> bool {
		self.kind == IdentityKind::Admin
	}

	pub fn is_permanently_banned(&self) -> bool {
		self.kind == IdentityKind::Banned
	}

	/// The current time-bound ban if it has not expired yet
	pub fn active_ban(&self, now: Timestamp) -> Option<&BanRecord> {
		self.ban.as_ref().filter(|ban| ban.ban_end.is_some_and(|end| end > now))
	}

	/// Blocked by either a running time-bound ban or the permanent sentinel kind
	pub fn is_blocked(&self, now: Timestamp) -> bool {
		self.is_permanently_banned() || self.active_ban(now).is_some()
	}
}

/// Display info of a review author
#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInfo {
	pub id: UserId,
	pub name: Box<str>,
	pub avatar: Option<Box<str>>,
	pub kind: IdentityKind,
}

#[derive(Debug)]
pub struct UpsertIdentity {
	pub id: UserId,
	pub name: Box<str>,
	pub avatar: Option<Box<str>>,
	/// Client token to store; `None` keeps the current one
	pub token: Option<Box<str>>,
}

// Reviews
//*********

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ReviewType {
	User,
	Server,
	Support,
	System,
}

impl From<ReviewType> for u8 {
	fn from(typ: ReviewType) -> u8 {
		match typ {
			ReviewType::User => 0,
			ReviewType::Server => 1,
			ReviewType::Support => 2,
			ReviewType::System => 3,
		}
	}
}

impl TryFrom<u8> for ReviewType {
	type Error = Error;

	fn try_from(v: u8) -> Result<Self, Self::Error> {
		match v {
			0 => Ok(ReviewType::User),
			1 => Ok(ReviewType::Server),
			2 => Ok(ReviewType::Support),
			3 => Ok(ReviewType::System),
			_ => Err(Error::ValidationError(format!("unknown review type {}", v))),
		}
	}
}

impl std::fmt::Display for ReviewType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			ReviewType::User => "user",
			ReviewType::Server => "server",
			ReviewType::Support => "support",
			ReviewType::System => "system",
		};
		write!(f, "{}", s)
	}
}

#[derive(Clone, Debug)]
pub struct Review {
	pub review_id: ReviewId,
	pub author_id: UserId,
	pub target_id: UserId,
	pub comment: Box<str>,
	pub typ: ReviewType,
	pub created_at: Timestamp,
}

#[derive(Clone, Debug)]
pub struct NewReview {
	pub author_id: UserId,
	pub target_id: UserId,
	pub comment: Box<str>,
	pub typ: ReviewType,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
	pub id: ReviewId,
	pub target_id: UserId,
	pub comment: Box<str>,
	#[serde(rename = "type")]
	pub typ: ReviewType,
	pub timestamp: Timestamp,
	pub sender: ProfileInfo,
}

#[derive(Clone, Copy, Debug)]
pub struct ListReviewOptions {
	pub offset: u32,
	pub limit: u32,
}

impl Default for ListReviewOptions {
	fn default() -> Self {
		Self { offset: 0, limit: 50 }
	}
}

// Bans
//******

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BanRecord {
	pub ban_id: BanId,
	pub user_id: UserId,
	/// Snapshot of the triggering review, kept even after the review is deleted
	pub review_id: ReviewId,
	pub review_content: Box<str>,
	/// `None` for bans issued by the system
	pub admin_id: Option<UserId>,
	/// `None` for permanent bans
	pub ban_end: Option<Timestamp>,
	pub created_at: Timestamp,
}

#[derive(Clone, Debug)]
pub struct NewBan {
	pub user_id: UserId,
	pub review_id: ReviewId,
	pub review_content: Box<str>,
	pub admin_id: Option<UserId>,
	pub ban_end: Option<Timestamp>,
}

// Appeals
//*********

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppealOutcome {
	Accepted,
	Denied { reason: Option<Box<str>> },
}

#[derive(Clone, Debug)]
pub struct Appeal {
	pub appeal_id: AppealId,
	pub user_id: UserId,
	pub ban_id: BanId,
	pub text: Box<str>,
	pub action_taken: bool,
	pub outcome: Option<AppealOutcome>,
	pub created_at: Timestamp,
}

// Audit log
//***********

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditAction {
	Delete,
	Ban,
	AcceptAppeal,
	DenyAppeal,
}

impl AuditAction {
	pub fn as_str(&self) -> &'static str {
		match self {
			AuditAction::Delete => "DELETE",
			AuditAction::Ban => "BAN",
			AuditAction::AcceptAppeal => "ACCEPT_APPEAL",
			AuditAction::DenyAppeal => "DENY_APPEAL",
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"DELETE" => Some(AuditAction::Delete),
			"BAN" => Some(AuditAction::Ban),
			"ACCEPT_APPEAL" => Some(AuditAction::AcceptAppeal),
			"DENY_APPEAL" => Some(AuditAction::DenyAppeal),
			_ => None,
		}
	}
}

#[derive(Clone, Debug)]
pub struct AuditLogEntry {
	pub action: AuditAction,
	/// 0 when no review is involved
	pub review_id: ReviewId,
	pub target_id: UserId,
	/// 0 for system actions
	pub admin_id: UserId,
	pub comment: Box<str>,
	pub created_at: Timestamp,
}

#[async_trait]
pub trait MetaAdapter: Debug + Send + Sync {
	/// # Identities
	/// Reads an identity together with its current ban record
	async fn read_identity(&self, id: UserId) -> RdResult<Identity>;
	/// Resolves a client token. Unknown tokens yield `NotFound`.
	async fn read_identity_by_token(&self, token: &str) -> RdResult<Identity>;
	/// Inserts a new `Normal` identity or refreshes name, avatar and token of an existing one
	async fn upsert_identity(&self, data: &UpsertIdentity) -> RdResult<()>;
	async fn set_opt_out(&self, id: UserId, opted_out: bool) -> RdResult<()>;
	/// Sets the kind of an identity, creating a placeholder row if it does not exist yet
	async fn set_identity_kind(&self, id: UserId, kind: IdentityKind) -> RdResult<()>;

	/// # Reviews
	/// Number of reviews written by `author_id` with `created_at >= since`
	async fn count_reviews_since(&self, author_id: UserId, since: Timestamp) -> RdResult<u32>;
	/// Inserts a review, replacing the author's previous review of the same target
	async fn create_review(&self, review: &NewReview) -> RdResult<ReviewId>;
	async fn read_review(&self, review_id: ReviewId) -> RdResult<Review>;
	/// Removes a review. `NotFound` if no row was deleted.
	async fn delete_review(&self, review_id: ReviewId) -> RdResult<()>;
	async fn list_reviews(
		&self,
		target_id: UserId,
		opts: &ListReviewOptions,
	) -> RdResult<Vec<ReviewView>>;

	/// # Bans
	/// Writes the ban record and points the identity at it in one transaction.
	/// Permanent bans (`ban_end = None`) also set the identity's kind to `Banned`.
	/// Admin identities are refused with `TargetIsAdmin`.
	async fn create_ban(&self, ban: &NewBan) -> RdResult<BanRecord>;
	async fn read_ban(&self, ban_id: BanId) -> RdResult<BanRecord>;

	/// # Appeals
	/// Inserts an appeal unless the user already has an unresolved one against
	/// the same ban, which yields `Conflict`. The check and the insert are one statement.
	async fn create_appeal(&self, user_id: UserId, ban_id: BanId, text: &str)
	-> RdResult<Appeal>;
	async fn read_appeal(&self, appeal_id: AppealId) -> RdResult<Appeal>;
	/// Marks the appeal resolved with a single conditional write on
	/// `action_taken = false`; a lost race yields `AlreadyResolved`.
	/// `Accepted` also lifts the user's ban inside the same transaction.
	async fn resolve_appeal(
		&self,
		appeal_id: AppealId,
		outcome: &AppealOutcome,
	) -> RdResult<Appeal>;

	/// # Audit log
	/// Append-only
	async fn append_audit_log(&self, entry: &AuditLogEntry) -> RdResult<()>;
	async fn list_audit_log(&self, target_id: UserId) -> RdResult<Vec<AuditLogEntry>>;
}


// vim: ts=4
