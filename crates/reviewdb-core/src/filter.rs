//! Ordered review policy chain
//!
//! The chain is a fixed list of pure predicates evaluated in order. The first
//! predicate that does not allow the review decides the outcome; later
//! predicates never run. Predicates have no side effects: an `Escalate`
//! outcome only *asks* for a ban, which the caller issues (see
//! [`crate::review::add_review`]).
//!
//! Order:
//! 1. review type (non-admins: user or server only)
//! 2. custom emoji markup (non-admins)
//! 3. links (non-admins)
//! 4. opted out
//! 5. running time-bound ban
//! 6. permanent ban
//! 7. submission rate limit
//! 8. light profanity (reject)
//! 9. strong profanity (escalate)

use reviewdb_types::meta_adapter::{Identity, NewReview, ReviewType};

use crate::app::ModerationConfig;
use crate::detect::{self, ProfanityLevel};
use crate::prelude::*;
use crate::rate_limit;

pub const MSG_INVALID_TYPE: &str = "Invalid review type";
pub const MSG_EMOJI: &str = "You can't use custom emojis in reviews";
pub const MSG_URL: &str = "You can't post URLs in reviews";
pub const MSG_OPTED_OUT: &str = "You have opted out of ReviewDB";
pub const MSG_PERMANENT_BAN: &str = "You are permanently banned from ReviewDB";
pub const MSG_RATE_LIMIT: &str = "You are reviewing too much, slow down and try again later";
pub const MSG_PROFANITY: &str = "Your review contains inappropriate language";
pub const MSG_AUTO_BAN: &str = "Because of trying to post a slur, you are now banned from ReviewDB for 1 week. You can appeal the ban from the ReviewDB settings.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolicyOutcome {
	Allow,
	Reject(String),
	/// Reject and ban the author
	Escalate(String),
}

impl PolicyOutcome {
	pub fn is_allow(&self) -> bool {
		matches!(self, PolicyOutcome::Allow)
	}

	pub fn reason(&self) -> Option<&str> {
		match self {
			PolicyOutcome::Allow => None,
			PolicyOutcome::Reject(reason) | PolicyOutcome::Escalate(reason) => Some(reason),
		}
	}
}

/// Everything a predicate may look at. The rate limiter count is read by the
/// caller beforehand so that the chain itself stays pure.
#[derive(Debug)]
pub struct FilterInput<'a> {
	pub author: &'a Identity,
	pub is_admin: bool,
	pub review: &'a NewReview,
	pub recent_submissions: u32,
	pub now: Timestamp,
	pub config: &'a ModerationConfig,
}

pub type Filter = fn(&FilterInput<'_>) -> PolicyOutcome;

pub const FILTER_CHAIN: &[(&str, Filter)] = &[
	("review_type", check_review_type),
	("custom_emoji", check_custom_emoji),
	("url", check_url),
	("opted_out", check_opted_out),
	("time_ban", check_time_ban),
	("permanent_ban", check_permanent_ban),
	("rate_limit", check_rate_limit),
	("light_profanity", check_light_profanity),
	("strong_profanity", check_strong_profanity),
];

/// Run the standard chain
pub fn evaluate(input: &FilterInput<'_>) -> PolicyOutcome {
	evaluate_with(FILTER_CHAIN, input)
}

/// Run a chain, stopping at the first non-`Allow` outcome
pub fn evaluate_with(chain: &[(&str, Filter)], input: &FilterInput<'_>) -> PolicyOutcome {
	for (name, filter) in chain {
		let outcome = filter(input);
		if !outcome.is_allow() {
			debug!(
				subject = %input.author.id,
				filter = name,
				outcome = ?outcome,
				"Review stopped by filter"
			);
			return outcome;
		}
	}
	PolicyOutcome::Allow
}

fn check_review_type(input: &FilterInput<'_>) -> PolicyOutcome {
	if input.is_admin || matches!(input.review.typ, ReviewType::User | ReviewType::Server) {
		PolicyOutcome::Allow
	} else {
		PolicyOutcome::Reject(MSG_INVALID_TYPE.into())
	}
}

fn check_custom_emoji(input: &FilterInput<'_>) -> PolicyOutcome {
	if !input.is_admin && detect::contains_custom_emoji(&input.review.comment) {
		PolicyOutcome::Reject(MSG_EMOJI.into())
	} else {
		PolicyOutcome::Allow
	}
}

fn check_url(input: &FilterInput<'_>) -> PolicyOutcome {
	if !input.is_admin && detect::contains_url(&input.review.comment) {
		PolicyOutcome::Reject(MSG_URL.into())
	} else {
		PolicyOutcome::Allow
	}
}

fn check_opted_out(input: &FilterInput<'_>) -> PolicyOutcome {
	if input.author.opted_out {
		PolicyOutcome::Reject(MSG_OPTED_OUT.into())
	} else {
		PolicyOutcome::Allow
	}
}

fn check_time_ban(input: &FilterInput<'_>) -> PolicyOutcome {
	match input.author.active_ban(input.now).and_then(|ban| ban.ban_end) {
		Some(end) => PolicyOutcome::Reject(format!(
			"You are banned from ReviewDB until {}",
			end.to_human()
		)),
		None => PolicyOutcome::Allow,
	}
}

fn check_permanent_ban(input: &FilterInput<'_>) -> PolicyOutcome {
	if input.author.is_permanently_banned() {
		PolicyOutcome::Reject(MSG_PERMANENT_BAN.into())
	} else {
		PolicyOutcome::Allow
	}
}

fn check_rate_limit(input: &FilterInput<'_>) -> PolicyOutcome {
	if rate_limit::exceeds_limit(input.recent_submissions, input.config.rate_limit_per_hour) {
		PolicyOutcome::Reject(MSG_RATE_LIMIT.into())
	} else {
		PolicyOutcome::Allow
	}
}

fn check_light_profanity(input: &FilterInput<'_>) -> PolicyOutcome {
	if input.config.profanity.level(&input.review.comment) == ProfanityLevel::Light {
		PolicyOutcome::Reject(MSG_PROFANITY.into())
	} else {
		PolicyOutcome::Allow
	}
}

fn check_strong_profanity(input: &FilterInput<'_>) -> PolicyOutcome {
	if input.config.profanity.level(&input.review.comment) == ProfanityLevel::Strong {
		PolicyOutcome::Escalate(MSG_AUTO_BAN.into())
	} else {
		PolicyOutcome::Allow
	}
}


// vim: ts=4
