//! Action protocol carried in interactive component identifiers
//!
//! Format: `verb:arg1:arg2...`, colon-delimited, verb first. Every argument is
//! a decimal id, so no escaping is needed. Decoding checks the verb's arity
//! and parses each argument into its typed field; anything else is rejected.
//!
//! | verb                    | args                 |
//! |-------------------------|----------------------|
//! | `delete_review`         | review id            |
//! | `ban_select`            | target id, review id |
//! | `ban_user`              | target id, review id |
//! | `select_delete_and_ban` | review id, target id |
//! | `delete_and_ban`        | review id, target id |
//! | `accept_appeal`         | appeal id            |
//! | `text_deny_appeal`      | appeal id            |
//! | `deny_appeal`           | appeal id            |

use std::fmt;
use std::str::FromStr;

use crate::prelude::*;

/// Maximum length of a component identifier accepted by the chat platform
pub const MAX_CUSTOM_ID_LEN: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModAction {
	DeleteReview { review_id: ReviewId },
	/// Show the duration menu that leads to `BanUser`
	BanSelect { target_id: UserId, review_id: ReviewId },
	BanUser { target_id: UserId, review_id: ReviewId },
	/// Show the duration menu that leads to `DeleteAndBan`
	SelectDeleteAndBan { review_id: ReviewId, target_id: UserId },
	DeleteAndBan { review_id: ReviewId, target_id: UserId },
	AcceptAppeal { appeal_id: AppealId },
	/// Open the modal that leads to `DenyAppeal`
	TextDenyAppeal { appeal_id: AppealId },
	DenyAppeal { appeal_id: AppealId },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
	Empty,
	UnknownVerb(String),
	Arity { verb: &'static str, expected: usize, got: usize },
	InvalidArgument { verb: &'static str, index: usize },
	TooLong(usize),
}

impl fmt::Display for DecodeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DecodeError::Empty => write!(f, "empty action"),
			DecodeError::UnknownVerb(verb) => write!(f, "unknown verb {:?}", verb),
			DecodeError::Arity { verb, expected, got } => {
				write!(f, "{} takes {} arguments, got {}", verb, expected, got)
			}
			DecodeError::InvalidArgument { verb, index } => {
				write!(f, "{}: argument {} is not a valid id", verb, index)
			}
			DecodeError::TooLong(len) => write!(f, "action too long ({} bytes)", len),
		}
	}
}

impl std::error::Error for DecodeError {}

impl From<DecodeError> for Error {
	fn from(_: DecodeError) -> Self {
		Error::Parse
	}
}

impl ModAction {
	pub fn verb(&self) -> &'static str {
		match self {
			ModAction::DeleteReview { .. } => "delete_review",
			ModAction::BanSelect { .. } => "ban_select",
			ModAction::BanUser { .. } => "ban_user",
			ModAction::SelectDeleteAndBan { .. } => "select_delete_and_ban",
			ModAction::DeleteAndBan { .. } => "delete_and_ban",
			ModAction::AcceptAppeal { .. } => "accept_appeal",
			ModAction::TextDenyAppeal { .. } => "text_deny_appeal",
			ModAction::DenyAppeal { .. } => "deny_appeal",
		}
	}

	/// Positional arguments in wire order
	pub fn args(&self) -> Vec<String> {
		match *self {
			ModAction::DeleteReview { review_id } => vec![review_id.to_string()],
			ModAction::BanSelect { target_id, review_id }
			| ModAction::BanUser { target_id, review_id } => {
				vec![target_id.to_string(), review_id.to_string()]
			}
			ModAction::SelectDeleteAndBan { review_id, target_id }
			| ModAction::DeleteAndBan { review_id, target_id } => {
				vec![review_id.to_string(), target_id.to_string()]
			}
			ModAction::AcceptAppeal { appeal_id }
			| ModAction::TextDenyAppeal { appeal_id }
			| ModAction::DenyAppeal { appeal_id } => vec![appeal_id.to_string()],
		}
	}

	pub fn encode(&self) -> String {
		let mut out = self.verb().to_string();
		for arg in self.args() {
			out.push(':');
			out.push_str(&arg);
		}
		out
	}

	pub fn decode(s: &str) -> Result<Self, DecodeError> {
		if s.is_empty() {
			return Err(DecodeError::Empty);
		}
		if s.len() > MAX_CUSTOM_ID_LEN {
			return Err(DecodeError::TooLong(s.len()));
		}

		let mut parts = s.split(':');
		let verb = parts.next().unwrap_or_default();
		let args: Vec<&str> = parts.collect();

		let (verb, arity) = match verb {
			"delete_review" => ("delete_review", 1),
			"ban_select" => ("ban_select", 2),
			"ban_user" => ("ban_user", 2),
			"select_delete_and_ban" => ("select_delete_and_ban", 2),
			"delete_and_ban" => ("delete_and_ban", 2),
			"accept_appeal" => ("accept_appeal", 1),
			"text_deny_appeal" => ("text_deny_appeal", 1),
			"deny_appeal" => ("deny_appeal", 1),
			other => return Err(DecodeError::UnknownVerb(other.to_string())),
		};
		if args.len() != arity {
			return Err(DecodeError::Arity { verb, expected: arity, got: args.len() });
		}

		let args = Args { verb, args: &args };
		Ok(match verb {
			"delete_review" => ModAction::DeleteReview { review_id: ReviewId(args.row(0)?) },
			"ban_select" => {
				ModAction::BanSelect { target_id: args.user(0)?, review_id: ReviewId(args.row(1)?) }
			}
			"ban_user" => {
				ModAction::BanUser { target_id: args.user(0)?, review_id: ReviewId(args.row(1)?) }
			}
			"select_delete_and_ban" => ModAction::SelectDeleteAndBan {
				review_id: ReviewId(args.row(0)?),
				target_id: args.user(1)?,
			},
			"delete_and_ban" => ModAction::DeleteAndBan {
				review_id: ReviewId(args.row(0)?),
				target_id: args.user(1)?,
			},
			"accept_appeal" => ModAction::AcceptAppeal { appeal_id: AppealId(args.row(0)?) },
			"text_deny_appeal" => ModAction::TextDenyAppeal { appeal_id: AppealId(args.row(0)?) },
			_ => ModAction::DenyAppeal { appeal_id: AppealId(args.row(0)?) },
		})
	}
}

struct Args<'a> {
	verb: &'static str,
	args: &'a [&'a str],
}

impl Args<'_> {
	fn raw(&self, index: usize) -> Result<&str, DecodeError> {
		let arg = self.args.get(index).copied().unwrap_or_default();
		// `u64::from_str` accepts a leading '+', ids never carry one
		if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
			return Err(DecodeError::InvalidArgument { verb: self.verb, index });
		}
		Ok(arg)
	}

	fn user(&self, index: usize) -> Result<UserId, DecodeError> {
		self.raw(index)?
			.parse()
			.map_err(|_| DecodeError::InvalidArgument { verb: self.verb, index })
	}

	fn row(&self, index: usize) -> Result<i64, DecodeError> {
		self.raw(index)?
			.parse()
			.map_err(|_| DecodeError::InvalidArgument { verb: self.verb, index })
	}
}

impl fmt::Display for ModAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.encode())
	}
}

impl FromStr for ModAction {
	type Err = DecodeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::decode(s)
	}
}


// vim: ts=4
