//! Common types used throughout ReviewDB.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

// UserId //
//********//
/// External (platform) account id. Snowflakes exceed the JavaScript safe
/// integer range, so they travel as strings in JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

/// Acting admin id recorded for system-issued actions
pub const SYSTEM_USER: UserId = UserId(0);

impl UserId {
	pub fn as_i64(self) -> i64 {
		self.0 as i64
	}

	pub fn from_i64(v: i64) -> Self {
		UserId(v as u64)
	}
}

impl std::fmt::Display for UserId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::str::FromStr for UserId {
	type Err = std::num::ParseIntError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(UserId(s.parse()?))
	}
}

impl Serialize for UserId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.collect_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for UserId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		struct UserIdVisitor;

		impl serde::de::Visitor<'_> for UserIdVisitor {
			type Value = UserId;

			fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
				write!(f, "a user id as string or unsigned integer")
			}

			fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<UserId, E> {
				Ok(UserId(v))
			}

			fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<UserId, E> {
				v.parse().map_err(E::custom)
			}
		}

		deserializer.deserialize_any(UserIdVisitor)
	}
}

// Row ids //
//*********//
macro_rules! row_id {
	($name:ident) => {
		#[derive(
			Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
		)]
		#[serde(transparent)]
		pub struct $name(pub i64);

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				write!(f, "{}", self.0)
			}
		}
	};
}

row_id!(ReviewId);
row_id!(BanId);
row_id!(AppealId);

/// Review id recorded on bans issued by the policy chain rather than for a specific review
pub const POLICY_REVIEW: ReviewId = ReviewId(0);

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Timestamp {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(res.as_secs() as i64)
	}

	pub fn add_seconds(&self, seconds: i64) -> Timestamp {
		Timestamp(self.0 + seconds)
	}

	pub fn add_days(&self, days: i64) -> Timestamp {
		self.add_seconds(days * 86400)
	}

	/// Human-readable UTC form used in user-facing messages
	pub fn to_human(&self) -> String {
		match chrono::DateTime::from_timestamp(self.0, 0) {
			Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
			None => self.0.to_string(),
		}
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_user_id_json_as_string() {
		let json = serde_json::to_string(&UserId(343383572805058560)).unwrap();
		assert_eq!(json, "\"343383572805058560\"");
	}

	#[test]
	fn test_user_id_accepts_string_and_number() {
		let a: UserId = serde_json::from_str("\"42\"").unwrap();
		let b: UserId = serde_json::from_str("42").unwrap();
		assert_eq!(a, b);
		assert!(serde_json::from_str::<UserId>("\"4x2\"").is_err());
	}

	#[test]
	fn test_timestamp_human() {
		assert_eq!(Timestamp(0).to_human(), "1970-01-01 00:00 UTC");
		assert_eq!(Timestamp(0).add_days(7).0, 7 * 86400);
	}
}

// vim: ts=4
