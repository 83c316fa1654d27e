//! Utility functions

use rand::RngExt;

use crate::prelude::*;

pub const TOKEN_LENGTH: usize = 48;
pub const SAFE: [char; 62] = [
	'0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
	'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
	'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
	'V', 'W', 'X', 'Y', 'Z',
];

/// Opaque client token handed out after a successful OAuth login
pub fn random_token() -> RdResult<String> {
	let mut rng = rand::rng();
	let mut result = String::with_capacity(TOKEN_LENGTH);

	for _ in 0..TOKEN_LENGTH {
		result.push(SAFE[rng.random_range(0..SAFE.len())]);
	}
	Ok(result)
}

/// Truncate to at most `max` characters, appending an ellipsis when cut
pub fn truncate_chars(s: &str, max: usize) -> String {
	if s.chars().count() <= max {
		return s.to_string();
	}
	let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
	out.push('…');
	out
}


// vim: ts=4
