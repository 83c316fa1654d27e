//! Content detectors used by the policy filter chain
//!
//! All detectors are pure functions over the review text.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::prelude::*;

static URL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
	Regex::new(
		r"(?i)(https?://\S+)|(\bwww\.\S+)|(\b[a-z0-9-]+(\.[a-z0-9-]+)*\.(com|net|org|gg|io|xyz|ru|co|me|ly|tk|app|dev|link|to|gift)\b)",
	)
	.inspect_err(|err| error!("invalid URL pattern: {}", err))
	.ok()
});

static EMOJI_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
	Regex::new(r"<a?:\w+:\d+>")
		.inspect_err(|err| error!("invalid emoji pattern: {}", err))
		.ok()
});

/// True if the text contains something that looks like a link
pub fn contains_url(text: &str) -> bool {
	URL_RE.as_ref().is_some_and(|re| re.is_match(text))
}

/// True if the text contains platform custom emoji markup (`<:name:id>` or `<a:name:id>`)
pub fn contains_custom_emoji(text: &str) -> bool {
	EMOJI_RE.as_ref().is_some_and(|re| re.is_match(text))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProfanityLevel {
	None,
	Light,
	Strong,
}

const DEFAULT_LIGHT: &[&str] = &[
	"fuck", "fucking", "fucker", "shit", "bitch", "asshole", "dick", "cunt", "bastard", "whore",
	"slut", "motherfucker", "wanker", "twat",
];

const DEFAULT_STRONG: &[&str] = &["nigger", "nigga", "faggot", "fag", "tranny", "retard", "kys"];

/// Two-tier word list detector.
///
/// Words are compared after lowercasing, undoing common character substitutions
/// and dropping punctuation inside a word, so `f.u.c.k` and `$h1t` still match.
#[derive(Clone, Debug)]
pub struct ProfanityFilter {
	light: HashSet<String>,
	strong: HashSet<String>,
}

impl Default for ProfanityFilter {
	fn default() -> Self {
		Self::new(DEFAULT_LIGHT.iter().copied(), DEFAULT_STRONG.iter().copied())
	}
}

impl ProfanityFilter {
	pub fn new<'a>(
		light: impl IntoIterator<Item = &'a str>,
		strong: impl IntoIterator<Item = &'a str>,
	) -> Self {
		let norm = |w: &str| normalize_word(w.trim());
		Self {
			light: light.into_iter().map(norm).filter(|w| !w.is_empty()).collect(),
			strong: strong.into_iter().map(norm).filter(|w| !w.is_empty()).collect(),
		}
	}

	/// Load word lists from files with one word per line. `#` starts a comment line.
	pub async fn from_files(light: &Path, strong: &Path) -> RdResult<Self> {
		let light = read_word_list(light).await?;
		let strong = read_word_list(strong).await?;
		Ok(Self::new(light.iter().map(String::as_str), strong.iter().map(String::as_str)))
	}

	/// Highest level of any word in the text
	pub fn level(&self, text: &str) -> ProfanityLevel {
		let mut level = ProfanityLevel::None;
		for word in text.split(|c: char| c.is_whitespace()) {
			let word = normalize_word(word);
			if word.is_empty() {
				continue;
			}
			if self.strong.contains(&word) {
				return ProfanityLevel::Strong;
			}
			if self.light.contains(&word) {
				level = ProfanityLevel::Light;
			}
		}
		level
	}
}

async fn read_word_list(path: &Path) -> RdResult<Vec<String>> {
	let content = tokio::fs::read_to_string(path).await.map_err(|err| {
		error!(path = %path.display(), error = %err, "Failed to read word list");
		Error::Internal(format!("cannot read word list {}", path.display()))
	})?;
	Ok(content
		.lines()
		.map(str::trim)
		.filter(|l| !l.is_empty() && !l.starts_with('#'))
		.map(ToString::to_string)
		.collect())
}

fn normalize_word(word: &str) -> String {
	word.chars()
		.flat_map(char::to_lowercase)
		.map(|c| match c {
			'0' => 'o',
			'1' => 'i',
			'3' => 'e',
			'4' | '@' => 'a',
			'5' | '$' => 's',
			'7' => 't',
			c => c,
		})
		.filter(|c| c.is_alphanumeric())
		.collect()
}


// vim: ts=4
