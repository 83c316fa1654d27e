//! Configuration from environment variables

use std::env;
use std::path::PathBuf;

use crate::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct WebhookUrls {
	pub report: Option<Box<str>>,
	pub appeal: Option<Box<str>>,
	pub ban: Option<Box<str>>,
}

impl WebhookUrls {
	pub fn is_empty(&self) -> bool {
		self.report.is_none() && self.appeal.is_none() && self.ban.is_none()
	}
}

#[derive(Clone, Debug)]
pub struct OAuthConfig {
	pub client_id: Box<str>,
	pub client_secret: Box<str>,
	pub redirect_uri: Box<str>,
}

#[derive(Clone, Debug)]
pub struct Config {
	pub listen: Box<str>,
	pub db_dir: PathBuf,
	/// Static operator credential for destructive operations
	pub admin_token: Option<Box<str>>,
	/// Identities promoted to admin at startup
	pub admin_ids: Vec<UserId>,
	/// Hex encoded Ed25519 key used to verify interaction requests
	pub discord_public_key: Option<Box<str>>,
	pub oauth: Option<OAuthConfig>,
	pub webhooks: WebhookUrls,
	/// Light and strong word list files; built-in lists are used when unset
	pub word_lists: Option<(PathBuf, PathBuf)>,
}

impl Config {
	pub fn from_env() -> RdResult<Self> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> RdResult<Self> {
		let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

		let admin_ids = match var("ADMIN_IDS") {
			Some(ids) => ids
				.split(',')
				.map(str::trim)
				.filter(|s| !s.is_empty())
				.map(|s| {
					s.parse::<UserId>().map_err(|_| {
						error!(value = s, "Invalid ADMIN_IDS entry");
						Error::ValidationError(format!("invalid admin id {:?}", s))
					})
				})
				.collect::<RdResult<Vec<_>>>()?,
			None => Vec::new(),
		};

		let oauth = match (
			var("DISCORD_CLIENT_ID"),
			var("DISCORD_CLIENT_SECRET"),
			var("DISCORD_REDIRECT_URI"),
		) {
			(Some(client_id), Some(client_secret), Some(redirect_uri)) => Some(OAuthConfig {
				client_id: client_id.into(),
				client_secret: client_secret.into(),
				redirect_uri: redirect_uri.into(),
			}),
			(None, None, None) => None,
			_ => {
				error!("DISCORD_CLIENT_ID, DISCORD_CLIENT_SECRET and DISCORD_REDIRECT_URI must be set together");
				return Err(Error::ValidationError("incomplete OAuth configuration".into()));
			}
		};

		let word_lists = match (var("PROFANITY_LIGHT_FILE"), var("PROFANITY_STRONG_FILE")) {
			(Some(light), Some(strong)) => Some((PathBuf::from(light), PathBuf::from(strong))),
			(None, None) => None,
			_ => {
				error!("PROFANITY_LIGHT_FILE and PROFANITY_STRONG_FILE must be set together");
				return Err(Error::ValidationError("incomplete word list configuration".into()));
			}
		};

		Ok(Config {
			listen: var("LISTEN").unwrap_or_else(|| "127.0.0.1:8080".to_string()).into(),
			db_dir: PathBuf::from(var("DB_DIR").unwrap_or_else(|| "./data".to_string())),
			admin_token: var("ADMIN_TOKEN").map(Into::into),
			admin_ids,
			discord_public_key: var("DISCORD_PUBLIC_KEY").map(Into::into),
			oauth,
			webhooks: WebhookUrls {
				report: var("REPORT_WEBHOOK_URL").map(Into::into),
				appeal: var("APPEAL_WEBHOOK_URL").map(Into::into),
				ban: var("BAN_WEBHOOK_URL").map(Into::into),
			},
			word_lists,
		})
	}
}


// vim: ts=4
