//! App state type

use std::sync::Arc;

use reviewdb_types::meta_adapter::MetaAdapter;

use crate::detect::ProfanityFilter;
use crate::notify::{LogNotifier, Notifier};
use crate::prelude::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Moderation tunables
#[derive(Clone, Debug)]
pub struct ModerationConfig {
	/// Maximum reviews per author inside `rate_limit_window`
	pub rate_limit_per_hour: u32,
	/// Rate limit window in seconds
	pub rate_limit_window: i64,
	/// Length of the ban issued by the strong profanity filter
	pub auto_ban_days: i64,
	pub review_max_len: usize,
	pub appeal_max_len: usize,
	pub page_size: u32,
	pub profanity: ProfanityFilter,
}

impl Default for ModerationConfig {
	fn default() -> Self {
		Self {
			rate_limit_per_hour: 20,
			rate_limit_window: 3600,
			auto_ban_days: 7,
			review_max_len: 1000,
			appeal_max_len: 1000,
			page_size: 50,
			profanity: ProfanityFilter::default(),
		}
	}
}

pub struct AppState {
	pub meta_adapter: Arc<dyn MetaAdapter>,
	pub notifier: Arc<dyn Notifier>,
	pub config: ModerationConfig,
	/// Static operator credential accepted for destructive operations
	pub admin_token: Option<Box<str>>,
}

impl AppState {
	pub fn is_operator_token(&self, token: &str) -> bool {
		self.admin_token.as_deref().is_some_and(|t| !t.is_empty() && t == token)
	}
}

pub type App = Arc<AppState>;

pub struct AppBuilder {
	meta_adapter: Option<Arc<dyn MetaAdapter>>,
	notifier: Option<Arc<dyn Notifier>>,
	config: ModerationConfig,
	admin_token: Option<Box<str>>,
}

impl AppBuilder {
	pub fn new() -> Self {
		AppBuilder {
			meta_adapter: None,
			notifier: None,
			config: ModerationConfig::default(),
			admin_token: None,
		}
	}

	pub fn meta_adapter(&mut self, meta_adapter: Arc<dyn MetaAdapter>) -> &mut Self {
		self.meta_adapter = Some(meta_adapter);
		self
	}
	pub fn notifier(&mut self, notifier: Arc<dyn Notifier>) -> &mut Self {
		self.notifier = Some(notifier);
		self
	}
	pub fn config(&mut self, config: ModerationConfig) -> &mut Self {
		self.config = config;
		self
	}
	pub fn admin_token(&mut self, admin_token: impl Into<Box<str>>) -> &mut Self {
		self.admin_token = Some(admin_token.into());
		self
	}

	pub fn build(&mut self) -> RdResult<App> {
		let Some(meta_adapter) = self.meta_adapter.take() else {
			error!("FATAL: No meta adapter configured");
			return Err(Error::Internal("No meta adapter configured".to_string()));
		};
		let notifier = self.notifier.take().unwrap_or_else(|| {
			info!("No notifier configured, notifications will only be logged");
			Arc::new(LogNotifier)
		});
		if self.admin_token.is_none() {
			info!("No admin token configured, operator bypass disabled");
		}

		Ok(Arc::new(AppState {
			meta_adapter,
			notifier,
			config: self.config.clone(),
			admin_token: self.admin_token.take(),
		}))
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
