//! Outbound notifications (reports, appeals, automatic bans)
//!
//! Delivery is best-effort. A failing notifier is logged and never aborts the
//! moderation action that triggered it.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
	/// A review was reported, payload carries admin action buttons
	Report,
	/// A banned user appealed, payload carries accept/deny buttons
	Appeal,
	/// The policy chain banned an author automatically
	Ban,
	/// An appeal was accepted or denied
	AppealResolved,
}

impl NotificationKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			NotificationKind::Report => "report",
			NotificationKind::Appeal => "appeal",
			NotificationKind::Ban => "ban",
			NotificationKind::AppealResolved => "appeal_resolved",
		}
	}
}

#[async_trait]
pub trait Notifier: Debug + Send + Sync {
	/// Deliver a message payload (`{content, components?}`)
	async fn notify(&self, kind: NotificationKind, payload: serde_json::Value) -> RdResult<()>;
}

/// Notifier that only logs, used when no delivery target is configured
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
	async fn notify(&self, kind: NotificationKind, payload: serde_json::Value) -> RdResult<()> {
		debug!(kind = kind.as_str(), %payload, "Notification (not delivered)");
		Ok(())
	}
}

/// Send a notification, logging instead of propagating failures
pub async fn send_notification(app: &App, kind: NotificationKind, payload: serde_json::Value) {
	if let Err(err) = app.notifier.notify(kind, payload).await {
		warn!(kind = kind.as_str(), error = %err, "Failed to send notification");
	}
}

// vim: ts=4
