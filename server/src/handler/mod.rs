//! HTTP handlers

pub mod appeal;
pub mod auth;
pub mod interaction;
pub mod report;
pub mod review;
pub mod settings;

use serde::Serialize;
use serde_with::skip_serializing_none;

/// Plain success/message response used by the mutating endpoints
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
	pub success: bool,
	pub message: Option<String>,
}

impl MessageResponse {
	pub fn ok(message: impl Into<String>) -> Self {
		Self { success: true, message: Some(message.into()) }
	}

	pub fn rejected(message: impl Into<String>) -> Self {
		Self { success: false, message: Some(message.into()) }
	}
}

// vim: ts=4
