//! User settings

use axum::{Json, extract::State};
use serde::Deserialize;

use reviewdb_core::review;

use super::MessageResponse;
use crate::extract::Token;
use crate::prelude::*;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRequest {
	pub opt_out: bool,
}

/// PATCH /api/settings
pub async fn patch_settings(
	State(srv): State<Server>,
	Token(token): Token,
	Json(req): Json<SettingsRequest>,
) -> RdResult<Json<MessageResponse>> {
	review::set_opt_out(&srv.app, &token, req.opt_out).await?;
	Ok(Json(MessageResponse::ok(if req.opt_out {
		"Opted out of ReviewDB"
	} else {
		"Opted back in to ReviewDB"
	})))
}

// vim: ts=4
