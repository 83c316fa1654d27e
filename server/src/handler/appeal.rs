//! Appeal endpoint

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use reviewdb_core::{auth, moderation};

use crate::extract::Token;
use crate::prelude::*;

#[derive(Debug, Deserialize)]
pub struct AppealRequest {
	pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealResponse {
	pub success: bool,
	pub message: String,
	pub appeal_id: AppealId,
}

/// POST /api/appeals
pub async fn post_appeal(
	State(srv): State<Server>,
	Token(token): Token,
	Json(req): Json<AppealRequest>,
) -> RdResult<Json<AppealResponse>> {
	let ident = auth::authenticate(&srv.app, &token).await?;
	let appeal = moderation::submit_appeal(&srv.app, &ident, &req.text).await?;
	reviewdb_admin::appeal::notify_appeal(&srv.app, &ident, &appeal).await;
	Ok(Json(AppealResponse {
		success: true,
		message: "Submitted your appeal".into(),
		appeal_id: appeal.appeal_id,
	}))
}

// vim: ts=4
