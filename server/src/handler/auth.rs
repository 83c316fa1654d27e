//! OAuth login

use axum::{
	Json,
	extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use reviewdb_types::meta_adapter::UpsertIdentity;
use reviewdb_types::utils::random_token;

use crate::prelude::*;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
	pub code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
	pub success: bool,
	pub token: String,
}

/// GET /api/auth?code=...
pub async fn get_login(
	State(srv): State<Server>,
	Query(query): Query<LoginQuery>,
) -> RdResult<Json<LoginResponse>> {
	let redirect_uri = srv.redirect_uri.as_deref().unwrap_or_default();
	let access_token = srv.oauth.exchange_code(&query.code, redirect_uri).await?;
	let user = srv.oauth.fetch_user(&access_token).await?;

	let token = random_token()?;
	srv.app
		.meta_adapter
		.upsert_identity(&UpsertIdentity {
			id: user.id,
			name: user.name,
			avatar: user.avatar,
			token: Some(token.clone().into()),
		})
		.await?;

	info!(subject = %user.id, "User logged in");
	Ok(Json(LoginResponse { success: true, token }))
}

// vim: ts=4
