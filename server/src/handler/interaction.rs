//! Interaction endpoint of the chat platform

use axum::{
	Json,
	body::Bytes,
	extract::State,
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
};

use reviewdb_admin::interaction::Interaction;

use crate::prelude::*;

pub const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";
pub const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

/// POST /api/interactions
pub async fn post_interaction(
	State(srv): State<Server>,
	headers: HeaderMap,
	body: Bytes,
) -> RdResult<Response> {
	let Some(verifier) = &srv.verifier else {
		return Err(Error::ServiceUnavailable("interactions are not configured".into()));
	};

	let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or_default();
	if !verifier.verify(header(SIGNATURE_HEADER), header(TIMESTAMP_HEADER), &body) {
		debug!("Rejected interaction with invalid signature");
		return Err(Error::Unauthorized);
	}

	let interaction: Interaction = serde_json::from_slice(&body).map_err(|err| {
		warn!(error = %err, "Malformed interaction payload");
		Error::Parse
	})?;

	Ok(match reviewdb_admin::handle_interaction(&srv.app, &interaction).await {
		Some(res) => Json(res).into_response(),
		None => StatusCode::BAD_REQUEST.into_response(),
	})
}

// vim: ts=4
