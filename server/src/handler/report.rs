//! Report endpoint

use axum::{Json, extract::State};
use serde::Deserialize;

use reviewdb_core::review;

use super::MessageResponse;
use crate::extract::Token;
use crate::prelude::*;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
	pub review_id: ReviewId,
}

/// POST /api/reports
pub async fn post_report(
	State(srv): State<Server>,
	Token(token): Token,
	Json(req): Json<ReportRequest>,
) -> RdResult<Json<MessageResponse>> {
	let ctx = review::report_review(&srv.app, &token, req.review_id).await?;
	reviewdb_admin::report::notify_report(&srv.app, &ctx).await;
	Ok(Json(MessageResponse::ok("Reported review")))
}

// vim: ts=4
