//! Review endpoints

use axum::{
	Json,
	extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use reviewdb_core::auth;
use reviewdb_core::moderation;
use reviewdb_core::review::{self, AddReviewOutcome};
use reviewdb_types::meta_adapter::{ReviewType, ReviewView};

use super::MessageResponse;
use crate::extract::Token;
use crate::prelude::*;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
	#[serde(default)]
	pub offset: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReviewsResponse {
	pub success: bool,
	pub reviews: Vec<ReviewView>,
	pub has_next_page: bool,
}

/// GET /api/users/{id}/reviews
pub async fn get_reviews(
	State(srv): State<Server>,
	Path(target_id): Path<UserId>,
	Query(query): Query<ListQuery>,
) -> RdResult<Json<ListReviewsResponse>> {
	let reviews = review::list_reviews(&srv.app, target_id, query.offset).await?;
	let has_next_page = reviews.len() >= srv.app.config.page_size as usize;
	Ok(Json(ListReviewsResponse { success: true, reviews, has_next_page }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutReviewRequest {
	pub comment: String,
	#[serde(default = "default_review_type")]
	pub review_type: ReviewType,
}

fn default_review_type() -> ReviewType {
	ReviewType::User
}

/// PUT /api/users/{id}/reviews
pub async fn put_review(
	State(srv): State<Server>,
	Token(token): Token,
	Path(target_id): Path<UserId>,
	Json(req): Json<PutReviewRequest>,
) -> RdResult<Json<MessageResponse>> {
	let outcome =
		review::add_review(&srv.app, &token, target_id, &req.comment, req.review_type).await?;
	Ok(Json(match outcome {
		AddReviewOutcome::Added(_) => MessageResponse::ok("Added your review"),
		AddReviewOutcome::Rejected(reason) | AddReviewOutcome::Banned(reason) => {
			MessageResponse::rejected(reason)
		}
	}))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReviewRequest {
	pub review_id: ReviewId,
}

/// DELETE /api/users/{id}/reviews
pub async fn delete_review(
	State(srv): State<Server>,
	Token(token): Token,
	Path(_target_id): Path<UserId>,
	Json(req): Json<DeleteReviewRequest>,
) -> RdResult<Json<MessageResponse>> {
	let actor = auth::resolve_actor(&srv.app, &token).await?;
	moderation::delete_review(&srv.app, req.review_id, &actor).await?;
	Ok(Json(MessageResponse::ok("Deleted review")))
}

// vim: ts=4
