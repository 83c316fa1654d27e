use axum::{
	Router,
	routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::prelude::*;

pub fn init(srv: Server) -> Router {
	let api = Router::new()
		.route(
			"/api/users/{id}/reviews",
			get(handler::review::get_reviews)
				.put(handler::review::put_review)
				.delete(handler::review::delete_review),
		)
		.route("/api/reports", post(handler::report::post_report))
		.route("/api/appeals", post(handler::appeal::post_appeal))
		.route("/api/settings", patch(handler::settings::patch_settings))
		.route("/api/auth", get(handler::auth::get_login))
		.route("/api/interactions", post(handler::interaction::post_interaction));

	Router::new()
		.route("/health", get(async || "ok\n"))
		.merge(api)
		.layer(TraceLayer::new_for_http())
		.with_state(srv)
}

// vim: ts=4
