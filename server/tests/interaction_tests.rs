//! Admin interactions: signature checks, ban workflows and appeal resolution

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::adapters::{TestServer, create_test_server};
use common::fixtures::{ADMIN, add_admin, add_user, component, modal, ping};
use reviewdb_core::notify::NotificationKind;
use reviewdb_core::prelude::*;
use reviewdb_types::meta_adapter::{IdentityKind, MetaAdapter};

/// Id of the newest review about `target`
async fn review_of(ts: &TestServer, target: u64) -> i64 {
	let (_, list) = ts.get(&format!("/api/users/{}/reviews", target)).await;
	list["reviews"][0]["id"].as_i64().unwrap()
}

/// Gets user 555 auto-banned and files an appeal, returning its id
async fn banned_with_appeal(ts: &TestServer) -> i64 {
	let token = add_user(ts, 555).await;
	ts.put_review(&token, 50, "you slurword").await;
	let (status, body) =
		ts.json("POST", "/api/appeals", Some(&token), json!({ "text": "I am sorry" })).await;
	assert_eq!(status, StatusCode::OK);
	body["appealId"].as_i64().unwrap()
}

#[tokio::test]
async fn test_ping() {
	let ts = create_test_server().await;
	let (status, body) = ts.interact(&ping()).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "type": 1 }));
}

#[tokio::test]
async fn test_bad_signature() {
	let ts = create_test_server().await;
	let (status, _) = ts
		.call(
			axum::http::Request::builder()
				.method("POST")
				.uri("/api/interactions")
				.header("X-Signature-Ed25519", "00".repeat(64))
				.header("X-Signature-Timestamp", "1700000000")
				.body(axum::body::Body::from(ping().to_string()))
				.unwrap(),
		)
		.await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_admin_gets_no_response() {
	let ts = create_test_server().await;
	add_user(&ts, 2).await;
	add_user(&ts, 555).await;
	let (status, body) = ts.interact(&component("ban_select:555:77", 2, &[])).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_malformed_action() {
	let ts = create_test_server().await;
	add_admin(&ts).await;
	for custom_id in ["ban_select:555", "explode:1", "delete_review:abc", ""] {
		let (status, body) = ts.interact(&component(custom_id, ADMIN, &[])).await;
		assert_eq!(status, StatusCode::BAD_REQUEST, "{}", custom_id);
		assert_eq!(body, Value::Null);
	}
}

#[tokio::test]
async fn test_ban_select_offers_durations() {
	let ts = create_test_server().await;
	add_admin(&ts).await;
	let (status, body) = ts.interact(&component("ban_select:555:77", ADMIN, &[])).await;
	assert_eq!(status, StatusCode::OK);
	// Edits the report in place, not a new ephemeral message
	assert_eq!(body["type"], 7);
	assert!(body["data"]["flags"].is_null());
	assert_eq!(body["data"]["content"], "Select ban duration for <@555>");
	let menu = &body["data"]["components"][0]["components"][0];
	assert_eq!(menu["custom_id"], "ban_user:555:77");
	assert_eq!(menu["options"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_delete_and_ban_select_edits_report() {
	let ts = create_test_server().await;
	add_admin(&ts).await;
	let (status, body) = ts.interact(&component("select_delete_and_ban:77:555", ADMIN, &[])).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["type"], 7);
	assert!(body["data"]["flags"].is_null());
	assert_eq!(body["data"]["content"], "Select ban duration for <@555>");
	let menu = &body["data"]["components"][0]["components"][0];
	assert_eq!(menu["custom_id"], "delete_and_ban:77:555");
}

#[tokio::test]
async fn test_command_interaction_answered_with_pong() {
	let ts = create_test_server().await;
	let command = json!({
		"type": 2,
		"data": { "name": "reviewdb" },
		"member": { "user": { "id": ADMIN.to_string() } }
	});
	let (status, body) = ts.interact(&command).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "type": 1 }));

	let (status, body) = ts.interact(&json!({ "type": 4, "data": { "name": "reviewdb" } })).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "type": 1 }));
}

#[tokio::test]
async fn test_ban_user_with_duration() {
	let ts = create_test_server().await;
	add_admin(&ts).await;
	add_user(&ts, 555).await;

	let (_, body) = ts.interact(&component("ban_user:555:77", ADMIN, &["3"])).await;
	assert_eq!(body["type"], 7);
	assert_eq!(body["data"]["content"], "Banned <@555> for 3 days");
	assert_eq!(body["data"]["components"], json!([]));

	let ident = ts.adapter.read_identity(UserId(555)).await.unwrap();
	assert!(ident.is_blocked(Timestamp::now()));
	assert_eq!(ident.ban.unwrap().admin_id, Some(UserId(ADMIN)));

	// Only offered durations are accepted
	let (status, _) = ts.interact(&component("ban_user:555:77", ADMIN, &["5"])).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_and_ban_with_review_already_gone() {
	let ts = create_test_server().await;
	add_admin(&ts).await;
	add_user(&ts, 555).await;

	let (status, body) = ts.interact(&component("delete_and_ban:77:555", ADMIN, &["7"])).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["type"], 7);
	assert_eq!(
		body["data"]["content"],
		"Banned <@555> for 7 days, but failed to delete review 77: not found"
	);
	assert_eq!(body["data"]["components"], json!([]));
	assert!(ts.adapter.read_identity(UserId(555)).await.unwrap().is_blocked(Timestamp::now()));
}

#[tokio::test]
async fn test_delete_and_ban_permanently() {
	let ts = create_test_server().await;
	add_admin(&ts).await;
	let token = add_user(&ts, 555).await;
	ts.put_review(&token, 50, "terrible review").await;
	let id = review_of(&ts, 50).await;

	let custom_id = format!("delete_and_ban:{}:555", id);
	let (_, body) = ts.interact(&component(&custom_id, ADMIN, &["0"])).await;
	assert_eq!(
		body["data"]["content"],
		format!("Banned <@555> permanently and deleted review {}", id)
	);

	let ident = ts.adapter.read_identity(UserId(555)).await.unwrap();
	assert_eq!(ident.kind, IdentityKind::Banned);
	assert_eq!(&*ident.ban.unwrap().review_content, "terrible review");
	let (_, list) = ts.get("/api/users/50/reviews").await;
	assert!(list["reviews"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_and_ban_admin_target() {
	let ts = create_test_server().await;
	let admin_token = add_admin(&ts).await;
	ts.put_review(&admin_token, 50, "admin review").await;
	let id = review_of(&ts, 50).await;

	let custom_id = format!("delete_and_ban:{}:{}", id, ADMIN);
	let (_, body) = ts.interact(&component(&custom_id, ADMIN, &["7"])).await;
	assert_eq!(
		body["data"]["content"],
		format!("Deleted review {}, but failed to ban <@{}>: admins cannot be banned", id, ADMIN)
	);
	assert!(ts.adapter.read_identity(UserId(ADMIN)).await.unwrap().ban.is_none());
}

#[tokio::test]
async fn test_delete_review_button() {
	let ts = create_test_server().await;
	add_admin(&ts).await;
	let token = add_user(&ts, 1).await;
	ts.put_review(&token, 50, "spam").await;
	let id = review_of(&ts, 50).await;

	let (_, body) = ts.interact(&component(&format!("delete_review:{}", id), ADMIN, &[])).await;
	assert_eq!(body["type"], 7);
	assert_eq!(body["data"]["content"], format!("Deleted review {}", id));
	assert_eq!(body["data"]["components"], json!([]));

	let (_, body) = ts.interact(&component(&format!("delete_review:{}", id), ADMIN, &[])).await;
	assert_eq!(body["type"], 4);
	assert_eq!(body["data"]["flags"], 64);
	assert_eq!(body["data"]["content"], format!("Failed to delete review {}: not found", id));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_accept_resolves_once() {
	let ts = create_test_server().await;
	add_admin(&ts).await;
	let appeal_id = banned_with_appeal(&ts).await;

	let click = component(&format!("accept_appeal:{}", appeal_id), ADMIN, &[]);
	let ((_, a), (_, b)) = tokio::join!(ts.interact(&click), ts.interact(&click));

	let accepted = format!("Appeal #{} accepted by <@{}>. <@555> is unbanned.", appeal_id, ADMIN);
	let rejected =
		format!("Could not accept appeal #{}: this appeal has already been handled", appeal_id);
	let mut contents =
		vec![a["data"]["content"].as_str().unwrap(), b["data"]["content"].as_str().unwrap()];
	contents.sort_unstable();
	let mut expected = vec![accepted.as_str(), rejected.as_str()];
	expected.sort_unstable();
	assert_eq!(contents, expected);

	assert!(!ts.adapter.read_identity(UserId(555)).await.unwrap().is_blocked(Timestamp::now()));
	assert_eq!(ts.notifier.of_kind(NotificationKind::AppealResolved).len(), 1);
}

#[tokio::test]
async fn test_deny_appeal_via_modal() {
	let ts = create_test_server().await;
	add_admin(&ts).await;
	let appeal_id = banned_with_appeal(&ts).await;

	let (_, body) =
		ts.interact(&component(&format!("text_deny_appeal:{}", appeal_id), ADMIN, &[])).await;
	assert_eq!(body["type"], 9);
	assert_eq!(body["data"]["custom_id"], format!("deny_appeal:{}", appeal_id));
	assert_eq!(body["data"]["components"][0]["components"][0]["custom_id"], "reason");

	let (_, body) = ts
		.interact(&modal(&format!("deny_appeal:{}", appeal_id), ADMIN, "not sorry enough"))
		.await;
	assert_eq!(body["type"], 7);
	assert_eq!(
		body["data"]["content"],
		format!("Appeal #{} of <@555> denied by <@{}>: not sorry enough", appeal_id, ADMIN)
	);
	assert!(ts.adapter.read_identity(UserId(555)).await.unwrap().is_blocked(Timestamp::now()));

	// Resolved appeals stay resolved
	let (_, body) =
		ts.interact(&component(&format!("accept_appeal:{}", appeal_id), ADMIN, &[])).await;
	assert_eq!(body["type"], 4);
	assert!(ts.adapter.read_identity(UserId(555)).await.unwrap().is_blocked(Timestamp::now()));
}
