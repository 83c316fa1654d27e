//! Test server builder
//!
//! Every test gets its own SQLite database in a temporary directory. The
//! TempDir is kept inside [`TestServer`] so it is removed when the test ends.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use reviewdb::oauth::DisabledOAuth;
use reviewdb::{Server, ServerState, routes};
use reviewdb_admin::Ed25519Verifier;
use reviewdb_core::detect::ProfanityFilter;
use reviewdb_core::notify::{NotificationKind, Notifier};
use reviewdb_core::prelude::*;
use reviewdb_core::{AppBuilder, ModerationConfig};
use reviewdb_meta_adapter_sqlite::MetaAdapterSqlite;
use reviewdb_types::meta_adapter::{
	Appeal, AppealOutcome, AuditLogEntry, BanRecord, Identity, IdentityKind, ListReviewOptions,
	MetaAdapter, NewBan, NewReview, Review, ReviewView, UpsertIdentity,
};

use super::fixtures;

pub const OPERATOR_TOKEN: &str = "operator-secret";

/// Optional: initialize tracing for debugging a test
pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

/// Notifier that keeps every notification for inspection
#[derive(Debug, Default)]
pub struct RecordingNotifier {
	pub sent: Mutex<Vec<(NotificationKind, Value)>>,
}

impl RecordingNotifier {
	pub fn of_kind(&self, kind: NotificationKind) -> Vec<Value> {
		self.sent
			.lock()
			.unwrap()
			.iter()
			.filter(|(k, _)| *k == kind)
			.map(|(_, payload)| payload.clone())
			.collect()
	}
}

#[async_trait]
impl Notifier for RecordingNotifier {
	async fn notify(&self, kind: NotificationKind, payload: Value) -> RdResult<()> {
		self.sent.lock().unwrap().push((kind, payload));
		Ok(())
	}
}

/// Storage seen by the app: delegates to SQLite unless a write is switched to fail
#[derive(Debug)]
pub struct FaultyAdapter {
	inner: Arc<MetaAdapterSqlite>,
	pub fail_delete: AtomicBool,
	pub fail_audit: AtomicBool,
}

impl FaultyAdapter {
	fn new(inner: Arc<MetaAdapterSqlite>) -> Self {
		Self { inner, fail_delete: AtomicBool::new(false), fail_audit: AtomicBool::new(false) }
	}

	fn check(flag: &AtomicBool) -> RdResult<()> {
		if flag.load(Ordering::SeqCst) { Err(Error::DbError) } else { Ok(()) }
	}
}

#[async_trait]
impl MetaAdapter for FaultyAdapter {
	async fn read_identity(&self, id: UserId) -> RdResult<Identity> {
		self.inner.read_identity(id).await
	}

	async fn read_identity_by_token(&self, token: &str) -> RdResult<Identity> {
		self.inner.read_identity_by_token(token).await
	}

	async fn upsert_identity(&self, data: &UpsertIdentity) -> RdResult<()> {
		self.inner.upsert_identity(data).await
	}

	async fn set_opt_out(&self, id: UserId, opted_out: bool) -> RdResult<()> {
		self.inner.set_opt_out(id, opted_out).await
	}

	async fn set_identity_kind(&self, id: UserId, kind: IdentityKind) -> RdResult<()> {
		self.inner.set_identity_kind(id, kind).await
	}

	async fn count_reviews_since(&self, author_id: UserId, since: Timestamp) -> RdResult<u32> {
		self.inner.count_reviews_since(author_id, since).await
	}

	async fn create_review(&self, review: &NewReview) -> RdResult<ReviewId> {
		self.inner.create_review(review).await
	}

	async fn read_review(&self, review_id: ReviewId) -> RdResult<Review> {
		self.inner.read_review(review_id).await
	}

	async fn delete_review(&self, review_id: ReviewId) -> RdResult<()> {
		Self::check(&self.fail_delete)?;
		self.inner.delete_review(review_id).await
	}

	async fn list_reviews(
		&self,
		target_id: UserId,
		opts: &ListReviewOptions,
	) -> RdResult<Vec<ReviewView>> {
		self.inner.list_reviews(target_id, opts).await
	}

	async fn create_ban(&self, ban: &NewBan) -> RdResult<BanRecord> {
		self.inner.create_ban(ban).await
	}

	async fn read_ban(&self, ban_id: BanId) -> RdResult<BanRecord> {
		self.inner.read_ban(ban_id).await
	}

	async fn create_appeal(
		&self,
		user_id: UserId,
		ban_id: BanId,
		text: &str,
	) -> RdResult<Appeal> {
		self.inner.create_appeal(user_id, ban_id, text).await
	}

	async fn read_appeal(&self, appeal_id: AppealId) -> RdResult<Appeal> {
		self.inner.read_appeal(appeal_id).await
	}

	async fn resolve_appeal(
		&self,
		appeal_id: AppealId,
		outcome: &AppealOutcome,
	) -> RdResult<Appeal> {
		self.inner.resolve_appeal(appeal_id, outcome).await
	}

	async fn append_audit_log(&self, entry: &AuditLogEntry) -> RdResult<()> {
		Self::check(&self.fail_audit)?;
		self.inner.append_audit_log(entry).await
	}

	async fn list_audit_log(&self, target_id: UserId) -> RdResult<Vec<AuditLogEntry>> {
		self.inner.list_audit_log(target_id).await
	}
}

pub struct TestServer {
	pub srv: Server,
	pub router: Router,
	/// Direct storage access, never faulty
	pub adapter: Arc<MetaAdapterSqlite>,
	pub faults: Arc<FaultyAdapter>,
	pub notifier: Arc<RecordingNotifier>,
	_temp: TempDir,
}

pub async fn create_test_server() -> TestServer {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter =
		Arc::new(MetaAdapterSqlite::new(temp_dir.path()).await.expect("Failed to create adapter"));
	let faults = Arc::new(FaultyAdapter::new(adapter.clone()));
	let notifier = Arc::new(RecordingNotifier::default());

	let app = AppBuilder::new()
		.meta_adapter(faults.clone())
		.notifier(notifier.clone())
		.config(ModerationConfig {
			profanity: ProfanityFilter::new(["darn"], ["slurword"]),
			..ModerationConfig::default()
		})
		.admin_token(OPERATOR_TOKEN)
		.build()
		.expect("Failed to build app");

	let verifier = Ed25519Verifier::from_hex(&fixtures::public_key_hex()).expect("verifier");
	let srv = Arc::new(ServerState {
		app,
		verifier: Some(Arc::new(verifier)),
		oauth: Arc::new(DisabledOAuth),
		redirect_uri: None,
	});
	let router = routes::init(srv.clone());

	TestServer { srv, router, adapter, faults, notifier, _temp: temp_dir }
}

impl TestServer {
	/// Send a request, returning the status and the JSON body (`Null` if empty)
	pub async fn call(&self, req: Request<Body>) -> (StatusCode, Value) {
		let res = self.router.clone().oneshot(req).await.expect("router error");
		let status = res.status();
		let bytes = res.into_body().collect().await.expect("body").to_bytes();
		let body = if bytes.is_empty() {
			Value::Null
		} else {
			serde_json::from_slice(&bytes).expect("JSON body")
		};
		(status, body)
	}

	pub async fn json(&self, method: &str, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
		let mut req = Request::builder()
			.method(method)
			.uri(uri)
			.header("Content-Type", "application/json");
		if let Some(token) = token {
			req = req.header("Authorization", token);
		}
		self.call(req.body(Body::from(body.to_string())).unwrap()).await
	}

	pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
		self.call(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
	}

	/// Post a signed interaction
	pub async fn interact(&self, payload: &Value) -> (StatusCode, Value) {
		let body = payload.to_string();
		let (signature, timestamp) = fixtures::sign(body.as_bytes());
		self.call(
			Request::builder()
				.method("POST")
				.uri("/api/interactions")
				.header("Content-Type", "application/json")
				.header("X-Signature-Ed25519", signature)
				.header("X-Signature-Timestamp", timestamp)
				.body(Body::from(body))
				.unwrap(),
		)
		.await
	}

	pub async fn put_review(&self, token: &str, target: u64, comment: &str) -> (StatusCode, Value) {
		self.json(
			"PUT",
			&format!("/api/users/{}/reviews", target),
			Some(token),
			serde_json::json!({ "comment": comment, "reviewType": 0 }),
		)
		.await
	}
}
