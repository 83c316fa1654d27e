//! SQLite implementation of the ReviewDB storage adapter.

#![forbid(unsafe_code)]

mod appeal;
mod audit;
mod ban;
mod identity;
mod review;
mod schema;
mod utils;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use reviewdb::meta_adapter::*;
use reviewdb::prelude::*;

use crate::schema::init_db;

#[derive(Debug)]
pub struct MetaAdapterSqlite {
	db: SqlitePool,
}

impl MetaAdapterSqlite {
	/// Open (or create) `meta.db` inside `path`
	pub async fn new(path: impl AsRef<Path>) -> RdResult<Self> {
		tokio::fs::create_dir_all(path.as_ref()).await.map_err(|err| {
			error!("Cannot create database directory: {}", err);
			Error::DbError
		})?;

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref().join("meta.db"))
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		Ok(Self { db })
	}
}

#[async_trait]
impl MetaAdapter for MetaAdapterSqlite {
	// Identities
	//************
	async fn read_identity(&self, id: UserId) -> RdResult<Identity> {
		identity::read(&self.db, id).await
	}

	async fn read_identity_by_token(&self, token: &str) -> RdResult<Identity> {
		identity::read_by_token(&self.db, token).await
	}

	async fn upsert_identity(&self, data: &UpsertIdentity) -> RdResult<()> {
		identity::upsert(&self.db, data).await
	}

	async fn set_opt_out(&self, id: UserId, opted_out: bool) -> RdResult<()> {
		identity::set_opt_out(&self.db, id, opted_out).await
	}

	async fn set_identity_kind(&self, id: UserId, kind: IdentityKind) -> RdResult<()> {
		identity::set_kind(&self.db, id, kind).await
	}

	// Reviews
	//*********
	async fn count_reviews_since(&self, author_id: UserId, since: Timestamp) -> RdResult<u32> {
		review::count_since(&self.db, author_id, since).await
	}

	async fn create_review(&self, data: &NewReview) -> RdResult<ReviewId> {
		review::create(&self.db, data).await
	}

	async fn read_review(&self, review_id: ReviewId) -> RdResult<Review> {
		review::read(&self.db, review_id).await
	}

	async fn delete_review(&self, review_id: ReviewId) -> RdResult<()> {
		review::delete(&self.db, review_id).await
	}

	async fn list_reviews(
		&self,
		target_id: UserId,
		opts: &ListReviewOptions,
	) -> RdResult<Vec<ReviewView>> {
		review::list(&self.db, target_id, opts).await
	}

	// Bans
	//******
	async fn create_ban(&self, data: &NewBan) -> RdResult<BanRecord> {
		ban::create(&self.db, data).await
	}

	async fn read_ban(&self, ban_id: BanId) -> RdResult<BanRecord> {
		ban::read(&self.db, ban_id).await
	}

	// Appeals
	//*********
	async fn create_appeal(&self, user_id: UserId, ban_id: BanId, text: &str) -> RdResult<Appeal> {
		appeal::create(&self.db, user_id, ban_id, text).await
	}

	async fn read_appeal(&self, appeal_id: AppealId) -> RdResult<Appeal> {
		appeal::read(&self.db, appeal_id).await
	}

	async fn resolve_appeal(
		&self,
		appeal_id: AppealId,
		outcome: &AppealOutcome,
	) -> RdResult<Appeal> {
		appeal::resolve(&self.db, appeal_id, outcome).await
	}

	// Audit log
	//***********
	async fn append_audit_log(&self, entry: &AuditLogEntry) -> RdResult<()> {
		audit::append(&self.db, entry).await
	}

	async fn list_audit_log(&self, target_id: UserId) -> RdResult<Vec<AuditLogEntry>> {
		audit::list(&self.db, target_id).await
	}
}

// vim: ts=4
