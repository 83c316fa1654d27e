//! Ban records
//!
//! Bans are never updated or deleted. Issuing a ban inserts a record and
//! repoints the identity at it inside one transaction.

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use reviewdb::meta_adapter::*;
use reviewdb::prelude::*;

pub(crate) async fn create(db: &SqlitePool, ban: &NewBan) -> RdResult<BanRecord> {
	let mut tx = db.begin().await.map_err(db_err)?;
	let created_at = Timestamp::now();

	let ban_id: i64 = sqlx::query(
		"INSERT INTO bans (user_id, review_id, review_content, admin_id, ban_end, created_at)
		VALUES (?, ?, ?, ?, ?, ?)
		RETURNING ban_id",
	)
	.bind(ban.user_id.as_i64())
	.bind(ban.review_id.0)
	.bind(ban.review_content.as_ref())
	.bind(ban.admin_id.map(UserId::as_i64))
	.bind(ban.ban_end.map(|ts| ts.0))
	.bind(created_at.0)
	.fetch_one(&mut *tx)
	.await
	.map_err(db_err)?
	.try_get("ban_id")
	.map_err(db_err)?;

	let res = sqlx::query(
		"UPDATE identities SET ban_id=?,
			kind=CASE WHEN ? THEN 'B' ELSE kind END
		WHERE user_id=? AND kind!='A'",
	)
	.bind(ban_id)
	.bind(ban.ban_end.is_none())
	.bind(ban.user_id.as_i64())
	.execute(&mut *tx)
	.await
	.map_err(db_err)?;

	if res.rows_affected() == 0 {
		// Dropping the transaction rolls back the inserted record
		let exists = sqlx::query("SELECT 1 FROM identities WHERE user_id=?")
			.bind(ban.user_id.as_i64())
			.fetch_optional(&mut *tx)
			.await
			.map_err(db_err)?
			.is_some();
		return Err(if exists { Error::TargetIsAdmin } else { Error::NotFound });
	}

	tx.commit().await.map_err(db_err)?;

	Ok(BanRecord {
		ban_id: BanId(ban_id),
		user_id: ban.user_id,
		review_id: ban.review_id,
		review_content: ban.review_content.clone(),
		admin_id: ban.admin_id,
		ban_end: ban.ban_end,
		created_at,
	})
}

pub(crate) async fn read(db: &SqlitePool, ban_id: BanId) -> RdResult<BanRecord> {
	let res = sqlx::query(
		"SELECT ban_id, user_id, review_id, review_content, admin_id, ban_end, created_at
		FROM bans WHERE ban_id=?",
	)
	.bind(ban_id.0)
	.fetch_one(db)
	.await;

	map_res(res, |row| {
		Ok(BanRecord {
			ban_id: BanId(row.try_get("ban_id")?),
			user_id: UserId::from_i64(row.try_get("user_id")?),
			review_id: ReviewId(row.try_get("review_id")?),
			review_content: row.try_get("review_content")?,
			admin_id: row.try_get::<Option<i64>, _>("admin_id")?.map(UserId::from_i64),
			ban_end: opt_ts(row.try_get("ban_end")?),
			created_at: Timestamp(row.try_get("created_at")?),
		})
	})
}

// vim: ts=4
