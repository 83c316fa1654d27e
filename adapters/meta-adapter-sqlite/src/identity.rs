//! Identity operations
//!
//! An identity row points at its current ban, if any. Reads always join the
//! ban record so callers can tell whether the identity is blocked.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::utils::*;
use reviewdb::meta_adapter::*;
use reviewdb::prelude::*;

pub(crate) const IDENTITY_COLUMNS: &str = "i.user_id, i.name, i.avatar, i.kind, i.opted_out,
	b.ban_id, b.review_id AS ban_review_id, b.review_content, b.admin_id, b.ban_end,
	b.created_at AS ban_created_at";

pub(crate) fn kind_to_db(kind: IdentityKind) -> &'static str {
	match kind {
		IdentityKind::Normal => "N",
		IdentityKind::Admin => "A",
		IdentityKind::Banned => "B",
		IdentityKind::System => "S",
	}
}

pub(crate) fn kind_from_db(kind: &str) -> Result<IdentityKind, sqlx::Error> {
	match kind {
		"N" => Ok(IdentityKind::Normal),
		"A" => Ok(IdentityKind::Admin),
		"B" => Ok(IdentityKind::Banned),
		"S" => Ok(IdentityKind::System),
		_ => Err(sqlx::Error::ColumnDecode {
			index: "kind".into(),
			source: "unknown identity kind".into(),
		}),
	}
}

fn from_row(row: &SqliteRow) -> Result<Identity, sqlx::Error> {
	let id = UserId::from_i64(row.try_get("user_id")?);
	let ban = match row.try_get::<Option<i64>, _>("ban_id")? {
		Some(ban_id) => Some(BanRecord {
			ban_id: BanId(ban_id),
			user_id: id,
			review_id: ReviewId(row.try_get("ban_review_id")?),
			review_content: row.try_get("review_content")?,
			admin_id: row.try_get::<Option<i64>, _>("admin_id")?.map(UserId::from_i64),
			ban_end: opt_ts(row.try_get("ban_end")?),
			created_at: Timestamp(row.try_get("ban_created_at")?),
		}),
		None => None,
	};

	Ok(Identity {
		id,
		name: row.try_get("name")?,
		avatar: row.try_get("avatar")?,
		kind: kind_from_db(row.try_get("kind")?)?,
		opted_out: row.try_get("opted_out")?,
		ban,
	})
}

pub(crate) async fn read(db: &SqlitePool, id: UserId) -> RdResult<Identity> {
	let res = sqlx::query(&format!(
		"SELECT {} FROM identities i LEFT JOIN bans b ON b.ban_id=i.ban_id WHERE i.user_id=?",
		IDENTITY_COLUMNS
	))
	.bind(id.as_i64())
	.fetch_one(db)
	.await;

	map_res(res, |row| from_row(&row))
}

pub(crate) async fn read_by_token(db: &SqlitePool, token: &str) -> RdResult<Identity> {
	let res = sqlx::query(&format!(
		"SELECT {} FROM identities i LEFT JOIN bans b ON b.ban_id=i.ban_id WHERE i.token=?",
		IDENTITY_COLUMNS
	))
	.bind(token)
	.fetch_one(db)
	.await;

	map_res(res, |row| from_row(&row))
}

pub(crate) async fn upsert(db: &SqlitePool, data: &UpsertIdentity) -> RdResult<()> {
	sqlx::query(
		"INSERT INTO identities (user_id, name, avatar, token, created_at)
		VALUES (?, ?, ?, ?, unixepoch())
		ON CONFLICT(user_id) DO UPDATE SET
			name=excluded.name,
			avatar=excluded.avatar,
			token=COALESCE(excluded.token, identities.token)",
	)
	.bind(data.id.as_i64())
	.bind(data.name.as_ref())
	.bind(data.avatar.as_deref())
	.bind(data.token.as_deref())
	.execute(db)
	.await
	.map_err(db_err)?;

	Ok(())
}

pub(crate) async fn set_opt_out(db: &SqlitePool, id: UserId, opted_out: bool) -> RdResult<()> {
	let res = sqlx::query("UPDATE identities SET opted_out=? WHERE user_id=?")
		.bind(opted_out)
		.bind(id.as_i64())
		.execute(db)
		.await
		.map_err(db_err)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

pub(crate) async fn set_kind(db: &SqlitePool, id: UserId, kind: IdentityKind) -> RdResult<()> {
	sqlx::query(
		"INSERT INTO identities (user_id, name, kind, created_at)
		VALUES (?, ?, ?, unixepoch())
		ON CONFLICT(user_id) DO UPDATE SET kind=excluded.kind",
	)
	.bind(id.as_i64())
	.bind(id.to_string())
	.bind(kind_to_db(kind))
	.execute(db)
	.await
	.map_err(db_err)?;

	Ok(())
}

// vim: ts=4
