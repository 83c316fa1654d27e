//! Appeals
//!
//! Both the "one open appeal per ban" rule and "resolve exactly once" are
//! enforced by the database, not by read-then-write checks.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::utils::*;
use reviewdb::meta_adapter::*;
use reviewdb::prelude::*;

const APPEAL_COLUMNS: &str =
	"appeal_id, user_id, ban_id, text, action_taken, outcome, deny_reason, created_at";

fn from_row(row: &SqliteRow) -> Result<Appeal, sqlx::Error> {
	let outcome = match row.try_get::<Option<&str>, _>("outcome")? {
		Some("A") => Some(AppealOutcome::Accepted),
		Some("D") => Some(AppealOutcome::Denied { reason: row.try_get("deny_reason")? }),
		Some(_) => {
			return Err(sqlx::Error::ColumnDecode {
				index: "outcome".into(),
				source: "unknown appeal outcome".into(),
			});
		}
		None => None,
	};

	Ok(Appeal {
		appeal_id: AppealId(row.try_get("appeal_id")?),
		user_id: UserId::from_i64(row.try_get("user_id")?),
		ban_id: BanId(row.try_get("ban_id")?),
		text: row.try_get("text")?,
		action_taken: row.try_get("action_taken")?,
		outcome,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create(
	db: &SqlitePool,
	user_id: UserId,
	ban_id: BanId,
	text: &str,
) -> RdResult<Appeal> {
	let res = sqlx::query(&format!(
		"INSERT INTO appeals (user_id, ban_id, text, created_at) VALUES (?, ?, ?, ?)
		RETURNING {}",
		APPEAL_COLUMNS
	))
	.bind(user_id.as_i64())
	.bind(ban_id.0)
	.bind(text)
	.bind(Timestamp::now().0)
	.fetch_one(db)
	.await;

	match res {
		Err(err) if is_unique_violation(&err) => {
			Err(Error::Conflict("an appeal for this ban is already pending".into()))
		}
		res => map_res(res, |row| from_row(&row)),
	}
}

pub(crate) async fn read(db: &SqlitePool, appeal_id: AppealId) -> RdResult<Appeal> {
	let res = sqlx::query(&format!("SELECT {} FROM appeals WHERE appeal_id=?", APPEAL_COLUMNS))
		.bind(appeal_id.0)
		.fetch_one(db)
		.await;

	map_res(res, |row| from_row(&row))
}

pub(crate) async fn resolve(
	db: &SqlitePool,
	appeal_id: AppealId,
	outcome: &AppealOutcome,
) -> RdResult<Appeal> {
	let (code, reason) = match outcome {
		AppealOutcome::Accepted => ("A", None),
		AppealOutcome::Denied { reason } => ("D", reason.as_deref()),
	};

	let mut tx = db.begin().await.map_err(db_err)?;

	let res = sqlx::query(&format!(
		"UPDATE appeals SET action_taken=1, outcome=?, deny_reason=?
		WHERE appeal_id=? AND action_taken=0
		RETURNING {}",
		APPEAL_COLUMNS
	))
	.bind(code)
	.bind(reason)
	.bind(appeal_id.0)
	.fetch_optional(&mut *tx)
	.await
	.map_err(db_err)?;

	let Some(row) = res else {
		let exists = sqlx::query("SELECT 1 FROM appeals WHERE appeal_id=?")
			.bind(appeal_id.0)
			.fetch_optional(&mut *tx)
			.await
			.map_err(db_err)?
			.is_some();
		return Err(if exists { Error::AlreadyResolved } else { Error::NotFound });
	};
	let appeal = from_row(&row).map_err(db_err)?;

	if *outcome == AppealOutcome::Accepted {
		// Only lift the ban the appeal was filed against, not a newer one
		sqlx::query(
			"UPDATE identities SET ban_id=NULL,
				kind=CASE WHEN kind='B' THEN 'N' ELSE kind END
			WHERE user_id=? AND ban_id=?",
		)
		.bind(appeal.user_id.as_i64())
		.bind(appeal.ban_id.0)
		.execute(&mut *tx)
		.await
		.map_err(db_err)?;
	}

	tx.commit().await.map_err(db_err)?;
	Ok(appeal)
}

// vim: ts=4
