//! Append-only audit log

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use reviewdb::meta_adapter::*;
use reviewdb::prelude::*;

pub(crate) async fn append(db: &SqlitePool, entry: &AuditLogEntry) -> RdResult<()> {
	sqlx::query(
		"INSERT INTO audit_log (action, review_id, target_id, admin_id, comment, created_at)
		VALUES (?, ?, ?, ?, ?, ?)",
	)
	.bind(entry.action.as_str())
	.bind(entry.review_id.0)
	.bind(entry.target_id.as_i64())
	.bind(entry.admin_id.as_i64())
	.bind(entry.comment.as_ref())
	.bind(entry.created_at.0)
	.execute(db)
	.await
	.map_err(db_err)?;

	Ok(())
}

/// Entries concerning a target, oldest first
pub(crate) async fn list(db: &SqlitePool, target_id: UserId) -> RdResult<Vec<AuditLogEntry>> {
	let rows = sqlx::query(
		"SELECT action, review_id, target_id, admin_id, comment, created_at
		FROM audit_log WHERE target_id=? ORDER BY log_id",
	)
	.bind(target_id.as_i64())
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	collect_res(rows.iter().map(|row| {
		let action: &str = row.try_get("action")?;
		Ok(AuditLogEntry {
			action: AuditAction::parse(action).ok_or_else(|| sqlx::Error::ColumnDecode {
				index: "action".into(),
				source: "unknown audit action".into(),
			})?,
			review_id: ReviewId(row.try_get("review_id")?),
			target_id: UserId::from_i64(row.try_get("target_id")?),
			admin_id: UserId::from_i64(row.try_get("admin_id")?),
			comment: row.try_get("comment")?,
			created_at: Timestamp(row.try_get("created_at")?),
		})
	}))
}

// vim: ts=4
