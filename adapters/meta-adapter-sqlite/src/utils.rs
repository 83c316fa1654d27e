//! Shared helpers for the SQLite adapter
//!
//! Error mapping used across all domain modules.

use reviewdb::prelude::*;
use sqlx::sqlite::SqliteRow;

/// Log database error for debugging
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Log and collapse into `DbError`
pub(crate) fn db_err(err: sqlx::Error) -> Error {
	inspect(&err);
	Error::DbError
}

/// Map a single-row query result, translating SQL errors to RdResult
pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> RdResult<T>
where
	F: FnOnce(SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(row) => f(row).inspect_err(inspect).map_err(|_| Error::DbError),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => Err(db_err(err)),
	}
}

/// Collect an iterator of query results, translating errors
pub(crate) fn collect_res<T>(
	iter: impl Iterator<Item = Result<T, sqlx::Error>> + Unpin,
) -> RdResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
	err.as_database_error().is_some_and(|e| e.is_unique_violation())
}

pub(crate) fn opt_ts(v: Option<i64>) -> Option<Timestamp> {
	v.map(Timestamp)
}

// vim: ts=4
