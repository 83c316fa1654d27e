//! Review storage

use sqlx::{Row, SqlitePool};

use crate::identity::kind_from_db;
use crate::utils::*;
use reviewdb::meta_adapter::*;
use reviewdb::prelude::*;

fn review_type(v: u8) -> Result<ReviewType, sqlx::Error> {
	ReviewType::try_from(v).map_err(|_| sqlx::Error::ColumnDecode {
		index: "type".into(),
		source: "unknown review type".into(),
	})
}

pub(crate) async fn count_since(db: &SqlitePool, author_id: UserId, since: Timestamp) -> RdResult<u32> {
	let res = sqlx::query("SELECT count(*) AS cnt FROM reviews WHERE author_id=? AND created_at>=?")
		.bind(author_id.as_i64())
		.bind(since.0)
		.fetch_one(db)
		.await;

	map_res(res, |row| row.try_get::<u32, _>("cnt"))
}

/// Insert, replacing the author's earlier review of the same target
pub(crate) async fn create(db: &SqlitePool, review: &NewReview) -> RdResult<ReviewId> {
	let res = sqlx::query(
		"INSERT INTO reviews (author_id, target_id, comment, type, created_at)
		VALUES (?, ?, ?, ?, ?)
		ON CONFLICT(author_id, target_id) DO UPDATE SET
			comment=excluded.comment,
			type=excluded.type,
			created_at=excluded.created_at
		RETURNING review_id",
	)
	.bind(review.author_id.as_i64())
	.bind(review.target_id.as_i64())
	.bind(review.comment.as_ref())
	.bind(u8::from(review.typ))
	.bind(Timestamp::now().0)
	.fetch_one(db)
	.await;

	map_res(res, |row| row.try_get("review_id").map(ReviewId))
}

pub(crate) async fn read(db: &SqlitePool, review_id: ReviewId) -> RdResult<Review> {
	let res = sqlx::query(
		"SELECT review_id, author_id, target_id, comment, type, created_at FROM reviews WHERE review_id=?",
	)
	.bind(review_id.0)
	.fetch_one(db)
	.await;

	map_res(res, |row| {
		Ok(Review {
			review_id: ReviewId(row.try_get("review_id")?),
			author_id: UserId::from_i64(row.try_get("author_id")?),
			target_id: UserId::from_i64(row.try_get("target_id")?),
			comment: row.try_get("comment")?,
			typ: review_type(row.try_get("type")?)?,
			created_at: Timestamp(row.try_get("created_at")?),
		})
	})
}

pub(crate) async fn delete(db: &SqlitePool, review_id: ReviewId) -> RdResult<()> {
	let res = sqlx::query("DELETE FROM reviews WHERE review_id=?")
		.bind(review_id.0)
		.execute(db)
		.await
		.map_err(db_err)?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

/// Reviews of a target, newest first, with author display info
pub(crate) async fn list(
	db: &SqlitePool,
	target_id: UserId,
	opts: &ListReviewOptions,
) -> RdResult<Vec<ReviewView>> {
	let rows = sqlx::query(
		"SELECT r.review_id, r.target_id, r.comment, r.type, r.created_at,
			r.author_id, i.name, i.avatar, i.kind
		FROM reviews r
		LEFT JOIN identities i ON i.user_id=r.author_id
		WHERE r.target_id=?
		ORDER BY r.created_at DESC, r.review_id DESC
		LIMIT ? OFFSET ?",
	)
	.bind(target_id.as_i64())
	.bind(opts.limit)
	.bind(opts.offset)
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	collect_res(rows.iter().map(|row| {
		let author_id = UserId::from_i64(row.try_get("author_id")?);
		let name: Option<Box<str>> = row.try_get("name")?;
		let kind: Option<&str> = row.try_get("kind")?;
		Ok(ReviewView {
			id: ReviewId(row.try_get("review_id")?),
			target_id: UserId::from_i64(row.try_get("target_id")?),
			comment: row.try_get("comment")?,
			typ: review_type(row.try_get("type")?)?,
			timestamp: Timestamp(row.try_get("created_at")?),
			sender: ProfileInfo {
				id: author_id,
				name: name.unwrap_or_else(|| author_id.to_string().into()),
				avatar: row.try_get("avatar")?,
				kind: kind.map_or(Ok(IdentityKind::Normal), kind_from_db)?,
			},
		})
	}))
}

// vim: ts=4
