//! Database schema initialization

use sqlx::SqlitePool;

/// Create all tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Identities
	//************
	// kind: N=normal, A=admin, B=permanently banned, S=system
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS identities (
		user_id integer NOT NULL,
		name text NOT NULL,
		avatar text,
		kind char(1) NOT NULL DEFAULT 'N',
		opted_out integer NOT NULL DEFAULT 0,
		ban_id integer,
		token text,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE UNIQUE INDEX IF NOT EXISTS idx_identities_token ON identities(token) WHERE token NOT NULL",
	)
	.execute(&mut *tx)
	.await?;

	// Reviews
	//*********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS reviews (
		review_id integer PRIMARY KEY AUTOINCREMENT,
		author_id integer NOT NULL,
		target_id integer NOT NULL,
		comment text NOT NULL,
		type integer NOT NULL DEFAULT 0,
		created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE UNIQUE INDEX IF NOT EXISTS idx_reviews_author_target ON reviews(author_id, target_id)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_reviews_target ON reviews(target_id, created_at)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_reviews_author_created ON reviews(author_id, created_at)",
	)
	.execute(&mut *tx)
	.await?;

	// Bans
	//******
	// ban_end NULL means permanent
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS bans (
		ban_id integer PRIMARY KEY AUTOINCREMENT,
		user_id integer NOT NULL,
		review_id integer NOT NULL,
		review_content text NOT NULL,
		admin_id integer,
		ban_end datetime,
		created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_bans_user ON bans(user_id)")
		.execute(&mut *tx)
		.await?;

	// Appeals
	//*********
	// outcome: A=accepted, D=denied
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS appeals (
		appeal_id integer PRIMARY KEY AUTOINCREMENT,
		user_id integer NOT NULL,
		ban_id integer NOT NULL,
		text text NOT NULL,
		action_taken integer NOT NULL DEFAULT 0,
		outcome char(1),
		deny_reason text,
		created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;
	// At most one open appeal per user and ban
	sqlx::query(
		"CREATE UNIQUE INDEX IF NOT EXISTS idx_appeals_open ON appeals(user_id, ban_id) WHERE action_taken=0",
	)
	.execute(&mut *tx)
	.await?;

	// Audit log
	//***********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS audit_log (
		log_id integer PRIMARY KEY AUTOINCREMENT,
		action text NOT NULL,
		review_id integer NOT NULL DEFAULT 0,
		target_id integer NOT NULL,
		admin_id integer NOT NULL DEFAULT 0,
		comment text NOT NULL DEFAULT '',
		created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_audit_log_target ON audit_log(target_id)")
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;
	Ok(())
}

// vim: ts=4
