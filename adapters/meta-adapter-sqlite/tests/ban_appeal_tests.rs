//! Ban, appeal and audit log storage tests

use std::sync::Arc;

use reviewdb::meta_adapter::{
	AppealOutcome, AuditAction, AuditLogEntry, IdentityKind, MetaAdapter, NewBan, UpsertIdentity,
};
use reviewdb::prelude::*;
use reviewdb_meta_adapter_sqlite::MetaAdapterSqlite;
use tempfile::TempDir;

async fn create_test_adapter() -> (MetaAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = MetaAdapterSqlite::new(temp_dir.path()).await.expect("Failed to create adapter");
	(adapter, temp_dir)
}

async fn add_identity(adapter: &MetaAdapterSqlite, id: u64) {
	adapter
		.upsert_identity(&UpsertIdentity {
			id: UserId(id),
			name: format!("user{}", id).into(),
			avatar: None,
			token: None,
		})
		.await
		.expect("Failed to upsert identity");
}

fn new_ban(user: u64, ban_end: Option<Timestamp>) -> NewBan {
	NewBan {
		user_id: UserId(user),
		review_id: ReviewId(77),
		review_content: "the offending review".into(),
		admin_id: Some(UserId(900)),
		ban_end,
	}
}

#[tokio::test]
async fn test_time_ban_sets_current_record() {
	let (adapter, _temp) = create_test_adapter().await;
	add_identity(&adapter, 1).await;
	let end = Timestamp::now().add_days(7);

	let ban = adapter.create_ban(&new_ban(1, Some(end))).await.unwrap();
	let ident = adapter.read_identity(UserId(1)).await.unwrap();

	assert_eq!(ident.kind, IdentityKind::Normal);
	let current = ident.ban.as_ref().expect("ban record");
	assert_eq!(current.ban_id, ban.ban_id);
	assert_eq!(current.ban_end, Some(end));
	assert_eq!(&*current.review_content, "the offending review");
	assert!(ident.is_blocked(Timestamp::now()));
}

#[tokio::test]
async fn test_permanent_ban_sets_kind() {
	let (adapter, _temp) = create_test_adapter().await;
	add_identity(&adapter, 1).await;

	adapter.create_ban(&new_ban(1, None)).await.unwrap();
	let ident = adapter.read_identity(UserId(1)).await.unwrap();
	assert_eq!(ident.kind, IdentityKind::Banned);
}

#[tokio::test]
async fn test_admin_cannot_be_banned() {
	let (adapter, _temp) = create_test_adapter().await;
	adapter.set_identity_kind(UserId(1), IdentityKind::Admin).await.unwrap();

	let res = adapter.create_ban(&new_ban(1, None)).await;
	assert!(matches!(res, Err(Error::TargetIsAdmin)));

	let ident = adapter.read_identity(UserId(1)).await.unwrap();
	assert_eq!(ident.kind, IdentityKind::Admin);
	assert!(ident.ban.is_none());
	// The record insert was rolled back
	assert!(matches!(adapter.read_ban(BanId(1)).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_ban_unknown_identity() {
	let (adapter, _temp) = create_test_adapter().await;
	assert!(matches!(adapter.create_ban(&new_ban(5, None)).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_one_open_appeal_per_ban() {
	let (adapter, _temp) = create_test_adapter().await;
	add_identity(&adapter, 1).await;
	let ban = adapter.create_ban(&new_ban(1, None)).await.unwrap();

	let appeal = adapter.create_appeal(UserId(1), ban.ban_id, "please").await.unwrap();
	assert!(!appeal.action_taken);
	assert!(matches!(
		adapter.create_appeal(UserId(1), ban.ban_id, "again").await,
		Err(Error::Conflict(_))
	));

	// Once resolved a new appeal may be filed
	adapter
		.resolve_appeal(appeal.appeal_id, &AppealOutcome::Denied { reason: None })
		.await
		.unwrap();
	assert!(adapter.create_appeal(UserId(1), ban.ban_id, "third time").await.is_ok());
}

#[tokio::test]
async fn test_accept_lifts_ban() {
	let (adapter, _temp) = create_test_adapter().await;
	add_identity(&adapter, 1).await;
	let ban = adapter.create_ban(&new_ban(1, None)).await.unwrap();
	let appeal = adapter.create_appeal(UserId(1), ban.ban_id, "sorry").await.unwrap();

	let resolved = adapter.resolve_appeal(appeal.appeal_id, &AppealOutcome::Accepted).await.unwrap();
	assert!(resolved.action_taken);
	assert_eq!(resolved.outcome, Some(AppealOutcome::Accepted));

	let ident = adapter.read_identity(UserId(1)).await.unwrap();
	assert_eq!(ident.kind, IdentityKind::Normal);
	assert!(ident.ban.is_none());
	// History is kept
	assert!(adapter.read_ban(ban.ban_id).await.is_ok());
}

#[tokio::test]
async fn test_deny_keeps_ban_and_second_resolve_fails() {
	let (adapter, _temp) = create_test_adapter().await;
	add_identity(&adapter, 1).await;
	let ban = adapter.create_ban(&new_ban(1, None)).await.unwrap();
	let appeal = adapter.create_appeal(UserId(1), ban.ban_id, "sorry").await.unwrap();

	let denied = AppealOutcome::Denied { reason: Some("no".into()) };
	adapter.resolve_appeal(appeal.appeal_id, &denied).await.unwrap();

	let second = adapter.resolve_appeal(appeal.appeal_id, &AppealOutcome::Accepted).await;
	assert!(matches!(second, Err(Error::AlreadyResolved)));

	let stored = adapter.read_appeal(appeal.appeal_id).await.unwrap();
	assert_eq!(stored.outcome, Some(denied));
	assert_eq!(adapter.read_identity(UserId(1)).await.unwrap().kind, IdentityKind::Banned);

	assert!(matches!(
		adapter.resolve_appeal(AppealId(999), &AppealOutcome::Accepted).await,
		Err(Error::NotFound)
	));
}

#[tokio::test]
async fn test_accepting_old_appeal_keeps_newer_ban() {
	let (adapter, _temp) = create_test_adapter().await;
	add_identity(&adapter, 1).await;
	let old = adapter.create_ban(&new_ban(1, Some(Timestamp::now().add_days(1)))).await.unwrap();
	let appeal = adapter.create_appeal(UserId(1), old.ban_id, "sorry").await.unwrap();
	let newer = adapter.create_ban(&new_ban(1, Some(Timestamp::now().add_days(30)))).await.unwrap();

	adapter.resolve_appeal(appeal.appeal_id, &AppealOutcome::Accepted).await.unwrap();
	let ident = adapter.read_identity(UserId(1)).await.unwrap();
	assert_eq!(ident.ban.map(|b| b.ban_id), Some(newer.ban_id));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_accept_resolves_once() {
	let (adapter, _temp) = create_test_adapter().await;
	add_identity(&adapter, 1).await;
	let ban = adapter.create_ban(&new_ban(1, None)).await.unwrap();
	let appeal = adapter.create_appeal(UserId(1), ban.ban_id, "sorry").await.unwrap();

	let adapter = Arc::new(adapter);
	let tasks: Vec<_> = (0..2)
		.map(|_| {
			let adapter = adapter.clone();
			let id = appeal.appeal_id;
			tokio::spawn(async move { adapter.resolve_appeal(id, &AppealOutcome::Accepted).await })
		})
		.collect();

	let mut ok = 0;
	let mut already = 0;
	for task in tasks {
		match task.await.unwrap() {
			Ok(_) => ok += 1,
			Err(Error::AlreadyResolved) => already += 1,
			Err(err) => panic!("unexpected error: {}", err),
		}
	}
	assert_eq!((ok, already), (1, 1));
}

#[tokio::test]
async fn test_audit_log_append_and_list() {
	let (adapter, _temp) = create_test_adapter().await;
	for (action, review) in [(AuditAction::Ban, 0), (AuditAction::Delete, 77)] {
		adapter
			.append_audit_log(&AuditLogEntry {
				action,
				review_id: ReviewId(review),
				target_id: UserId(5),
				admin_id: UserId(900),
				comment: "snapshot".into(),
				created_at: Timestamp::now(),
			})
			.await
			.unwrap();
	}

	let entries = adapter.list_audit_log(UserId(5)).await.unwrap();
	let actions: Vec<_> = entries.iter().map(|e| e.action).collect();
	assert_eq!(actions, [AuditAction::Ban, AuditAction::Delete]);
	assert_eq!(entries[1].review_id, ReviewId(77));
	assert!(adapter.list_audit_log(UserId(6)).await.unwrap().is_empty());
}

// vim: ts=4
