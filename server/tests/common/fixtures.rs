//! Identities, keys and interaction payloads shared by the tests

use ed25519_dalek::{Signer, SigningKey};
use serde_json::{Value, json};

use reviewdb_core::prelude::*;
use reviewdb_types::meta_adapter::{IdentityKind, MetaAdapter, UpsertIdentity};

use super::adapters::TestServer;

pub const ADMIN: u64 = 900;
pub const ADMIN_TOKEN: &str = "admin-token";

const SIGNING_KEY: [u8; 32] = [7u8; 32];
const TIMESTAMP: &str = "1700000000";

pub fn public_key_hex() -> String {
	hex::encode(SigningKey::from_bytes(&SIGNING_KEY).verifying_key().as_bytes())
}

/// Signature and timestamp headers for a body
pub fn sign(body: &[u8]) -> (String, String) {
	let key = SigningKey::from_bytes(&SIGNING_KEY);
	let sig = key.sign(&[TIMESTAMP.as_bytes(), body].concat());
	(hex::encode(sig.to_bytes()), TIMESTAMP.to_string())
}

pub fn token_of(id: u64) -> String {
	format!("token-{}", id)
}

/// Normal identity with token `token-<id>`
pub async fn add_user(ts: &TestServer, id: u64) -> String {
	let token = token_of(id);
	ts.adapter
		.upsert_identity(&UpsertIdentity {
			id: UserId(id),
			name: format!("user{}", id).into(),
			avatar: None,
			token: Some(token.clone().into()),
		})
		.await
		.unwrap();
	token
}

pub async fn add_admin(ts: &TestServer) -> String {
	ts.adapter
		.upsert_identity(&UpsertIdentity {
			id: UserId(ADMIN),
			name: "admin".into(),
			avatar: None,
			token: Some(ADMIN_TOKEN.into()),
		})
		.await
		.unwrap();
	ts.adapter.set_identity_kind(UserId(ADMIN), IdentityKind::Admin).await.unwrap();
	ADMIN_TOKEN.to_string()
}

pub fn ping() -> Value {
	json!({ "type": 1 })
}

/// Button or select menu click by `invoker`
pub fn component(custom_id: &str, invoker: u64, values: &[&str]) -> Value {
	json!({
		"type": 3,
		"data": { "custom_id": custom_id, "component_type": 2, "values": values },
		"member": { "user": { "id": invoker.to_string(), "username": "someone" } }
	})
}

/// Modal submission with a single `reason` field
pub fn modal(custom_id: &str, invoker: u64, reason: &str) -> Value {
	json!({
		"type": 5,
		"data": {
			"custom_id": custom_id,
			"components": [{
				"type": 1,
				"components": [{ "type": 4, "custom_id": "reason", "value": reason }]
			}]
		},
		"member": { "user": { "id": invoker.to_string() } }
	})
}
