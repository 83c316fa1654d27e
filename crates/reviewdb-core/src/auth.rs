//! Token resolution for review clients
//!
//! Two parallel authorization paths exist for destructive operations: the
//! identity-based admin check and the static operator token.

use reviewdb_types::meta_adapter::Identity;

use crate::prelude::*;

/// Who is performing an operation
#[derive(Clone, Debug)]
pub enum Actor {
	Identity(Identity),
	/// Holder of the static operator credential
	Operator,
}

impl Actor {
	/// Id recorded in the audit log (0 for the operator)
	pub fn audit_id(&self) -> UserId {
		match self {
			Actor::Identity(ident) => ident.id,
			Actor::Operator => reviewdb_types::types::SYSTEM_USER,
		}
	}

	pub fn is_admin(&self) -> bool {
		match self {
			Actor::Identity(ident) => ident.is_admin(),
			Actor::Operator => true,
		}
	}
}

/// Resolve a client token to its identity
pub async fn authenticate(app: &App, token: &str) -> RdResult<Identity> {
	if token.is_empty() {
		return Err(Error::Unauthorized);
	}
	match app.meta_adapter.read_identity_by_token(token).await {
		Ok(ident) => Ok(ident),
		Err(Error::NotFound) => Err(Error::Unauthorized),
		Err(err) => Err(err),
	}
}

/// Resolve a token that may also be the operator credential
pub async fn resolve_actor(app: &App, token: &str) -> RdResult<Actor> {
	if app.is_operator_token(token) {
		info!("Operator token used");
		return Ok(Actor::Operator);
	}
	Ok(Actor::Identity(authenticate(app, token).await?))
}

// vim: ts=4
