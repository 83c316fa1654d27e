//! Error type shared by every ReviewDB crate.
//!
//! Variants follow the moderation error taxonomy: policy rejections carry a
//! user-displayable reason, state conflicts are distinct from generic failures
//! so the admin UI can say "already handled", and storage failures collapse
//! into `DbError` after being logged by the adapter.

use axum::{Json, http::StatusCode, response::IntoResponse};

pub type RdResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	// policy
	/// Expected, user-facing rejection with a specific reason
	PolicyRejected(String),

	// authorization
	PermissionDenied,
	Unauthorized,

	// protocol
	Parse,
	ValidationError(String),

	// state conflicts
	AlreadyResolved,
	TargetIsAdmin,
	Conflict(String),
	NotFound,

	// infrastructure
	DbError,
	ServiceUnavailable(String),
	Internal(String),
}

impl Error {
	/// Stable machine-readable code for API responses
	pub fn code(&self) -> &'static str {
		match self {
			Error::PolicyRejected(_) => "E-POLICY",
			Error::PermissionDenied => "E-PERM",
			Error::Unauthorized => "E-AUTH",
			Error::Parse => "E-PARSE",
			Error::ValidationError(_) => "E-VALIDATION",
			Error::AlreadyResolved => "E-RESOLVED",
			Error::TargetIsAdmin => "E-TARGET-ADMIN",
			Error::Conflict(_) => "E-CONFLICT",
			Error::NotFound => "E-NOT-FOUND",
			Error::DbError => "E-DB",
			Error::ServiceUnavailable(_) => "E-UNAVAILABLE",
			Error::Internal(_) => "E-INTERNAL",
		}
	}

	/// True for errors caused by the current state of an entity rather than a failure
	pub fn is_state_conflict(&self) -> bool {
		matches!(
			self,
			Error::AlreadyResolved | Error::TargetIsAdmin | Error::Conflict(_) | Error::NotFound
		)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::PolicyRejected(reason) => write!(f, "{}", reason),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Unauthorized => write!(f, "invalid token"),
			Error::Parse => write!(f, "malformed input"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::AlreadyResolved => write!(f, "this appeal has already been handled"),
			Error::TargetIsAdmin => write!(f, "admins cannot be banned"),
			Error::Conflict(msg) => write!(f, "conflict: {}", msg),
			Error::NotFound => write!(f, "not found"),
			Error::DbError => write!(f, "database error"),
			Error::ServiceUnavailable(msg) => write!(f, "service unavailable: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = match &self {
			Error::PolicyRejected(_) | Error::ValidationError(_) | Error::Parse => {
				StatusCode::BAD_REQUEST
			}
			Error::Unauthorized => StatusCode::UNAUTHORIZED,
			Error::PermissionDenied | Error::TargetIsAdmin => StatusCode::FORBIDDEN,
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::AlreadyResolved | Error::Conflict(_) => StatusCode::CONFLICT,
			Error::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
			Error::DbError | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		};
		// Internal details stay in the logs
		let message = match &self {
			Error::DbError | Error::Internal(_) => "Something went wrong".to_string(),
			other => other.to_string(),
		};
		let body = serde_json::json!({
			"success": false,
			"error": {
				"code": self.code(),
				"message": message,
			}
		});
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
