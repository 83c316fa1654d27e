//! Request extractors

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::prelude::*;

// Token //
//*******//
/// Client token from the `Authorization` header (raw or `Bearer`)
#[derive(Debug, Clone)]
pub struct Token(pub Box<str>);

impl<S> FromRequestParts<S> for Token
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let value = parts
			.headers
			.get(header::AUTHORIZATION)
			.and_then(|v| v.to_str().ok())
			.map(str::trim)
			.unwrap_or_default();
		let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
		if token.is_empty() {
			return Err(Error::Unauthorized);
		}
		Ok(Token(token.into()))
	}
}

// vim: ts=4
