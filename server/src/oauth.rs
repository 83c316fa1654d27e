//! OAuth login collaborator
//!
//! The code exchange with the platform is a pluggable capability. Only the
//! disabled implementation ships here; deployments provide their own.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

/// Account data returned by the platform after a successful exchange
#[derive(Clone, Debug)]
pub struct ExternalUser {
	pub id: UserId,
	pub name: Box<str>,
	pub avatar: Option<Box<str>>,
}

#[async_trait]
pub trait OAuthExchange: Debug + Send + Sync {
	/// Trade an authorization code for an access token
	async fn exchange_code(&self, code: &str, redirect_uri: &str) -> RdResult<Box<str>>;
	async fn fetch_user(&self, access_token: &str) -> RdResult<ExternalUser>;
}

#[derive(Debug, Default)]
pub struct DisabledOAuth;

#[async_trait]
impl OAuthExchange for DisabledOAuth {
	async fn exchange_code(&self, _code: &str, _redirect_uri: &str) -> RdResult<Box<str>> {
		Err(Error::ServiceUnavailable("login is not configured".into()))
	}

	async fn fetch_user(&self, _access_token: &str) -> RdResult<ExternalUser> {
		Err(Error::ServiceUnavailable("login is not configured".into()))
	}
}

// vim: ts=4
