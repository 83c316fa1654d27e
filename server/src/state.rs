//! Server state shared by all handlers

use std::sync::Arc;

use reviewdb_admin::SignatureVerifier;

use crate::oauth::OAuthExchange;
use crate::prelude::*;

#[derive(Clone)]
pub struct ServerState {
	pub app: App,
	/// `None` disables the interaction endpoint
	pub verifier: Option<Arc<dyn SignatureVerifier>>,
	pub oauth: Arc<dyn OAuthExchange>,
	pub redirect_uri: Option<Box<str>>,
}

pub type Server = Arc<ServerState>;

// vim: ts=4
