use std::sync::Arc;

use reviewdb::config::Config;
use reviewdb::oauth::DisabledOAuth;
use reviewdb::webhook::WebhookNotifier;
use reviewdb::{ServerState, routes};
use reviewdb_admin::{Ed25519Verifier, SignatureVerifier};
use reviewdb_core::detect::ProfanityFilter;
use reviewdb_core::prelude::*;
use reviewdb_core::{AppBuilder, ModerationConfig};
use reviewdb_meta_adapter_sqlite::MetaAdapterSqlite;
use reviewdb_types::meta_adapter::{IdentityKind, MetaAdapter};

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.init();

	if let Err(err) = run().await {
		error!("FATAL: {}", err);
		std::process::exit(1);
	}
}

async fn run() -> RdResult<()> {
	if rustls::crypto::aws_lc_rs::default_provider().install_default().is_err() {
		warn!("Crypto provider already installed");
	}

	let config = Config::from_env()?;
	info!(version = reviewdb_core::app::VERSION, listen = %config.listen, "Starting ReviewDB");

	let meta_adapter = Arc::new(MetaAdapterSqlite::new(&config.db_dir).await?);
	for id in &config.admin_ids {
		meta_adapter.set_identity_kind(*id, IdentityKind::Admin).await?;
		info!(subject = %id, "Admin provisioned");
	}

	let mut moderation = ModerationConfig::default();
	if let Some((light, strong)) = &config.word_lists {
		moderation.profanity = ProfanityFilter::from_files(light, strong).await?;
	}

	let mut builder = AppBuilder::new();
	builder.meta_adapter(meta_adapter).config(moderation);
	if let Some(token) = &config.admin_token {
		builder.admin_token(token.clone());
	}
	if !config.webhooks.is_empty() {
		builder.notifier(Arc::new(WebhookNotifier::new(config.webhooks.clone())?));
	}
	let app = builder.build()?;

	let verifier = match &config.discord_public_key {
		Some(key) => Some(Arc::new(Ed25519Verifier::from_hex(key)?) as Arc<dyn SignatureVerifier>),
		None => {
			warn!("DISCORD_PUBLIC_KEY not set, interaction endpoint disabled");
			None
		}
	};
	if config.oauth.is_some() {
		warn!("No OAuth exchange available in this build, login stays disabled");
	}

	let srv = Arc::new(ServerState {
		app,
		verifier,
		oauth: Arc::new(DisabledOAuth),
		redirect_uri: config.oauth.as_ref().map(|o| o.redirect_uri.clone()),
	});

	let listener = tokio::net::TcpListener::bind(config.listen.as_ref()).await.map_err(|err| {
		error!(listen = %config.listen, error = %err, "Cannot bind listener");
		Error::ServiceUnavailable(format!("cannot bind {}", config.listen))
	})?;
	info!("Listening on {}", config.listen);
	axum::serve(listener, routes::init(srv))
		.await
		.map_err(|err| Error::Internal(format!("server error: {}", err)))
}

// vim: ts=4
