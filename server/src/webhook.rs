//! Webhook notifier
//!
//! Posts notification payloads to per-kind webhook URLs. Delivery runs in a
//! spawned task so the moderation action that triggered it never waits.

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;

use reviewdb_core::notify::{NotificationKind, Notifier};

use crate::config::WebhookUrls;
use crate::prelude::*;

type HttpsClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

#[derive(Debug, Clone)]
pub struct WebhookNotifier {
	urls: WebhookUrls,
	client: HttpsClient,
}

impl WebhookNotifier {
	pub fn new(urls: WebhookUrls) -> RdResult<Self> {
		let connector = HttpsConnectorBuilder::new()
			.with_native_roots()
			.map_err(|err| Error::Internal(format!("TLS error: {}", err)))?
			.https_or_http()
			.enable_http1()
			.build();
		let client = Client::builder(TokioExecutor::new()).build(connector);
		Ok(Self { urls, client })
	}

	fn url(&self, kind: NotificationKind) -> Option<&str> {
		match kind {
			NotificationKind::Report => self.urls.report.as_deref(),
			NotificationKind::Appeal => self.urls.appeal.as_deref(),
			// Resolved appeals go to the same channel as the appeals themselves
			NotificationKind::AppealResolved => self.urls.appeal.as_deref(),
			NotificationKind::Ban => self.urls.ban.as_deref(),
		}
	}
}

#[async_trait]
impl Notifier for WebhookNotifier {
	async fn notify(&self, kind: NotificationKind, payload: serde_json::Value) -> RdResult<()> {
		let Some(url) = self.url(kind) else {
			debug!(kind = kind.as_str(), "No webhook configured, skipping notification");
			return Ok(());
		};

		let body = serde_json::to_vec(&payload)
			.map_err(|err| Error::Internal(format!("cannot encode notification: {}", err)))?;
		let request = hyper::Request::builder()
			.method(hyper::Method::POST)
			.uri(url)
			.header("Content-Type", "application/json")
			.body(Full::new(Bytes::from(body)))
			.map_err(|err| Error::ValidationError(format!("invalid webhook request: {}", err)))?;

		let client = self.client.clone();
		tokio::spawn(async move {
			match client.request(request).await {
				Ok(response) if response.status().is_success() => {
					debug!(kind = kind.as_str(), "Notification delivered");
				}
				Ok(response) => {
					let status = response.status();
					let body = response.into_body().collect().await.ok().map(|b| b.to_bytes());
					let body = body.as_ref().and_then(|b| std::str::from_utf8(b).ok()).unwrap_or("");
					warn!(kind = kind.as_str(), %status, body, "Webhook rejected notification");
				}
				Err(err) => {
					warn!(kind = kind.as_str(), error = %err, "Webhook delivery failed");
				}
			}
		});
		Ok(())
	}
}

// vim: ts=4
