//! Request signature verification for incoming interactions

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use std::fmt::Debug;

use crate::prelude::*;

pub trait SignatureVerifier: Debug + Send + Sync {
	/// `signature` is hex encoded and covers `timestamp || body`
	fn verify(&self, signature: &str, timestamp: &str, body: &[u8]) -> bool;
}

#[derive(Debug, Clone)]
pub struct Ed25519Verifier {
	key: VerifyingKey,
}

impl Ed25519Verifier {
	pub fn new(key: VerifyingKey) -> Self {
		Self { key }
	}

	/// Parse a hex encoded 32 byte public key
	pub fn from_hex(public_key: &str) -> RdResult<Self> {
		let bytes: [u8; 32] = hex::decode(public_key.trim())
			.ok()
			.and_then(|b| b.try_into().ok())
			.ok_or_else(|| Error::ValidationError("public key must be 32 hex encoded bytes".into()))?;
		let key = VerifyingKey::from_bytes(&bytes)
			.map_err(|err| Error::ValidationError(format!("invalid public key: {}", err)))?;
		Ok(Self { key })
	}
}

impl SignatureVerifier for Ed25519Verifier {
	fn verify(&self, signature: &str, timestamp: &str, body: &[u8]) -> bool {
		let Some(sig_bytes) = hex::decode(signature).ok().and_then(|b| <[u8; 64]>::try_from(b).ok())
		else {
			debug!("Malformed interaction signature");
			return false;
		};
		let signature = Signature::from_bytes(&sig_bytes);

		let mut message = Vec::with_capacity(timestamp.len() + body.len());
		message.extend_from_slice(timestamp.as_bytes());
		message.extend_from_slice(body);

		self.key.verify(&message, &signature).is_ok()
	}
}


// vim: ts=4
