//! Read-side session operations: decode, expiry, and the derived `Authorization` header.

// self
use crate::{
	_prelude::*,
	auth::{TokenRecord, TokenStatus},
	flows::DiscordClient,
	http::ProviderHttpClient,
	session::SessionKey,
};

impl<C> DiscordClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Verifies a key and returns its record, even when the access token has expired.
	pub fn decode(&self, key: &SessionKey) -> Result<TokenRecord> {
		self.codec().decode(key)
	}

	/// Lifecycle status of the key at the current instant.
	pub fn status(&self, key: &SessionKey) -> Result<TokenStatus> {
		Ok(self.decode(key)?.status_at(self.now()))
	}

	/// Returns `true` once the current instant reaches the key's expiry.
	pub fn is_expired(&self, key: &SessionKey) -> Result<bool> {
		Ok(matches!(self.status(key)?, TokenStatus::Expired))
	}

	/// Derives the `Authorization` header value (`"{token_type} {access_token}"`).
	///
	/// Fails with [`Error::SessionExpired`] when the key is authentic but stale; call
	/// [`DiscordClient::refresh`] and retry with the new key.
	pub fn authorization_header(&self, key: &SessionKey) -> Result<String> {
		let record = self.decode(key)?;

		if record.is_expired_at(self.now()) {
			return Err(Error::SessionExpired { expired_at: record.expires_at });
		}

		Ok(record.authorization_value())
	}
}
