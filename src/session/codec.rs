//! HS256 signing and verification of [`TokenRecord`]s.

// crates.io
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
// self
use crate::{_prelude::*, auth::TokenRecord, error::ConfigError, session::SessionKey};

/// Credential codec keyed by the client secret.
///
/// Minted keys are compact JWTs whose claim set is the full [`TokenRecord`], including the
/// locally derived expiry. Decoding verifies the signature and the exact claim shape but never
/// enforces expiry.
#[derive(Clone)]
pub struct SessionCodec {
	encoding: EncodingKey,
	decoding: DecodingKey,
	validation: Validation,
}
impl SessionCodec {
	/// Creates a codec for the provided shared secret.
	pub fn new(secret: impl AsRef<[u8]>) -> Self {
		let secret = secret.as_ref();
		let mut validation = Validation::new(Algorithm::HS256);

		// Expiry is advisory; callers must be able to read stale keys to refresh them.
		validation.validate_exp = false;
		validation.validate_aud = false;
		validation.required_spec_claims.clear();

		Self {
			encoding: EncodingKey::from_secret(secret),
			decoding: DecodingKey::from_secret(secret),
			validation,
		}
	}

	/// Signs the record into an opaque, URL-safe session key.
	pub fn mint(&self, record: &TokenRecord) -> Result<SessionKey> {
		let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), record, &self.encoding)
			.map_err(|source| ConfigError::Signing { source })?;

		Ok(SessionKey::from(token))
	}

	/// Verifies the key and returns the embedded record, expired or not.
	pub fn decode(&self, key: &SessionKey) -> Result<TokenRecord> {
		let data = jsonwebtoken::decode::<TokenRecord>(key.expose(), &self.decoding, &self.validation)
			.map_err(|source| Error::InvalidCredential { source })?;

		Ok(data.claims)
	}
}
impl Debug for SessionCodec {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionCodec").field("algorithm", &Algorithm::HS256).finish_non_exhaustive()
	}
}
