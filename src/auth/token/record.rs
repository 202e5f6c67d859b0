//! Immutable token record structs, lifecycle helpers, and builders.

// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, ScopeValidationError, token::secret::TokenSecret},
};

/// Token type assumed when the provider omits `token_type`.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";
/// Default safety margin subtracted from the provider-declared lifetime.
pub const DEFAULT_EXPIRY_MARGIN: Duration = Duration::seconds(10);

/// Current lifecycle status for a token record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// Access token is still inside its validity window.
	Active,
	/// Access token window has passed; the refresh token may still be usable.
	Expired,
}

/// Errors produced by [`TokenRecordBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum TokenRecordBuilderError {
	/// Issued when no access token value was provided.
	#[error("Access token is required.")]
	MissingAccessToken,
	/// Issued when no lifetime was configured.
	#[error("Expiry must be supplied via expires_in.")]
	MissingExpiry,
	/// Issued when the computed expiry cannot be represented.
	#[error("Expiry instant is out of range.")]
	ExpiryOutOfRange,
}

/// Normalized provider token response plus the locally computed expiry.
///
/// `expires_at` is always derived by this crate at mint time as
/// `issued + expires_in - margin`, truncated to whole milliseconds so the record survives a
/// session-key round trip unchanged. It is never read from the provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenRecord {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Token type used as the Authorization scheme (typically `Bearer`).
	pub token_type: String,
	/// Refresh token secret, if the provider issued one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
	/// Provider-declared lifetime in seconds.
	pub expires_in: i64,
	/// Raw scope string the provider reported as granted.
	pub scope: String,
	/// Local expiry instant with millisecond precision.
	#[serde(rename = "expire_at", with = "time::serde::timestamp::milliseconds")]
	pub expires_at: OffsetDateTime,
}
impl TokenRecord {
	/// Returns a builder for constructing records.
	pub fn builder() -> TokenRecordBuilder {
		TokenRecordBuilder::default()
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if instant >= self.expires_at {
			return TokenStatus::Expired;
		}

		TokenStatus::Active
	}

	/// Returns `true` if the record has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Expired)
	}

	/// Expiry as milliseconds since the Unix epoch.
	pub fn expires_at_epoch_ms(&self) -> i64 {
		(self.expires_at.unix_timestamp_nanos() / 1_000_000) as i64
	}

	/// `Authorization` header value for resource calls.
	pub fn authorization_value(&self) -> String {
		format!("{} {}", self.token_type, self.access_token.expose())
	}

	/// Parses the granted scope string against the closed vocabulary.
	pub fn granted_scopes(&self) -> Result<ScopeSet, ScopeValidationError> {
		ScopeSet::from_str(&self.scope)
	}
}
impl Debug for TokenRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRecord")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("expires_in", &self.expires_in)
			.field("scope", &self.scope)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Builder for [`TokenRecord`].
#[derive(Clone, Debug)]
pub struct TokenRecordBuilder {
	access_token: Option<TokenSecret>,
	token_type: Option<String>,
	refresh_token: Option<TokenSecret>,
	scope: String,
	issued_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
	margin: Duration,
}
impl TokenRecordBuilder {
	/// Sets the instant the provider answered.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Sets the provider-declared lifetime.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Overrides the safety margin (defaults to 10 seconds).
	pub fn expiry_margin(mut self, margin: Duration) -> Self {
		self.margin = if margin.is_negative() { Duration::ZERO } else { margin };

		self
	}

	/// Provides the access token value.
	pub fn access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(TokenSecret::new(token));

		self
	}

	/// Provides the token type; empty values fall back to `Bearer`.
	pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = Some(token_type.into()).filter(|value| !value.is_empty());

		self
	}

	/// Provides the refresh token value.
	pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
		self.refresh_token = Some(TokenSecret::new(token));

		self
	}

	/// Provides the granted scope string.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = scope.into();

		self
	}

	/// Consumes the builder and produces a [`TokenRecord`].
	pub fn build(self) -> Result<TokenRecord, TokenRecordBuilderError> {
		let access_token = self.access_token.ok_or(TokenRecordBuilderError::MissingAccessToken)?;
		let expires_in = self.expires_in.ok_or(TokenRecordBuilderError::MissingExpiry)?;
		let issued_at = self.issued_at.unwrap_or_else(OffsetDateTime::now_utc);
		let expires_at = issued_at
			.checked_add(expires_in)
			.and_then(|instant| instant.checked_sub(self.margin))
			.ok_or(TokenRecordBuilderError::ExpiryOutOfRange)
			.and_then(truncate_to_millis)?;

		Ok(TokenRecord {
			access_token,
			token_type: self.token_type.unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_owned()),
			refresh_token: self.refresh_token,
			expires_in: expires_in.whole_seconds(),
			scope: self.scope,
			expires_at,
		})
	}
}
impl Default for TokenRecordBuilder {
	fn default() -> Self {
		Self {
			access_token: None,
			token_type: None,
			refresh_token: None,
			scope: String::new(),
			issued_at: None,
			expires_in: None,
			margin: DEFAULT_EXPIRY_MARGIN,
		}
	}
}

fn truncate_to_millis(instant: OffsetDateTime) -> Result<OffsetDateTime, TokenRecordBuilderError> {
	let millis = instant.unix_timestamp_nanos().div_euclid(1_000_000);

	OffsetDateTime::from_unix_timestamp_nanos(millis * 1_000_000)
		.map_err(|_| TokenRecordBuilderError::ExpiryOutOfRange)
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;
	use crate::auth::Scope;

	fn record(issued: OffsetDateTime, expires_in: Duration) -> TokenRecord {
		TokenRecord::builder()
			.access_token("access")
			.token_type("Bearer")
			.refresh_token("refresh")
			.scope("identify guilds")
			.issued_at(issued)
			.expires_in(expires_in)
			.build()
			.expect("Token record builder should succeed.")
	}

	#[test]
	fn expiry_subtracts_safety_margin() {
		let record = record(macros::datetime!(2025-01-01 00:00 UTC), Duration::minutes(10));

		assert_eq!(record.expires_at, macros::datetime!(2025-01-01 00:09:50 UTC));
		assert_eq!(record.expires_in, 600);
		assert_eq!(record.expires_at_epoch_ms(), 1_735_690_190_000);
	}

	#[test]
	fn status_flips_at_expiry_instant() {
		let record = record(macros::datetime!(2025-01-01 00:00 UTC), Duration::minutes(10));

		assert_eq!(record.status_at(macros::datetime!(2025-01-01 00:05 UTC)), TokenStatus::Active);
		assert_eq!(
			record.status_at(macros::datetime!(2025-01-01 00:09:50 UTC)),
			TokenStatus::Expired
		);
		assert!(record.is_expired_at(macros::datetime!(2025-01-01 01:00 UTC)));
	}

	#[test]
	fn expiry_is_truncated_to_milliseconds() {
		let issued = macros::datetime!(2025-01-01 00:00:00.123456789 UTC);
		let record = record(issued, Duration::seconds(60));

		assert_eq!(record.expires_at, macros::datetime!(2025-01-01 00:00:50.123 UTC));
	}

	#[test]
	fn builder_defaults_and_requirements() {
		let record = TokenRecord::builder()
			.access_token("a")
			.token_type("")
			.expires_in(Duration::seconds(30))
			.expiry_margin(Duration::ZERO)
			.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
			.build()
			.expect("Builder should default the token type.");

		assert_eq!(record.token_type, DEFAULT_TOKEN_TYPE);
		assert_eq!(record.authorization_value(), "Bearer a");
		assert!(record.refresh_token.is_none());
		assert_eq!(
			TokenRecord::builder().expires_in(Duration::SECOND).build(),
			Err(TokenRecordBuilderError::MissingAccessToken)
		);
		assert_eq!(
			TokenRecord::builder().access_token("a").build(),
			Err(TokenRecordBuilderError::MissingExpiry)
		);
	}

	#[test]
	fn granted_scopes_parse_provider_string() {
		let record = record(macros::datetime!(2025-01-01 00:00 UTC), Duration::minutes(1));
		let scopes = record.granted_scopes().expect("Granted scopes should parse.");

		assert!(scopes.contains(Scope::Identify));
		assert!(scopes.contains(Scope::Guilds));
	}

	#[test]
	fn debug_redacts_secrets() {
		let record = record(macros::datetime!(2025-01-01 00:00 UTC), Duration::minutes(1));
		let rendered = format!("{record:?}");

		assert!(!rendered.contains("\"access\""));
		assert!(!rendered.contains("\"refresh\""));
		assert!(rendered.contains("<redacted>"));
	}
}
