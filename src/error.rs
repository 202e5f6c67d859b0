//! Client-level error types shared across the codec, token exchange, and resource calls.

// self
use crate::{_prelude::*, provider::ProviderErrorKind};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; never retried.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Session key failed signature or shape verification; the caller must re-authenticate.
	#[error("Session key is invalid.")]
	InvalidCredential {
		/// Underlying verification failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Session key is authentic but its access token window has passed; call refresh.
	#[error("Session expired at {expired_at}.")]
	SessionExpired {
		/// Instant the embedded access token stopped being usable.
		expired_at: OffsetDateTime,
	},
	/// Provider answered with a non-success status.
	#[error(transparent)]
	Provider(#[from] ProviderError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Provider answered successfully but the body could not be used.
	#[error(transparent)]
	Response(#[from] ResponseError),
	/// Authorization redirect carried a `state` that does not match the issued one.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}
impl Error {
	/// HTTP status code reported by the provider, if this is a provider error.
	pub fn provider_status(&self) -> Option<u16> {
		match self {
			Self::Provider(e) => Some(e.status),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised before any network call.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client identifier is empty.
	#[error("Client ID must not be empty.")]
	MissingClientId,
	/// Client secret is empty.
	#[error("Client secret must not be empty.")]
	MissingClientSecret,
	/// No scopes were configured.
	#[error("OAuth scopes are not set.")]
	MissingScopes,
	/// A scope token is not part of the provider vocabulary.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// No redirect URI was configured.
	#[error("Redirect URI is not set.")]
	MissingRedirect,
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Redirect URI uses a scheme other than http/https.
	#[error("Redirect URI must use http or https: {url}.")]
	InsecureRedirect {
		/// Redirect URI that failed validation.
		url: String,
	},
	/// Endpoint URL could not be derived from the configured base.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Caller passed an empty authorization code.
	#[error("Authorization code must not be empty.")]
	MissingCode,
	/// Decoded record carries no refresh token.
	#[error("Session key is missing a refresh token.")]
	MissingRefreshToken,
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Token record builder validation failed.
	#[error("Unable to build token record.")]
	TokenBuild(#[from] crate::auth::TokenRecordBuilderError),
	/// Session key could not be signed.
	#[error("Session key could not be signed.")]
	Signing {
		/// Underlying encoder failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Non-success answer from the provider, classified through the fixed status table.
#[derive(Debug, ThisError)]
#[error("Provider returned {status} ({reason}) during {request}.", reason = .kind.reason())]
pub struct ProviderError {
	/// HTTP status code.
	pub status: u16,
	/// Classification derived from the status code.
	pub kind: ProviderErrorKind,
	/// Operation that was in flight (e.g. `exchange_code`, `get_user`).
	pub request: &'static str,
	/// Provider-supplied `error_description` or `message`, when present.
	pub message: Option<String>,
	/// Retry-After hint from upstream, if supplied.
	pub retry_after: Option<Duration>,
}
impl ProviderError {
	/// Creates an error for the provided status and operation label.
	pub fn new(status: u16, request: &'static str) -> Self {
		Self {
			status,
			kind: ProviderErrorKind::from_status(status),
			request,
			message: None,
			retry_after: None,
		}
	}

	/// Attaches the provider-supplied message.
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());

		self
	}

	/// Attaches the Retry-After hint.
	pub fn with_retry_after(mut self, retry_after: Option<Duration>) -> Self {
		self.retry_after = retry_after;

		self
	}

	/// Fixed reason string for the status code.
	pub fn reason(&self) -> &'static str {
		self.kind.reason()
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Successful provider responses that cannot be turned into crate values.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// Body is not the JSON shape the operation expects.
	#[error("Provider returned malformed JSON.")]
	Parse {
		/// Structured parsing failure including the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Token endpoint response omitted `expires_in`.
	#[error("Token endpoint response is missing expires_in.")]
	MissingExpiresIn,
	/// Token endpoint returned a non-positive duration.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn provider_error_display_includes_reason() {
		let err = ProviderError::new(429, "exchange_code");

		assert_eq!(err.reason(), "rate limited");
		assert_eq!(err.to_string(), "Provider returned 429 (rate limited) during exchange_code.");
		assert_eq!(Error::from(err).provider_status(), Some(429));
	}
}
