//! Token Exchange: the two `POST oauth2/token` round trips and their normalization.
//!
//! Both grants share one request builder and one response normalizer so the code and refresh
//! paths can never disagree on form fields, success statuses, or error classification. The
//! `oauth2` crate supplies the transport-facing request/response types; request bodies are
//! encoded here because the provider expects the client secret, scope, and redirect URI in the
//! form on both grants.

pub use oauth2;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest, HttpResponse,
	http::{
		HeaderValue, Method, Request,
		header::{ACCEPT, CONTENT_TYPE},
	},
};
use serde::de::DeserializeOwned;
use url::form_urlencoded::Serializer;
// self
use crate::{
	_prelude::*,
	auth::{TokenRecord, TokenRecordBuilderError, TokenSecret},
	config::ClientConfig,
	error::{ConfigError, ProviderError, ResponseError},
	http::{self, ProviderHttpClient},
	provider::{ApiPath, ProviderEndpoints, status},
	session::Clock,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Grant carried by a token request.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TokenGrant<'a> {
	/// `grant_type=authorization_code`.
	AuthorizationCode {
		/// Single-use code returned by the consent redirect.
		code: &'a str,
	},
	/// `grant_type=refresh_token`.
	RefreshToken {
		/// Refresh token embedded in a session key.
		refresh_token: &'a str,
	},
}
impl TokenGrant<'_> {
	/// Wire value of `grant_type`.
	pub const fn grant_type(&self) -> &'static str {
		match self {
			TokenGrant::AuthorizationCode { .. } => "authorization_code",
			TokenGrant::RefreshToken { .. } => "refresh_token",
		}
	}

	/// Operation label attached to provider errors.
	pub const fn operation(&self) -> &'static str {
		match self {
			TokenGrant::AuthorizationCode { .. } => "exchange_code",
			TokenGrant::RefreshToken { .. } => "exchange_refresh",
		}
	}
}
impl Debug for TokenGrant<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenGrant").field(&self.grant_type()).finish()
	}
}

/// Raw token endpoint body; every field but `access_token` is optional on the wire.
#[derive(Deserialize)]
struct TokenResponse {
	access_token: String,
	#[serde(default)]
	token_type: Option<String>,
	#[serde(default)]
	expires_in: Option<i64>,
	#[serde(default)]
	refresh_token: Option<String>,
	#[serde(default)]
	scope: Option<String>,
}

/// Error body shapes returned by the provider (`OAuth2` and REST styles).
#[derive(Default, Deserialize)]
struct ErrorBody {
	#[serde(default)]
	error: Option<String>,
	#[serde(default)]
	error_description: Option<String>,
	#[serde(default)]
	message: Option<String>,
}

/// Performs the provider token round trips for one client configuration.
pub struct TokenExchange<'a, C>
where
	C: ?Sized + ProviderHttpClient,
{
	config: &'a ClientConfig,
	endpoints: &'a ProviderEndpoints,
	http_client: &'a C,
	clock: &'a dyn Clock,
}
impl<'a, C> TokenExchange<'a, C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Borrows the pieces a token request needs.
	pub fn new(
		config: &'a ClientConfig,
		endpoints: &'a ProviderEndpoints,
		http_client: &'a C,
		clock: &'a dyn Clock,
	) -> Self {
		Self { config, endpoints, http_client, clock }
	}

	/// Exchanges an authorization code for a token record.
	///
	/// Configuration and the code are validated before any request is sent.
	pub async fn exchange_code(&self, code: &str) -> Result<TokenRecord> {
		if code.trim().is_empty() {
			self.config.validate()?;

			return Err(ConfigError::MissingCode.into());
		}

		self.request_token(TokenGrant::AuthorizationCode { code }).await
	}

	/// Exchanges a refresh token for a new token record.
	///
	/// The scope and redirect URI are the same ones the code exchange sent. When the provider
	/// does not rotate the refresh token, the record keeps the one that was presented.
	pub async fn exchange_refresh(&self, refresh_token: &str) -> Result<TokenRecord> {
		if refresh_token.is_empty() {
			self.config.validate()?;

			return Err(ConfigError::MissingRefreshToken.into());
		}

		let mut record = self.request_token(TokenGrant::RefreshToken { refresh_token }).await?;

		if record.refresh_token.is_none() {
			record.refresh_token = Some(TokenSecret::new(refresh_token));
		}

		Ok(record)
	}

	async fn request_token(&self, grant: TokenGrant<'_>) -> Result<TokenRecord> {
		let redirect = self.config.validate()?;
		let url = self.endpoints.resolve(ApiPath::Token)?;
		let body = encode_form(self.config, redirect, grant);
		let request = Request::builder()
			.method(Method::POST)
			.uri(url.as_str())
			.header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
			.header(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE))
			.body(body.into_bytes())
			.map_err(ConfigError::from)?;
		let response = send(self.http_client, request).await?;
		let code = response.status().as_u16();

		if !status::is_token_success(code) {
			return Err(provider_error(&response, grant.operation()).into());
		}

		let payload = parse_json::<TokenResponse>(&response)?;

		self.normalize(payload)
	}

	fn normalize(&self, payload: TokenResponse) -> Result<TokenRecord> {
		let expires_in = payload.expires_in.ok_or(ResponseError::MissingExpiresIn)?;

		if expires_in <= 0 {
			return Err(ResponseError::NonPositiveExpiresIn.into());
		}

		if expires_in > i64::from(i32::MAX) {
			return Err(ResponseError::ExpiresInOutOfRange.into());
		}

		let scope = payload
			.scope
			.filter(|scope| !scope.trim().is_empty())
			.unwrap_or_else(|| self.config.scopes.normalized());
		let mut builder = TokenRecord::builder()
			.access_token(payload.access_token)
			.token_type(payload.token_type.unwrap_or_default())
			.scope(scope)
			.issued_at(self.clock.now())
			.expires_in(Duration::seconds(expires_in))
			.expiry_margin(self.config.expiry_margin);

		if let Some(refresh_token) = payload.refresh_token.filter(|token| !token.is_empty()) {
			builder = builder.refresh_token(refresh_token);
		}

		builder.build().map_err(|e| match e {
			TokenRecordBuilderError::ExpiryOutOfRange =>
				ResponseError::ExpiresInOutOfRange.into(),
			other => ConfigError::from(other).into(),
		})
	}
}
impl<C> Debug for TokenExchange<'_, C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenExchange")
			.field("client_id", &self.config.client_id)
			.field("endpoints", &self.endpoints)
			.finish_non_exhaustive()
	}
}

/// Encodes the token form; field order is stable for logging and tests.
pub(crate) fn encode_form(config: &ClientConfig, redirect: &Url, grant: TokenGrant<'_>) -> String {
	let mut form = Serializer::new(String::new());

	form.append_pair("client_id", &config.client_id)
		.append_pair("client_secret", &config.client_secret)
		.append_pair("grant_type", grant.grant_type());

	match grant {
		TokenGrant::AuthorizationCode { code } => form.append_pair("code", code),
		TokenGrant::RefreshToken { refresh_token } =>
			form.append_pair("refresh_token", refresh_token),
	};

	form.append_pair("redirect_uri", redirect.as_str())
		.append_pair("scope", &config.scopes.normalized())
		.finish()
}

/// Sends one request through a fresh transport handle.
pub(crate) async fn send<C>(http_client: &C, request: HttpRequest) -> Result<HttpResponse>
where
	C: ?Sized + ProviderHttpClient,
{
	let handle = http_client.handle();
	let response = handle.call(request).await?;

	Ok(response)
}

/// Builds a [`ProviderError`] from a non-success response.
pub(crate) fn provider_error(response: &HttpResponse, operation: &'static str) -> ProviderError {
	let body = serde_json::from_slice::<ErrorBody>(response.body()).unwrap_or_default();
	let message = body.error_description.or(body.message).or(body.error);
	let error = ProviderError::new(response.status().as_u16(), operation)
		.with_retry_after(http::parse_retry_after(response.headers()));

	match message {
		Some(message) if !message.is_empty() => error.with_message(message),
		_ => error,
	}
}

/// Deserializes a JSON body with path-aware error reporting.
pub(crate) fn parse_json<T>(response: &HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(response.body());

	serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
		ResponseError::Parse { source, status: response.status().as_u16() }.into()
	})
}
