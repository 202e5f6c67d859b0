//! Session Manager: the client callers drive for every identity concern.
//!
//! [`DiscordClient`] owns the configuration, transport, codec, and clock. It holds no
//! per-session state: every operation takes the caller's [`SessionKey`] and derives what it
//! needs from the signed record inside, so any number of processes sharing one configuration
//! can serve the same users.

pub mod authorize;
pub mod common;
pub mod login;
pub mod refresh;
pub mod session;

pub use authorize::*;
pub use refresh::*;

// self
use crate::{
	_prelude::*,
	auth::TokenRecord,
	config::ClientConfig,
	error::ConfigError,
	flows::common::RefreshGuards,
	http::ProviderHttpClient,
	oauth::TokenExchange,
	provider::ProviderEndpoints,
	session::{Clock, SessionCodec, SessionKey, SystemClock},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestDiscordClient = DiscordClient<ReqwestHttpClient>;

/// Stateless Discord OAuth2 client.
///
/// Cloning is cheap; clones share the transport, clock, metrics, and (when enabled) the
/// refresh coalescer.
pub struct DiscordClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Shared counters for refresh outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	config: ClientConfig,
	endpoints: ProviderEndpoints,
	codec: SessionCodec,
	clock: Arc<dyn Clock>,
	refresh_guards: Option<Arc<RefreshGuards>>,
}
impl<C> DiscordClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		let codec = SessionCodec::new(&config.client_secret);

		Self {
			http_client: http_client.into(),
			refresh_metrics: Default::default(),
			config,
			endpoints: ProviderEndpoints::default(),
			codec,
			clock: Arc::new(SystemClock),
			refresh_guards: None,
		}
	}

	/// Replaces the provider endpoint set (tests point it at a stub server).
	pub fn with_endpoints(mut self, endpoints: ProviderEndpoints) -> Self {
		self.endpoints = endpoints;

		self
	}

	/// Replaces the time source used for expiry computation and checks.
	pub fn with_clock<K>(mut self, clock: K) -> Self
	where
		K: 'static + Clock,
	{
		self.clock = Arc::new(clock);

		self
	}

	/// Makes concurrent refreshes of the same refresh token inside this process share one
	/// provider call. Disabled by default: without it, each caller performs its own exchange.
	pub fn with_refresh_coalescing(mut self, enabled: bool) -> Self {
		self.refresh_guards = enabled.then(Default::default);

		self
	}

	/// Replaces the requested scopes (see [`ClientConfig::set_scopes`]).
	pub fn set_scopes<I, S>(&mut self, scopes: I) -> Result<(), ConfigError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.config.set_scopes(scopes)
	}

	/// Replaces the redirect URI (see [`ClientConfig::set_redirect_uri`]).
	pub fn set_redirect_uri(&mut self, redirect_uri: &str) -> Result<(), ConfigError> {
		self.config.set_redirect_uri(redirect_uri)
	}

	/// Active configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Active endpoint set.
	pub fn endpoints(&self) -> &ProviderEndpoints {
		&self.endpoints
	}

	/// Codec used to mint and verify session keys.
	pub fn codec(&self) -> &SessionCodec {
		&self.codec
	}

	/// Current instant according to the configured clock.
	pub fn now(&self) -> OffsetDateTime {
		self.clock.now()
	}

	/// Token Exchange bound to this client's configuration, transport, and clock.
	pub fn token_exchange(&self) -> TokenExchange<'_, C> {
		TokenExchange::new(&self.config, &self.endpoints, self.http_client.as_ref(), &*self.clock)
	}

	/// Signs a record into a session key.
	pub(crate) fn mint(&self, record: &TokenRecord) -> Result<SessionKey> {
		self.codec.mint(record)
	}
}
impl<C> Clone for DiscordClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			refresh_metrics: Arc::clone(&self.refresh_metrics),
			config: self.config.clone(),
			endpoints: self.endpoints.clone(),
			codec: self.codec.clone(),
			clock: Arc::clone(&self.clock),
			refresh_guards: self.refresh_guards.clone(),
		}
	}
}
#[cfg(feature = "reqwest")]
impl DiscordClient<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: ClientConfig) -> Self {
		Self::with_http_client(config, ReqwestHttpClient::default())
	}
}
impl<C> Debug for DiscordClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DiscordClient")
			.field("config", &self.config)
			.field("endpoints", &self.endpoints)
			.field("refresh_coalescing", &self.refresh_guards.is_some())
			.finish()
	}
}
