//! Client configuration: credentials, fixed consent policy, and redirect target.

// self
use crate::{
	_prelude::*,
	auth::{DEFAULT_EXPIRY_MARGIN, ScopeSet},
	error::ConfigError,
};

/// Long-lived settings shared by every exchange a client performs.
///
/// One configuration equals one consent policy: the scope set and redirect URI are reused
/// verbatim by the code exchange, the refresh exchange, and the authorization link. The struct
/// deserializes from any serde format so callers can keep it in their own config files:
///
/// ```toml
/// client_id = "1234567890"
/// client_secret = "..."
/// scopes = ["identify", "guilds"]
/// redirect_uri = "https://example.com/callback"
/// ```
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
	/// OAuth2 application identifier.
	pub client_id: String,
	/// OAuth2 application secret; also the session key signing secret.
	pub client_secret: String,
	/// Scopes requested during consent and echoed on every exchange.
	#[serde(default)]
	pub scopes: ScopeSet,
	/// Redirect target registered with the provider.
	#[serde(default)]
	pub redirect_uri: Option<Url>,
	/// Safety margin subtracted from the provider-declared token lifetime.
	#[serde(default = "default_expiry_margin", with = "margin_seconds")]
	pub expiry_margin: Duration,
}
impl ClientConfig {
	/// Creates a configuration without scopes or redirect; both must be set before any
	/// network-bound call.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			scopes: ScopeSet::default(),
			redirect_uri: None,
			expiry_margin: DEFAULT_EXPIRY_MARGIN,
		}
	}

	/// Replaces the scope set from raw scope strings.
	///
	/// Each item may hold several scopes separated by whitespace or `%20`. Unknown tokens and
	/// empty input are configuration errors.
	pub fn set_scopes<I, S>(&mut self, scopes: I) -> Result<(), ConfigError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let scopes = ScopeSet::parse(scopes)?;

		if scopes.is_empty() {
			return Err(ConfigError::MissingScopes);
		}

		self.scopes = scopes;

		Ok(())
	}

	/// Builder form of [`ClientConfig::set_scopes`].
	pub fn with_scopes<I, S>(mut self, scopes: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.set_scopes(scopes)?;

		Ok(self)
	}

	/// Replaces the redirect URI; it must be an absolute http or https URL.
	pub fn set_redirect_uri(&mut self, redirect_uri: &str) -> Result<(), ConfigError> {
		let url =
			Url::parse(redirect_uri).map_err(|source| ConfigError::InvalidRedirect { source })?;

		ensure_web_redirect(&url)?;

		self.redirect_uri = Some(url);

		Ok(())
	}

	/// Builder form of [`ClientConfig::set_redirect_uri`].
	pub fn with_redirect_uri(mut self, redirect_uri: &str) -> Result<Self, ConfigError> {
		self.set_redirect_uri(redirect_uri)?;

		Ok(self)
	}

	/// Overrides the expiry safety margin; negative values clamp to zero.
	pub fn with_expiry_margin(mut self, margin: Duration) -> Self {
		self.expiry_margin = if margin.is_negative() { Duration::ZERO } else { margin };

		self
	}

	/// Verifies everything a provider round trip needs and returns the redirect URI.
	pub fn validate(&self) -> Result<&Url, ConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigError::MissingClientId);
		}
		if self.client_secret.is_empty() {
			return Err(ConfigError::MissingClientSecret);
		}
		if self.scopes.is_empty() {
			return Err(ConfigError::MissingScopes);
		}

		let redirect = self.redirect_uri.as_ref().ok_or(ConfigError::MissingRedirect)?;

		ensure_web_redirect(redirect)?;

		Ok(redirect)
	}
}
impl Debug for ClientConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfig")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("scopes", &self.scopes)
			.field("redirect_uri", &self.redirect_uri.as_ref().map(Url::as_str))
			.field("expiry_margin", &self.expiry_margin)
			.finish()
	}
}

fn ensure_web_redirect(url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"http" | "https" if url.has_host() => Ok(()),
		_ => Err(ConfigError::InsecureRedirect { url: url.to_string() }),
	}
}

fn default_expiry_margin() -> Duration {
	DEFAULT_EXPIRY_MARGIN
}

mod margin_seconds {
	// crates.io
	use serde::Deserializer;
	// self
	use crate::_prelude::*;

	pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
	where
		D: Deserializer<'de>,
	{
		let secs = i64::deserialize(deserializer)?;

		Ok(Duration::seconds(secs.max(0)))
	}
}
