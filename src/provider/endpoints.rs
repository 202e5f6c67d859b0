//! Discord endpoint set.

// self
use crate::{_prelude::*, error::ConfigError};

const DISCORD_API_BASE: &str = "https://discord.com/api/";
const DISCORD_AUTHORIZE: &str = "https://discord.com/oauth2/authorize";
const DISCORD_CDN_BASE: &str = "https://cdn.discordapp.com/";

/// Relative resource paths resolved against [`ProviderEndpoints::api_base`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiPath {
	/// `POST oauth2/token`.
	Token,
	/// `GET users/@me`.
	CurrentUser,
	/// `GET users/@me/guilds`.
	CurrentUserGuilds,
	/// `GET users/@me/connections`.
	CurrentUserConnections,
}
impl ApiPath {
	/// Path relative to the API base (no leading slash).
	pub const fn as_str(self) -> &'static str {
		match self {
			ApiPath::Token => "oauth2/token",
			ApiPath::CurrentUser => "users/@me",
			ApiPath::CurrentUserGuilds => "users/@me/guilds",
			ApiPath::CurrentUserConnections => "users/@me/connections",
		}
	}
}

/// Endpoint set used by the client.
///
/// The API base must end with a trailing slash so relative paths append instead of
/// replacing the last segment; [`ProviderEndpoints::with_api_base`] enforces that.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Base URL for REST and token calls.
	pub api_base: Url,
	/// Browser-facing consent screen.
	pub authorization: Url,
	/// CDN base used for avatar and icon URLs.
	pub cdn_base: Url,
}
impl ProviderEndpoints {
	/// Returns a copy pointing REST and token calls at `base`.
	pub fn with_api_base(mut self, base: &str) -> Result<Self> {
		self.api_base = parse_base(base)?;

		Ok(self)
	}

	/// Returns a copy pointing the consent screen at `url`.
	pub fn with_authorization(mut self, url: &str) -> Result<Self> {
		self.authorization =
			Url::parse(url).map_err(|source| ConfigError::InvalidEndpoint { source })?;

		Ok(self)
	}

	/// Resolves an API path against the base.
	pub fn resolve(&self, path: ApiPath) -> Result<Url> {
		self.api_base
			.join(path.as_str())
			.map_err(|source| ConfigError::InvalidEndpoint { source }.into())
	}
}
impl Default for ProviderEndpoints {
	fn default() -> Self {
		Self {
			api_base: Url::parse(DISCORD_API_BASE).expect("Discord API base must parse."),
			authorization: Url::parse(DISCORD_AUTHORIZE)
				.expect("Discord authorization endpoint must parse."),
			cdn_base: Url::parse(DISCORD_CDN_BASE).expect("Discord CDN base must parse."),
		}
	}
}

fn parse_base(base: &str) -> Result<Url> {
	let mut owned = base.to_owned();

	if !owned.ends_with('/') {
		owned.push('/');
	}

	Url::parse(&owned).map_err(|source| ConfigError::InvalidEndpoint { source }.into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_endpoints_resolve_discord_paths() {
		let endpoints = ProviderEndpoints::default();

		assert_eq!(
			endpoints.resolve(ApiPath::Token).expect("Token path should resolve.").as_str(),
			"https://discord.com/api/oauth2/token"
		);
		assert_eq!(
			endpoints
				.resolve(ApiPath::CurrentUserConnections)
				.expect("Connections path should resolve.")
				.as_str(),
			"https://discord.com/api/users/@me/connections"
		);
	}

	#[test]
	fn api_base_override_keeps_prefix() {
		let endpoints = ProviderEndpoints::default()
			.with_api_base("http://127.0.0.1:9000/api")
			.expect("Override base should parse.");

		assert_eq!(
			endpoints
				.resolve(ApiPath::CurrentUserGuilds)
				.expect("Guilds path should resolve.")
				.as_str(),
			"http://127.0.0.1:9000/api/users/@me/guilds"
		);
		assert!(ProviderEndpoints::default().with_api_base("not a url").is_err());
	}
}
