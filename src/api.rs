//! Resource Fetcher: authenticated reads of the current user, their guilds, and connections.
//!
//! Every call derives the `Authorization` header from the session key first, so an expired
//! key fails with [`Error::SessionExpired`] before any request is sent. Non-2xx answers map
//! onto the same [`ProviderError`](crate::error::ProviderError) table as the token endpoint.
//! Nothing here retries or refreshes; callers decide when to call
//! [`DiscordClient::refresh`].

macro_rules! def_flags {
	(
		$(#[$meta:meta])*
		$name:ident {
			$($variant:ident = $bit:expr, $label:literal;)+
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
		pub enum $name {
			$(
				#[doc = $label]
				$variant,
			)+
		}
		impl $name {
			/// Every flag in bit order.
			pub const ALL: &'static [$name] = &[$($name::$variant,)+];

			/// Bit mask of the flag.
			pub const fn bits(self) -> u64 {
				match self {
					$($name::$variant => $bit,)+
				}
			}

			/// Human-readable label.
			pub const fn label(self) -> &'static str {
				match self {
					$($name::$variant => $label,)+
				}
			}

			/// Flags set in `bits`, in bit order; unknown bits are ignored.
			pub fn from_bits(bits: u64) -> Vec<$name> {
				Self::ALL.iter().copied().filter(|flag| bits & flag.bits() == flag.bits()).collect()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.label())
			}
		}
	};
}

pub mod connection;
pub mod guild;
pub mod user;

pub use connection::*;
pub use guild::*;
pub use user::*;

// crates.io
use oauth2::http::{
	HeaderValue, Method, Request,
	header::{ACCEPT, AUTHORIZATION},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	flows::{DiscordClient, common},
	http::ProviderHttpClient,
	oauth,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{ApiPath, status},
	session::SessionKey,
};

impl<C> DiscordClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// `GET users/@me`.
	pub async fn get_user(&self, key: &SessionKey) -> Result<User> {
		self.fetch(key, ApiPath::CurrentUser, "get_user").await
	}

	/// `GET users/@me/guilds`.
	pub async fn get_guilds(&self, key: &SessionKey) -> Result<Vec<Guild>> {
		self.fetch(key, ApiPath::CurrentUserGuilds, "get_guilds").await
	}

	/// `GET users/@me/connections`.
	pub async fn get_connections(&self, key: &SessionKey) -> Result<Vec<Connection>> {
		self.fetch(key, ApiPath::CurrentUserConnections, "get_connections").await
	}

	async fn fetch<T>(&self, key: &SessionKey, path: ApiPath, operation: &'static str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		const KIND: FlowKind = FlowKind::Resource;

		let span = FlowSpan::new(KIND, operation);

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mut authorization = HeaderValue::try_from(self.authorization_header(key)?)
					.map_err(|e| ConfigError::from(oauth2::http::Error::from(e)))?;

				authorization.set_sensitive(true);

				let url = self.endpoints().resolve(path)?;
				let request = Request::builder()
					.method(Method::GET)
					.uri(url.as_str())
					.header(AUTHORIZATION, authorization)
					.header(ACCEPT, HeaderValue::from_static("application/json"))
					.body(Vec::new())
					.map_err(ConfigError::from)?;
				let response = oauth::send(self.http_client.as_ref(), request).await?;

				if !status::is_success(response.status().as_u16()) {
					return Err(oauth::provider_error(&response, operation).into());
				}

				oauth::parse_json::<T>(&response)
			})
			.await;

		common::record_result(&span, KIND, &result);

		result
	}
}
