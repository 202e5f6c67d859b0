//! Demonstrates plugging a non-reqwest transport into the client.
//!
//! 1. Implement [`ProviderHttpClient`] and hand out a handle per request.
//! 2. Implement [`AsyncHttpClient`] on the handle with [`TransportError`] as its error type.
//! 3. Return every provider answer (4xx/5xx included) as an [`HttpResponse`]; only failures to
//!    get an answer at all become [`TransportError`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	pin::Pin,
};
// crates.io
use color_eyre::Result;
// self
use discord_oauth2_session::{
	ClientConfig, DiscordClient,
	error::TransportError,
	http::ProviderHttpClient,
	oauth::oauth2::{AsyncHttpClient, HttpRequest, HttpResponse, http::StatusCode},
};

const TOKEN_BODY: &[u8] =
	b"{\"access_token\":\"mock-access\",\"token_type\":\"Bearer\",\"expires_in\":900,\"refresh_token\":\"mock-refresh\"}";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::new("demo-client", "demo-secret")
		.with_scopes(["identify"])?
		.with_redirect_uri("https://app.example.com/oauth/callback")?;
	let client: DiscordClient<MockHttpClient> =
		DiscordClient::with_http_client(config.clone(), MockHttpClient::success());
	let key = client.login("demo-code").await?;

	println!("Mock transport minted a session: {}.", client.authorization_header(&key)?);

	let unreachable: DiscordClient<MockHttpClient> = DiscordClient::with_http_client(
		config.clone(),
		MockHttpClient::failing(MockTransportError::DnsFailure { host: "discord.com" }),
	);

	match unreachable.login("demo-code").await {
		Ok(_) => println!("Mock transport unexpectedly succeeded."),
		Err(e) => println!("Transport failure surfaced as: {e}."),
	}

	let rejecting: DiscordClient<MockHttpClient> =
		DiscordClient::with_http_client(config, MockHttpClient::status(401));

	match rejecting.login("demo-code").await {
		Ok(_) => println!("Mock transport unexpectedly produced a token."),
		Err(e) => println!("Provider status {:?} went through the status table: {e}.", e.provider_status()),
	}

	Ok(())
}

#[derive(Clone, Debug)]
enum MockTransportError {
	DnsFailure { host: &'static str },
}
impl Display for MockTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::DnsFailure { host } => write!(f, "DNS lookup failed for {host}"),
		}
	}
}
impl StdError for MockTransportError {}

#[derive(Clone)]
enum MockBehavior {
	Success,
	Status(u16),
	TransportError(MockTransportError),
}

#[derive(Clone)]
struct MockHttpClient {
	behavior: MockBehavior,
}
impl MockHttpClient {
	fn success() -> Self {
		Self { behavior: MockBehavior::Success }
	}

	fn status(status: u16) -> Self {
		Self { behavior: MockBehavior::Status(status) }
	}

	fn failing(error: MockTransportError) -> Self {
		Self { behavior: MockBehavior::TransportError(error) }
	}
}
impl ProviderHttpClient for MockHttpClient {
	type Handle = MockHttpHandle;

	fn handle(&self) -> Self::Handle {
		MockHttpHandle { behavior: self.behavior.clone() }
	}
}

struct MockHttpHandle {
	behavior: MockBehavior,
}
impl<'a> AsyncHttpClient<'a> for MockHttpHandle {
	type Error = TransportError;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, _request: HttpRequest) -> Self::Future {
		let behavior = self.behavior.clone();

		Box::pin(async move {
			match behavior {
				MockBehavior::Success => Ok(HttpResponse::new(TOKEN_BODY.to_vec())),
				MockBehavior::Status(status) => {
					let mut response = HttpResponse::new(b"{\"error\":\"invalid_client\"}".to_vec());

					*response.status_mut() =
						StatusCode::from_u16(status).map_err(TransportError::network)?;

					Ok(response)
				},
				MockBehavior::TransportError(error) => Err(TransportError::network(error)),
			}
		})
	}
}
