#![allow(dead_code)]

// std
use std::{pin::Pin, sync::Arc};
// crates.io
use parking_lot::Mutex;
use time::OffsetDateTime;
// self
use discord_oauth2_session::{
	ClientConfig, DiscordClient,
	error::TransportError,
	http::ProviderHttpClient,
	oauth::oauth2::{
		AsyncHttpClient, HttpRequest, HttpResponse,
		http::{StatusCode, header::RETRY_AFTER},
	},
	provider::ProviderEndpoints,
	session::ManualClock,
};
#[cfg(feature = "reqwest")]
use discord_oauth2_session::{flows::ReqwestDiscordClient, http::ReqwestHttpClient, reqwest::Client};

pub const CLIENT_ID: &str = "1234567890";
pub const CLIENT_SECRET: &str = "client-secret";
pub const REDIRECT_URI: &str = "https://app.example.com/callback";
pub const TOKEN_PATH: &str = "/api/oauth2/token";

/// Fully configured client settings (`identify guilds`).
pub fn config() -> ClientConfig {
	ClientConfig::new(CLIENT_ID, CLIENT_SECRET)
		.with_scopes(["identify", "guilds"])
		.expect("Test scopes should parse.")
		.with_redirect_uri(REDIRECT_URI)
		.expect("Test redirect URI should parse.")
}

/// Fixed instant used by clock-driven tests.
pub fn start() -> OffsetDateTime {
	time::macros::datetime!(2025-06-01 12:00 UTC)
}

/// Token endpoint body with the provided tokens and a 600 second lifetime.
pub fn token_body(access: &str, refresh: &str) -> String {
	format!(
		"{{\"access_token\":\"{access}\",\"token_type\":\"Bearer\",\"expires_in\":600,\
		 \"refresh_token\":\"{refresh}\",\"scope\":\"identify guilds\"}}"
	)
}

/// Canned answer served by [`RecordingHttpClient`].
#[derive(Clone, Debug)]
pub enum Canned {
	Respond { status: u16, body: String, retry_after: Option<&'static str> },
	Fail,
}
impl Canned {
	pub fn ok(body: impl Into<String>) -> Self {
		Self::Respond { status: 200, body: body.into(), retry_after: None }
	}

	pub fn status(status: u16, body: impl Into<String>) -> Self {
		Self::Respond { status, body: body.into(), retry_after: None }
	}
}

#[derive(Debug)]
pub struct Recorded {
	pub method: String,
	pub uri: String,
	pub authorization: Option<String>,
	pub body: String,
}

/// In-memory transport that records every request and replays queued answers in order.
#[derive(Clone, Default)]
pub struct RecordingHttpClient {
	requests: Arc<Mutex<Vec<Recorded>>>,
	answers: Arc<Mutex<Vec<Canned>>>,
}
impl RecordingHttpClient {
	pub fn with_answers(answers: impl IntoIterator<Item = Canned>) -> Self {
		let client = Self::default();

		client.answers.lock().extend(answers);

		client
	}

	pub fn requests(&self) -> usize {
		self.requests.lock().len()
	}

	pub fn take_requests(&self) -> Vec<Recorded> {
		std::mem::take(&mut *self.requests.lock())
	}
}
impl ProviderHttpClient for RecordingHttpClient {
	type Handle = RecordingHandle;

	fn handle(&self) -> Self::Handle {
		RecordingHandle(self.clone())
	}
}

pub struct RecordingHandle(RecordingHttpClient);
impl<'c> AsyncHttpClient<'c> for RecordingHandle {
	type Error = TransportError;
	type Future = Pin<
		Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>,
	>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let recorded = Recorded {
			method: request.method().to_string(),
			uri: request.uri().to_string(),
			authorization: request
				.headers()
				.get("authorization")
				.and_then(|value| value.to_str().ok())
				.map(ToOwned::to_owned),
			body: String::from_utf8_lossy(request.body()).into_owned(),
		};

		self.0.requests.lock().push(recorded);

		let answer = {
			let mut answers = self.0.answers.lock();

			if answers.is_empty() { Canned::Fail } else { answers.remove(0) }
		};

		Box::pin(async move {
			match answer {
				Canned::Respond { status, body, retry_after } => {
					let mut response = HttpResponse::new(body.into_bytes());

					*response.status_mut() =
						StatusCode::from_u16(status).expect("Canned status should be valid.");

					if let Some(value) = retry_after {
						response
							.headers_mut()
							.insert(RETRY_AFTER, value.parse().expect("Retry-After should parse."));
					}

					Ok(response)
				},
				Canned::Fail => Err(TransportError::Io(std::io::Error::new(
					std::io::ErrorKind::ConnectionReset,
					"connection reset by fake transport",
				))),
			}
		})
	}
}

/// Client over the recording transport with a manual clock.
pub fn recording_client(
	config: ClientConfig,
	http: &RecordingHttpClient,
	clock: &ManualClock,
) -> DiscordClient<RecordingHttpClient> {
	DiscordClient::with_http_client(config, http.clone()).with_clock(clock.clone())
}

/// Endpoint set whose API base lives under `/api/` on `base` (e.g. an httpmock server).
pub fn endpoints(base: &str) -> ProviderEndpoints {
	ProviderEndpoints::default()
		.with_api_base(&format!("{base}/api/"))
		.expect("Mock API base should parse.")
}

/// Reqwest transport that trusts the self-signed certificates served by `httpmock`.
#[cfg(feature = "reqwest")]
pub fn insecure_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Insecure test client should build.");

	ReqwestHttpClient::with_client(client)
}

/// Reqwest-backed client whose API base is `/api/` on the mock server at `base`.
#[cfg(feature = "reqwest")]
pub fn mock_client(base: &str) -> ReqwestDiscordClient {
	DiscordClient::with_http_client(config(), insecure_http_client()).with_endpoints(endpoints(base))
}
