#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
// self
use common::{CLIENT_ID, CLIENT_SECRET, TOKEN_PATH};
use discord_oauth2_session::{
	Error, error::ResponseError, flows::ReqwestDiscordClient, provider::ProviderErrorKind,
};

fn client(server: &MockServer) -> ReqwestDiscordClient {
	common::mock_client(&server.base_url())
}

#[tokio::test]
async fn login_then_refresh_rotates_the_session_key() {
	let server = MockServer::start_async().await;
	let client = client(&server);
	let first = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.header("content-type", "application/x-www-form-urlencoded")
				.header("accept", "application/json");
			then.status(200)
				.header("content-type", "application/json")
				.body(common::token_body("AT1", "RT1"));
		})
		.await;
	let key = client.login("codeX").await.expect("Login should mint a session key.");

	first.assert_async().await;

	assert!(!client.is_expired(&key).expect("Fresh key should decode."));
	assert_eq!(client.authorization_header(&key).expect("Fresh key is usable."), "Bearer AT1");

	let record = client.decode(&key).expect("Fresh key should decode.");

	assert_eq!(record.expires_in, 600);
	assert_eq!(record.scope, "identify guilds");
	assert_eq!(record.refresh_token.as_ref().map(|t| t.expose()), Some("RT1"));

	first.delete_async().await;

	let second = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200)
				.header("content-type", "application/json")
				.body(common::token_body("AT2", "RT2"));
		})
		.await;
	let refreshed = client.refresh(&key).await.expect("Refresh should mint a new key.");

	second.assert_async().await;

	assert_ne!(refreshed.expose(), key.expose());
	assert_eq!(client.authorization_header(&refreshed).expect("New key is usable."), "Bearer AT2");
	assert_eq!(
		client
			.decode(&refreshed)
			.expect("New key should decode.")
			.refresh_token
			.map(|t| t.expose().to_owned()),
		Some("RT2".into())
	);
	// The superseded key still decodes; callers decide when to drop it.
	assert_eq!(client.authorization_header(&key).expect("Old key still decodes."), "Bearer AT1");
	assert_eq!(client.refresh_metrics.successes(), 1);
}

#[tokio::test]
async fn token_endpoint_accepts_created_status() {
	let server = MockServer::start_async().await;
	let client = client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(201)
				.header("content-type", "application/json")
				.body(common::token_body("AT1", "RT1"));
		})
		.await;
	let key = client.login("codeX").await.expect("201 should count as success.");

	mock.assert_async().await;

	assert_eq!(client.authorization_header(&key).expect("Key is usable."), "Bearer AT1");
}

#[tokio::test]
async fn provider_statuses_map_to_fixed_reasons() {
	let table = [
		(400, ProviderErrorKind::InvalidRequest, "invalid request"),
		(401, ProviderErrorKind::InvalidToken, "invalid token"),
		(403, ProviderErrorKind::InsufficientPermission, "insufficient permission"),
		(404, ProviderErrorKind::NotFound, "not found"),
		(405, ProviderErrorKind::MethodNotAllowed, "method not allowed"),
		(429, ProviderErrorKind::RateLimited, "rate limited"),
		(502, ProviderErrorKind::UpstreamUnavailable, "upstream unavailable"),
		(418, ProviderErrorKind::Unexpected, "unexpected provider response"),
	];

	for (status, kind, reason) in table {
		let server = MockServer::start_async().await;
		let client = client(&server);
		let mock = server
			.mock_async(|when, then| {
				when.method(POST).path(TOKEN_PATH);
				then.status(status)
					.header("content-type", "application/json")
					.body(r#"{"error":"invalid_grant","error_description":"Invalid \"code\" in request."}"#);
			})
			.await;
		let err = client.login("codeX").await.expect_err("Non-success statuses must fail.");

		mock.assert_async().await;

		let Error::Provider(provider) = err else {
			panic!("Status {status} should map to a provider error.");
		};

		assert_eq!(provider.status, status);
		assert_eq!(provider.kind, kind);
		assert_eq!(provider.reason(), reason);
		assert_eq!(provider.request, "exchange_code");
		assert_eq!(provider.message.as_deref(), Some("Invalid \"code\" in request."));
	}
}

#[tokio::test]
async fn rate_limit_carries_retry_after() {
	let server = MockServer::start_async().await;
	let client = client(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(429)
				.header("retry-after", "17")
				.header("content-type", "application/json")
				.body(r#"{"message":"You are being rate limited.","retry_after":17.0,"global":false}"#);
		})
		.await;
	let err = client.login("codeX").await.expect_err("429 must fail.");

	assert_eq!(err.provider_status(), Some(429));

	let Error::Provider(provider) = err else { panic!("429 should be a provider error.") };

	assert!(provider.kind.should_back_off());
	assert_eq!(provider.retry_after, Some(time::Duration::seconds(17)));
	assert_eq!(provider.message.as_deref(), Some("You are being rate limited."));
}

#[tokio::test]
async fn malformed_token_bodies_are_response_errors() {
	let server = MockServer::start_async().await;
	let client = client(&server);
	let mut mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body("{not json");
		})
		.await;
	let err = client.login("codeX").await.expect_err("Malformed JSON must fail.");

	assert!(matches!(err, Error::Response(ResponseError::Parse { status: 200, .. })));

	mock.delete_async().await;
	mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"AT1","token_type":"Bearer","refresh_token":"RT1"}"#);
		})
		.await;

	let err = client.login("codeX").await.expect_err("Missing expires_in must fail.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Response(ResponseError::MissingExpiresIn)));

	mock.delete_async().await;

	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"AT1","expires_in":0}"#);
		})
		.await;
	let err = client.login("codeX").await.expect_err("Zero lifetime must fail.");

	assert!(matches!(err, Error::Response(ResponseError::NonPositiveExpiresIn)));
}

#[tokio::test]
async fn foreign_secret_cannot_read_keys() {
	let server = MockServer::start_async().await;
	let client = client(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body(common::token_body("AT1", "RT1"));
		})
		.await;
	let key = client.login("codeX").await.expect("Login should succeed.");
	let other = ReqwestDiscordClient::new(
		discord_oauth2_session::ClientConfig::new(CLIENT_ID, format!("{CLIENT_SECRET}-rotated"))
			.with_scopes(["identify"])
			.expect("Scopes should parse.")
			.with_redirect_uri(common::REDIRECT_URI)
			.expect("Redirect should parse."),
	);

	assert!(matches!(other.decode(&key), Err(Error::InvalidCredential { .. })));
	assert!(matches!(other.refresh(&key).await, Err(Error::InvalidCredential { .. })));
}
