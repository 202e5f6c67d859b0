//! Runs the whole session lifecycle against a stubbed provider: login, resource call,
//! refresh, and a second resource call with the rotated key.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use discord_oauth2_session::{
	ClientConfig, DiscordClient, http::ReqwestHttpClient, provider::ProviderEndpoints,
	reqwest::Client,
};

const TOKEN_BODY: &str = r#"{"access_token":"demo-access","token_type":"Bearer","expires_in":604800,"refresh_token":"demo-refresh","scope":"identify guilds"}"#;
const REFRESHED_BODY: &str = r#"{"access_token":"demo-access-2","token_type":"Bearer","expires_in":604800,"refresh_token":"demo-refresh-2","scope":"identify guilds"}"#;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let mut token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/oauth2/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let user_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/users/@me");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"id":"80351110224678912","username":"nelly","avatar":null}"#);
		})
		.await;
	let config = ClientConfig::new("1234567890", "demo-secret")
		.with_scopes(["identify", "guilds"])?
		.with_redirect_uri("https://app.example.com/oauth/callback")?;
	// The stub serves a self-signed certificate.
	let http = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = DiscordClient::with_http_client(config, http)
		.with_endpoints(ProviderEndpoints::default().with_api_base(&server.url("/api/"))?);
	let key = client.login("code-from-redirect").await?;

	println!("Session key ({} bytes) is ready to hand to the browser.", key.expose().len());

	let user = client.get_user(&key).await?;

	println!(
		"Logged in as {} (created {}), avatar at {}.",
		user.username,
		user.created_at(),
		user.avatar_url(&client.endpoints().cdn_base, 128)
	);

	token_mock.delete_async().await;
	token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/oauth2/token");
			then.status(200).header("content-type", "application/json").body(REFRESHED_BODY);
		})
		.await;

	let refreshed = client.refresh(&key).await?;

	println!("Refreshed header: {}.", client.authorization_header(&refreshed)?);
	println!("Expired yet? {}.", client.is_expired(&refreshed)?);

	token_mock.assert_async().await;
	user_mock.assert_async().await;

	Ok(())
}
