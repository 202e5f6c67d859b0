#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
use time::Duration;
// self
use common::TOKEN_PATH;
use discord_oauth2_session::{
	Error, SessionKey,
	api::{Permission, PremiumType, UserFlag},
	flows::ReqwestDiscordClient,
	provider::ProviderErrorKind,
	session::ManualClock,
};

const USER_BODY: &str = r#"{
	"id": "80351110224678912",
	"username": "nelly",
	"discriminator": "1337",
	"global_name": "Nelly",
	"avatar": "8342729096ea3675442027381ff50dfe",
	"verified": true,
	"email": "nelly@discord.com",
	"flags": 64,
	"premium_type": 2,
	"public_flags": 64
}"#;
const GUILDS_BODY: &str = r#"[
	{"id":"80351110224678912","name":"1337 Krew","icon":"8342729096ea3675442027381ff50dfe","owner":true,"permissions":"2147483647","features":["COMMUNITY","NEWS"]},
	{"id":"41771983423143937","name":"Lurkers","icon":null,"owner":false,"permissions":"1024","features":[]}
]"#;
const CONNECTIONS_BODY: &str = r#"[
	{"id":"nelly-gh","name":"nelly","type":"github","verified":true,"friend_sync":true,"show_activity":true,"two_way_link":false,"visibility":1}
]"#;

async fn logged_in(server: &MockServer, clock: &ManualClock) -> (ReqwestDiscordClient, SessionKey) {
	let client = common::mock_client(&server.base_url()).with_clock(clock.clone());
	let mut mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body(common::token_body("AT1", "RT1"));
		})
		.await;
	let key = client.login("codeX").await.expect("Login should succeed.");

	mock.delete_async().await;

	(client, key)
}

#[tokio::test]
async fn resources_decode_with_the_session_header() {
	let server = MockServer::start_async().await;
	let clock = ManualClock::new(common::start());
	let (client, key) = logged_in(&server, &clock).await;
	let user_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/users/@me").header("authorization", "Bearer AT1");
			then.status(200).header("content-type", "application/json").body(USER_BODY);
		})
		.await;
	let guilds_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/users/@me/guilds").header("authorization", "Bearer AT1");
			then.status(200).header("content-type", "application/json").body(GUILDS_BODY);
		})
		.await;
	let connections_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/users/@me/connections")
				.header("authorization", "Bearer AT1");
			then.status(200).header("content-type", "application/json").body(CONNECTIONS_BODY);
		})
		.await;
	let user = client.get_user(&key).await.expect("User should decode.");
	let guilds = client.get_guilds(&key).await.expect("Guilds should decode.");
	let connections = client.get_connections(&key).await.expect("Connections should decode.");

	user_mock.assert_async().await;
	guilds_mock.assert_async().await;
	connections_mock.assert_async().await;

	assert_eq!(user.id.value(), 80_351_110_224_678_912);
	assert_eq!(user.global_name.as_deref(), Some("Nelly"));
	assert_eq!(user.email.as_deref(), Some("nelly@discord.com"));
	assert_eq!(user.premium_type, PremiumType::Nitro);
	assert_eq!(user.user_flags(), vec![UserFlag::HouseBravery]);
	assert_eq!(
		user.avatar_url(&client.endpoints().cdn_base, 128),
		"https://cdn.discordapp.com/avatars/80351110224678912/8342729096ea3675442027381ff50dfe.png?size=128"
	);

	assert_eq!(guilds.len(), 2);
	assert!(guilds[0].owner);
	assert!(guilds[0].permissions.contains(Permission::Administrator));
	assert_eq!(guilds[0].permission_list().len(), 31);
	assert_eq!(guilds[1].permission_list(), vec![Permission::ViewChannel]);
	assert!(guilds[1].icon_url(&client.endpoints().cdn_base, 64).is_none());

	assert_eq!(connections.len(), 1);
	assert_eq!(connections[0].service, "github");
	assert!(connections[0].is_public());
}

#[tokio::test]
async fn resource_failures_use_the_status_table() {
	let server = MockServer::start_async().await;
	let clock = ManualClock::new(common::start());
	let (client, key) = logged_in(&server, &clock).await;
	let _unauthorized = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/users/@me");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"message":"401: Unauthorized","code":0}"#);
		})
		.await;
	let _forbidden = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/users/@me/connections");
			then.status(403)
				.header("content-type", "application/json")
				.body(r#"{"message":"Missing Access","code":50001}"#);
		})
		.await;
	let _garbled = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/users/@me/guilds");
			then.status(200).header("content-type", "application/json").body(r#"{"guilds":[]}"#);
		})
		.await;
	let Err(Error::Provider(unauthorized)) = client.get_user(&key).await else {
		panic!("401 should map to a provider error.");
	};

	assert_eq!(unauthorized.kind, ProviderErrorKind::InvalidToken);
	assert_eq!(unauthorized.request, "get_user");
	assert_eq!(unauthorized.message.as_deref(), Some("401: Unauthorized"));

	let Err(Error::Provider(forbidden)) = client.get_connections(&key).await else {
		panic!("403 should map to a provider error.");
	};

	assert_eq!(forbidden.reason(), "insufficient permission");
	assert!(matches!(client.get_guilds(&key).await, Err(Error::Response(_))));
}

#[tokio::test]
async fn expired_keys_are_refused_locally() {
	let server = MockServer::start_async().await;
	let clock = ManualClock::new(common::start());
	let (client, key) = logged_in(&server, &clock).await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/users/@me");
			then.status(200).header("content-type", "application/json").body(USER_BODY);
		})
		.await;

	clock.advance(Duration::seconds(590));

	assert!(matches!(client.get_user(&key).await, Err(Error::SessionExpired { .. })));
	assert!(matches!(client.get_guilds(&key).await, Err(Error::SessionExpired { .. })));

	mock.assert_calls_async(0).await;
}
