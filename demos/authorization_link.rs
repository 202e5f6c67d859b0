//! Builds the consent-screen link, remembers the issued `state`, and checks it when the
//! provider redirects back.

// std
use std::collections::HashMap;
// crates.io
use color_eyre::Result;
// self
use discord_oauth2_session::{ClientConfig, flows::ReqwestDiscordClient};

fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::new("1234567890", "demo-secret")
		.with_scopes(["identify", "guilds", "connections"])?
		.with_redirect_uri("https://app.example.com/oauth/callback")?;
	let client = ReqwestDiscordClient::new(config);
	let request = client.authorization_request()?;

	println!("Send your user to {}.", request.url);

	let mut pending: HashMap<String, _> = HashMap::new();

	pending.insert(request.state.clone(), request.clone());

	// Simulate the redirect handler looking up the pending request by `state`.
	let returned_state = request.state.clone();

	match pending.remove(&returned_state) {
		Some(stashed) => {
			stashed.validate_state(&returned_state)?;

			println!("State verified; pass the `code` query parameter to DiscordClient::login.");
		},
		None => eprintln!("State `{returned_state}` was not recognized."),
	}

	if let Err(e) = request.validate_state("forged-state") {
		println!("A forged redirect is rejected: {e}");
	}

	Ok(())
}
