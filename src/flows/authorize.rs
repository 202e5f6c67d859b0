//! Consent-screen link construction and redirect `state` checks.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	flows::DiscordClient,
	http::ProviderHttpClient,
	obs::{FlowKind, FlowSpan},
};

const STATE_LEN: usize = 32;

/// Consent-screen link plus the `state` value the redirect must echo back.
///
/// Callers typically stash `state` in a short-lived cookie, redirect the browser to `url`,
/// and call [`AuthorizationRequest::validate_state`] when the provider redirects back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRequest {
	/// Fully-formed authorize URL to send the end user to.
	pub url: Url,
	/// Opaque anti-CSRF value carried through the redirect.
	pub state: String,
}
impl AuthorizationRequest {
	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state { Ok(()) } else { Err(Error::StateMismatch) }
	}
}

impl<C> DiscordClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Builds the consent-screen link with a freshly generated `state`.
	pub fn authorization_request(&self) -> Result<AuthorizationRequest> {
		self.authorization_request_with_state(random_state())
	}

	/// Builds the consent-screen link using a caller-supplied `state`.
	pub fn authorization_request_with_state(
		&self,
		state: impl Into<String>,
	) -> Result<AuthorizationRequest> {
		let _span = FlowSpan::new(FlowKind::AuthorizationCode, "authorization_request").entered();
		let redirect = self.config().validate()?;
		let state = state.into();
		let mut url = self.endpoints().authorization.clone();

		url.query_pairs_mut()
			.append_pair("response_type", "code")
			.append_pair("client_id", &self.config().client_id)
			.append_pair("scope", &self.config().scopes.normalized())
			.append_pair("redirect_uri", redirect.as_str())
			.append_pair("state", &state);

		Ok(AuthorizationRequest { url, state })
	}
}

fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn state_validation_errors_on_mismatch() {
		let request = AuthorizationRequest {
			url: Url::parse("https://discord.com/oauth2/authorize?state=expected")
				.expect("Authorization URL fixture should parse successfully."),
			state: "expected".into(),
		};

		assert!(request.validate_state("expected").is_ok());
		assert!(matches!(request.validate_state("other"), Err(Error::StateMismatch)));
	}

	#[test]
	fn random_state_is_alphanumeric() {
		let state = random_state();

		assert_eq!(state.len(), STATE_LEN);
		assert!(state.bytes().all(|b| b.is_ascii_alphanumeric()));
		assert_ne!(state, random_state());
	}
}
