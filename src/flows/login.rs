//! Code-for-key login.

// self
use crate::{
	_prelude::*,
	flows::{DiscordClient, common},
	http::ProviderHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	session::SessionKey,
};

impl<C> DiscordClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Exchanges the authorization code from the consent redirect and mints a session key.
	///
	/// Missing scopes, a missing redirect URI, or an empty code fail with
	/// [`Error::Config`] before any request is sent.
	pub async fn login(&self, code: &str) -> Result<SessionKey> {
		const KIND: FlowKind = FlowKind::AuthorizationCode;

		let span = FlowSpan::new(KIND, "login");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let record = self.token_exchange().exchange_code(code).await?;

				self.mint(&record)
			})
			.await;

		common::record_result(&span, KIND, &result);

		result
	}
}
