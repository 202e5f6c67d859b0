//! Refresh orchestration: decode, exchange the embedded refresh token, mint a new key.
//!
//! [`DiscordClient::refresh`] works on expired keys (that is the common case) because the
//! codec never rejects a stale record. The old key is superseded, not mutated; callers should
//! discard it once the new key is stored.
//!
//! By default two concurrent refreshes of one key each reach the provider, and the loser may
//! see a provider error for the already-consumed refresh token. With
//! [`DiscordClient::with_refresh_coalescing`] enabled, callers in the same process queue on a
//! per-refresh-token slot: the first one performs the exchange and the callers already queued
//! behind it receive its key. The slot leaves the map as soon as the exchanging caller returns
//! or is cancelled, so a refresh that starts after that opens a new exchange. A failed or
//! cancelled exchange leaves the slot empty, so the next queued caller tries again.

mod metrics;

pub use metrics::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	flows::{DiscordClient, common},
	http::ProviderHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	session::SessionKey,
};

impl<C> DiscordClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Exchanges the key's refresh token and returns a newly minted key.
	pub async fn refresh(&self, key: &SessionKey) -> Result<SessionKey> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.refresh_metrics.record_attempt();

				let outcome = self.refresh_key(key).await;

				match &outcome {
					Ok(_) => self.refresh_metrics.record_success(),
					Err(_) => self.refresh_metrics.record_failure(),
				}

				outcome
			})
			.await;

		common::record_result(&span, KIND, &result);

		result
	}

	async fn refresh_key(&self, key: &SessionKey) -> Result<SessionKey> {
		let record = self.decode(key)?;
		let refresh_token = record
			.refresh_token
			.as_ref()
			.filter(|secret| !secret.is_empty())
			.ok_or(ConfigError::MissingRefreshToken)?;
		let Some(guards) = self.refresh_guards.as_deref() else {
			return self.exchange_and_mint(refresh_token.expose()).await;
		};
		let lease = common::RefreshLease::acquire(guards, refresh_token.expose());
		let mut shared = lease.slot().lock().await;

		if let Some(minted) = shared.as_ref() {
			self.refresh_metrics.record_coalesced();

			return Ok(minted.clone());
		}

		let minted = self.exchange_and_mint(refresh_token.expose()).await;

		if let Ok(minted) = &minted {
			*shared = Some(minted.clone());
		}

		minted
	}

	async fn exchange_and_mint(&self, refresh_token: &str) -> Result<SessionKey> {
		let record = self.token_exchange().exchange_refresh(refresh_token).await?;

		self.mint(&record)
	}
}
