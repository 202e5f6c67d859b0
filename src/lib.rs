//! Stateless Discord OAuth 2.0 sessions: exchange authorization codes, mint self-contained signed
//! session keys, refresh them on demand, and fetch the user's profile, guilds, and connections.
//!
//! The caller holds every piece of session state inside an opaque [`SessionKey`]; the
//! [`DiscordClient`] only needs its [`ClientConfig`] to verify, refresh, and use it.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;
pub mod session;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::ClientConfig, flows::DiscordClient, http::ReqwestHttpClient,
		provider::ProviderEndpoints,
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = DiscordClient<ReqwestHttpClient>;

	/// Redirect URI configured on every test client.
	pub const TEST_REDIRECT_URI: &str = "https://app.example.com/callback";

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Fully configured test configuration (`identify guilds`, [`TEST_REDIRECT_URI`]).
	pub fn test_client_config(client_id: &str, client_secret: &str) -> ClientConfig {
		ClientConfig::new(client_id, client_secret)
			.with_scopes(["identify", "guilds"])
			.expect("Test scopes should parse.")
			.with_redirect_uri(TEST_REDIRECT_URI)
			.expect("Test redirect URI should parse.")
	}

	/// Constructs a [`DiscordClient`] whose API base points at `api_base` (an httpmock URL).
	pub fn build_reqwest_test_client(
		api_base: &str,
		client_id: &str,
		client_secret: &str,
	) -> ReqwestTestClient {
		let endpoints = ProviderEndpoints::default()
			.with_api_base(api_base)
			.expect("Mock server base URL should parse.");

		DiscordClient::with_http_client(
			test_client_config(client_id, client_secret),
			test_reqwest_http_client(),
		)
		.with_endpoints(endpoints)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use flows::DiscordClient;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use session::SessionKey;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
