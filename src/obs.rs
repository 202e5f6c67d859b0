//! Optional observability helpers for client flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `discord_oauth2.flow` carrying `flow` and
//!   `operation` (`login`, `refresh`, `get_user`, ...). Failed flows also fill in `failure`
//!   (a [`FailureClass`] label) and, for Discord error responses, the HTTP `status`.
//! - Enable `metrics` to increment `discord_oauth2_flow_total` (labels `flow`, `outcome`) for
//!   every attempt and result, and `discord_oauth2_flow_failures_total` (labels `flow`,
//!   `failure`, `status`) for every failure.
//!
//! Secrets never reach either sink; only labels, operation names, and status codes are recorded.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Flow kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authorization link + code exchange.
	AuthorizationCode,
	/// Refresh token exchange.
	Refresh,
	/// Authenticated resource call.
	Resource,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::AuthorizationCode => "authorization_code",
			FlowKind::Refresh => "refresh",
			FlowKind::Resource => "resource",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Coarse failure class of a flow, derived from the returned [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureClass {
	/// Local configuration or input problem; nothing was sent.
	Config,
	/// Session key failed verification.
	InvalidCredential,
	/// Session key is past its expiry.
	SessionExpired,
	/// Discord answered with an error status.
	Provider,
	/// The request never completed.
	Transport,
	/// A success response could not be decoded.
	Response,
	/// Callback state did not match the issued link.
	StateMismatch,
}
impl FailureClass {
	/// Classifies an error returned by a client operation.
	pub fn of(error: &Error) -> Self {
		match error {
			Error::Config(_) => Self::Config,
			Error::InvalidCredential { .. } => Self::InvalidCredential,
			Error::SessionExpired { .. } => Self::SessionExpired,
			Error::Provider(_) => Self::Provider,
			Error::Transport(_) => Self::Transport,
			Error::Response(_) => Self::Response,
			Error::StateMismatch => Self::StateMismatch,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FailureClass::Config => "config",
			FailureClass::InvalidCredential => "invalid_credential",
			FailureClass::SessionExpired => "session_expired",
			FailureClass::Provider => "provider",
			FailureClass::Transport => "transport",
			FailureClass::Response => "response",
			FailureClass::StateMismatch => "state_mismatch",
		}
	}
}
impl Display for FailureClass {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
