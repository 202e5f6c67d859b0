//! Status code classification shared by token exchanges and resource calls.

// self
use crate::_prelude::*;

/// Closed classification of non-success provider statuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
	/// 400.
	InvalidRequest,
	/// 401.
	InvalidToken,
	/// 403.
	InsufficientPermission,
	/// 404.
	NotFound,
	/// 405.
	MethodNotAllowed,
	/// 429; the caller should back off.
	RateLimited,
	/// 502.
	UpstreamUnavailable,
	/// Any status outside the table.
	Unexpected,
}
impl ProviderErrorKind {
	/// Maps an HTTP status code onto the table.
	pub const fn from_status(status: u16) -> Self {
		match status {
			400 => Self::InvalidRequest,
			401 => Self::InvalidToken,
			403 => Self::InsufficientPermission,
			404 => Self::NotFound,
			405 => Self::MethodNotAllowed,
			429 => Self::RateLimited,
			502 => Self::UpstreamUnavailable,
			_ => Self::Unexpected,
		}
	}

	/// Fixed human-readable reason.
	pub const fn reason(self) -> &'static str {
		match self {
			Self::InvalidRequest => "invalid request",
			Self::InvalidToken => "invalid token",
			Self::InsufficientPermission => "insufficient permission",
			Self::NotFound => "not found",
			Self::MethodNotAllowed => "method not allowed",
			Self::RateLimited => "rate limited",
			Self::UpstreamUnavailable => "upstream unavailable",
			Self::Unexpected => "unexpected provider response",
		}
	}

	/// Returns `true` when the caller should wait before trying again.
	pub const fn should_back_off(self) -> bool {
		matches!(self, Self::RateLimited | Self::UpstreamUnavailable)
	}
}
impl Display for ProviderErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.reason())
	}
}

/// Returns `true` for statuses accepted from resource endpoints.
pub(crate) fn is_success(status: u16) -> bool {
	(200..300).contains(&status)
}

/// Returns `true` for statuses accepted from the token endpoint.
pub(crate) fn is_token_success(status: u16) -> bool {
	matches!(status, 200 | 201)
}
