//! Opaque session key handed to callers.

// self
use crate::_prelude::*;

/// Signed, self-describing credential held by the caller (e.g. in an HTTP-only cookie).
///
/// The string uses only URL-safe characters (base64url segments joined by `.`). It is a
/// bearer secret: anyone who can read it can recover the embedded tokens, so it redacts
/// itself in `Debug`/`Display`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);
impl SessionKey {
	/// Wraps a key previously handed out by this crate.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw key string for transport (cookie, header).
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Consumes the key and returns the raw string.
	pub fn into_inner(self) -> String {
		self.0
	}
}
impl From<String> for SessionKey {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for SessionKey {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Debug for SessionKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SessionKey").field(&"<redacted>").finish()
	}
}
impl Display for SessionKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
