//! Strongly typed Discord snowflake identifiers.

// std
use std::borrow::Borrow;
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}

			/// Numeric snowflake value.
			pub fn value(&self) -> u64 {
				// Validation guarantees a decimal u64.
				self.0.parse().unwrap_or_default()
			}

			/// Creation instant encoded in the snowflake.
			pub fn created_at(&self) -> OffsetDateTime {
				snowflake_created_at(self.value())
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

/// First millisecond of 2015, the origin of Discord snowflake timestamps.
pub const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (user, guild, connection owner).
		kind: &'static str,
	},
	/// The identifier is not a decimal 64-bit snowflake.
	#[error("{kind} identifier is not a snowflake: {value}.")]
	NotSnowflake {
		/// Kind of identifier (user, guild, connection owner).
		kind: &'static str,
		/// Offending value.
		value: String,
	},
}

def_id! { UserId, "Snowflake identifying a Discord user.", "User" }
def_id! { GuildId, "Snowflake identifying a Discord guild.", "Guild" }

/// Decodes the creation instant embedded in a snowflake.
pub fn snowflake_created_at(snowflake: u64) -> OffsetDateTime {
	let millis = (snowflake >> 22) + DISCORD_EPOCH_MS;

	OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(millis as i64)
}

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if !view.bytes().all(|b| b.is_ascii_digit()) || view.parse::<u64>().is_err() {
		return Err(IdentifierError::NotSnowflake { kind, value: view.to_owned() });
	}

	Ok(())
}
