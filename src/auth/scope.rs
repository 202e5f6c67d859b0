//! Discord scope vocabulary and normalized scope sets.

// std
use std::{
	collections::BTreeSet,
	slice::Iter,
};
// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError, ser::SerializeSeq};
// self
use crate::_prelude::*;

macro_rules! def_scopes {
	($($variant:ident => $value:literal, $doc:literal;)+) => {
		/// Closed set of OAuth2 scopes understood by Discord.
		///
		/// Unknown strings are rejected at configuration time so a typo never reaches the
		/// consent screen.
		#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
		pub enum Scope {
			$(
				#[doc = $doc]
				$variant,
			)+
		}
		impl Scope {
			/// Every scope in declaration order.
			pub const ALL: &'static [Scope] = &[$(Scope::$variant,)+];

			/// Wire representation of the scope.
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Scope::$variant => $value,)+
				}
			}
		}
		impl FromStr for Scope {
			type Err = ScopeValidationError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($value => Ok(Scope::$variant),)+
					"" => Err(ScopeValidationError::Empty),
					other => Err(ScopeValidationError::Unknown { scope: other.to_owned() }),
				}
			}
		}
	};
}

def_scopes! {
	ActivitiesRead => "activities.read", "Read the user's activities.";
	ActivitiesWrite => "activities.write", "Update the user's activities.";
	ApplicationsBuildsRead => "applications.builds.read", "Read build data for the user's applications.";
	ApplicationsBuildsUpload => "applications.builds.upload", "Upload builds for the user's applications.";
	ApplicationsCommands => "applications.commands", "Add commands to a guild.";
	ApplicationsCommandsUpdate => "applications.commands.update", "Update the application's commands.";
	ApplicationsCommandsPermissionsUpdate => "applications.commands.permissions.update", "Update command permissions in guilds the user can manage.";
	ApplicationsEntitlements => "applications.entitlements", "Read entitlements for the user's applications.";
	ApplicationsStoreUpdate => "applications.store.update", "Manage the user's store listings.";
	Bot => "bot", "Add a bot to a guild.";
	Connections => "connections", "Read the user's third-party connections.";
	DmChannelsRead => "dm_channels.read", "See the user's direct messages and group DMs.";
	Email => "email", "Read the user's email address.";
	GdmJoin => "gdm.join", "Join the user to a group DM.";
	Guilds => "guilds", "List the guilds the user is in.";
	GuildsJoin => "guilds.join", "Join the user to a guild.";
	GuildsMembersRead => "guilds.members.read", "Read the user's member object in their guilds.";
	Identify => "identify", "Read the user's profile without email.";
	MessagesRead => "messages.read", "Read messages from channels the user is in (local RPC only).";
	Openid => "openid", "OpenID Connect id_token issuance.";
	RelationshipsRead => "relationships.read", "Read the user's friends and blocked users.";
	RoleConnectionsWrite => "role_connections.write", "Update the user's role connection metadata.";
	Rpc => "rpc", "Control the user's local client over RPC.";
	RpcActivitiesWrite => "rpc.activities.write", "Update activities over RPC.";
	RpcNotificationsRead => "rpc.notifications.read", "Receive notifications over RPC.";
	RpcVoiceRead => "rpc.voice.read", "Read voice settings over RPC.";
	RpcVoiceWrite => "rpc.voice.write", "Update voice settings over RPC.";
	Voice => "voice", "Connect to voice on the user's behalf.";
	WebhookIncoming => "webhook.incoming", "Create an incoming webhook.";
}
impl AsRef<str> for Scope {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}
impl Display for Scope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
	/// The scope is not part of the provider vocabulary.
	#[error("Scope is not recognized: {scope}.")]
	Unknown {
		/// The offending scope string.
		scope: String,
	},
}

/// Normalized set of Discord scopes.
///
/// Scopes are deduplicated and kept in declaration order so equality and the
/// space-delimited wire form stay stable regardless of input order.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeSet {
	scopes: Arc<[Scope]>,
}
impl ScopeSet {
	/// Creates a normalized scope set from typed scopes.
	pub fn new<I>(scopes: I) -> Self
	where
		I: IntoIterator<Item = Scope>,
	{
		let set = scopes.into_iter().collect::<BTreeSet<_>>();

		Self { scopes: Arc::from(set.into_iter().collect::<Vec<_>>()) }
	}

	/// Parses scope strings against the closed vocabulary.
	///
	/// Each entry may itself hold several scopes separated by whitespace or a URL-encoded
	/// space (`%20`), matching what the provider echoes back in token responses.
	pub fn parse<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut set = BTreeSet::new();

		for entry in scopes {
			let entry = entry.as_ref();

			if entry.trim().is_empty() {
				return Err(ScopeValidationError::Empty);
			}

			for token in entry.replace("%20", " ").split_whitespace() {
				set.insert(Scope::from_str(token)?);
			}
		}

		Ok(Self { scopes: Arc::from(set.into_iter().collect::<Vec<_>>()) })
	}

	/// Number of distinct scopes.
	pub fn len(&self) -> usize {
		self.scopes.len()
	}

	/// Returns true if no scopes are defined.
	pub fn is_empty(&self) -> bool {
		self.scopes.is_empty()
	}

	/// Returns true if the set contains the provided scope.
	pub fn contains(&self, scope: Scope) -> bool {
		self.scopes.binary_search(&scope).is_ok()
	}

	/// Iterator over normalized scopes.
	pub fn iter(&self) -> impl Iterator<Item = Scope> + '_ {
		self.scopes.iter().copied()
	}

	/// Returns the normalized string representation (space-delimited).
	pub fn normalized(&self) -> String {
		self.scopes.iter().map(|scope| scope.as_str()).collect::<Vec<_>>().join(" ")
	}

	/// Returns the underlying slice of scopes.
	pub fn as_slice(&self) -> &[Scope] {
		&self.scopes
	}
}
impl Debug for ScopeSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ScopeSet").field(&self.normalized()).finish()
	}
}
impl Display for ScopeSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.normalized())
	}
}
impl FromIterator<Scope> for ScopeSet {
	fn from_iter<T: IntoIterator<Item = Scope>>(iter: T) -> Self {
		Self::new(iter)
	}
}

/// Iterator over scopes in a [`ScopeSet`].
pub struct ScopeIter<'a> {
	inner: Iter<'a, Scope>,
}
impl Iterator for ScopeIter<'_> {
	type Item = Scope;

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().copied()
	}
}
impl<'a> IntoIterator for &'a ScopeSet {
	type IntoIter = ScopeIter<'a>;
	type Item = Scope;

	fn into_iter(self) -> Self::IntoIter {
		ScopeIter { inner: self.scopes.iter() }
	}
}
impl FromStr for ScopeSet {
	type Err = ScopeValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.is_empty() {
			return Ok(Self::default());
		}

		Self::parse([s])
	}
}
impl Serialize for ScopeSet {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(self.scopes.len()))?;

		for scope in self.scopes.iter() {
			seq.serialize_element(scope.as_str())?;
		}

		seq.end()
	}
}
impl<'de> Deserialize<'de> for ScopeSet {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let values = <Vec<String>>::deserialize(deserializer)?;

		ScopeSet::parse(values).map_err(DeError::custom)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn scopes_normalize_in_declaration_order() {
		let lhs = ScopeSet::parse(["identify", "guilds", "guilds"])
			.expect("Left-hand scope set should be valid.");
		let rhs = ScopeSet::new([Scope::Guilds, Scope::Identify]);

		assert_eq!(lhs, rhs);
		assert_eq!(lhs.normalized(), "guilds identify");
		assert_eq!(lhs.len(), 2);
	}

	#[test]
	fn unknown_and_empty_scopes_are_rejected() {
		let err = ScopeSet::parse(["identify", "admin"]).expect_err("Unknown scopes must fail.");

		assert_eq!(err, ScopeValidationError::Unknown { scope: "admin".into() });
		assert_eq!(ScopeSet::parse([""]), Err(ScopeValidationError::Empty));
		assert!(ScopeSet::from_str("   ").is_err(), "Whitespace-only input must be rejected.");
		assert!(ScopeSet::from_str("").expect("Empty string is an empty set.").is_empty());
	}

	#[test]
	fn url_encoded_and_space_separated_lists_parse() {
		let encoded =
			ScopeSet::from_str("identify%20email").expect("URL-encoded list should parse.");
		let spaced = ScopeSet::from_str("email identify").expect("Spaced list should parse.");

		assert_eq!(encoded, spaced);
		assert!(encoded.contains(Scope::Email));
		assert!(!encoded.contains(Scope::Guilds));
	}

	#[test]
	fn every_scope_round_trips_through_its_wire_name() {
		for scope in Scope::ALL {
			assert_eq!(Scope::from_str(scope.as_str()), Ok(*scope));
		}
	}

	#[test]
	fn serde_uses_wire_names() {
		let set = ScopeSet::new([Scope::Identify, Scope::GuildsJoin]);
		let json = serde_json::to_string(&set).expect("Scope set should serialize.");

		assert_eq!(json, "[\"guilds.join\",\"identify\"]");

		let back: ScopeSet = serde_json::from_str(&json).expect("Scope set should deserialize.");

		assert_eq!(back, set);
		assert!(serde_json::from_str::<ScopeSet>("[\"nope\"]").is_err());
	}
}
