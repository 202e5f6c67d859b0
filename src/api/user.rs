//! `users/@me` view.

// self
use crate::{_prelude::*, auth::UserId};

def_flags! {
	/// Public badges encoded in a user's `flags` bitfield.
	UserFlag {
		Staff = 1 << 0, "Discord Employee";
		Partner = 1 << 1, "Partnered Server Owner";
		HypeSquadEvents = 1 << 2, "HypeSquad Events";
		BugHunterLevel1 = 1 << 3, "Bug Hunter";
		HouseBravery = 1 << 6, "HypeSquad House of Bravery";
		HouseBrilliance = 1 << 7, "HypeSquad House of Brilliance";
		HouseBalance = 1 << 8, "HypeSquad House of Balance";
		EarlySupporter = 1 << 9, "Early Supporter";
		TeamUser = 1 << 10, "Team User";
		BugHunterLevel2 = 1 << 14, "Bug Hunter Level 2";
		VerifiedBot = 1 << 16, "Verified Bot";
		VerifiedDeveloper = 1 << 17, "Early Verified Bot Developer";
		CertifiedModerator = 1 << 18, "Moderator Programs Alumni";
		BotHttpInteractions = 1 << 19, "HTTP Interactions Bot";
		ActiveDeveloper = 1 << 22, "Active Developer";
	}
}

/// Nitro subscription tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum PremiumType {
	/// No subscription (also used for unknown tiers).
	#[default]
	None,
	/// Nitro Classic.
	NitroClassic,
	/// Nitro.
	Nitro,
	/// Nitro Basic.
	NitroBasic,
}
impl PremiumType {
	/// Human-readable tier name.
	pub const fn label(self) -> &'static str {
		match self {
			PremiumType::None => "None",
			PremiumType::NitroClassic => "Nitro Classic",
			PremiumType::Nitro => "Nitro",
			PremiumType::NitroBasic => "Nitro Basic",
		}
	}
}
impl From<u8> for PremiumType {
	fn from(value: u8) -> Self {
		match value {
			1 => PremiumType::NitroClassic,
			2 => PremiumType::Nitro,
			3 => PremiumType::NitroBasic,
			_ => PremiumType::None,
		}
	}
}
impl From<PremiumType> for u8 {
	fn from(value: PremiumType) -> Self {
		match value {
			PremiumType::None => 0,
			PremiumType::NitroClassic => 1,
			PremiumType::Nitro => 2,
			PremiumType::NitroBasic => 3,
		}
	}
}

/// Authenticated user as returned by `users/@me`.
///
/// `email` and `verified` are only present when the `email` scope was granted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct User {
	/// Snowflake identifier.
	pub id: UserId,
	/// Unique username.
	pub username: String,
	/// Legacy discriminator; `"0"` for migrated accounts.
	#[serde(default = "default_discriminator")]
	pub discriminator: String,
	/// Display name, if set.
	#[serde(default)]
	pub global_name: Option<String>,
	/// Avatar hash; `a_` prefixed hashes are animated.
	#[serde(default)]
	pub avatar: Option<String>,
	/// Whether the account belongs to a bot.
	#[serde(default)]
	pub bot: bool,
	/// Whether two-factor authentication is enabled.
	#[serde(default)]
	pub mfa_enabled: bool,
	/// Chosen language option.
	#[serde(default)]
	pub locale: Option<String>,
	/// Email address (requires the `email` scope).
	#[serde(default)]
	pub email: Option<String>,
	/// Whether the email has been verified (requires the `email` scope).
	#[serde(default)]
	pub verified: Option<bool>,
	/// Raw badge bitfield.
	#[serde(default)]
	pub flags: u64,
	/// Nitro tier.
	#[serde(default)]
	pub premium_type: PremiumType,
}
impl User {
	/// Account creation instant decoded from the snowflake.
	pub fn created_at(&self) -> OffsetDateTime {
		self.id.created_at()
	}

	/// Badges decoded from [`User::flags`].
	pub fn user_flags(&self) -> Vec<UserFlag> {
		UserFlag::from_bits(self.flags)
	}

	/// Avatar image URL, falling back to the default avatar when no hash is set.
	///
	/// `cdn_base` is normally [`ProviderEndpoints::cdn_base`](crate::provider::ProviderEndpoints).
	pub fn avatar_url(&self, cdn_base: &Url, size: u16) -> String {
		match &self.avatar {
			Some(hash) => format!(
				"{cdn_base}avatars/{}/{hash}.{}?size={size}",
				self.id,
				if hash.starts_with("a_") { "gif" } else { "png" },
			),
			None => format!("{cdn_base}embed/avatars/{}.png", self.default_avatar_index()),
		}
	}

	fn default_avatar_index(&self) -> u64 {
		match self.discriminator.parse::<u64>() {
			Ok(discriminator) if discriminator != 0 => discriminator % 5,
			_ => (self.id.value() >> 22) % 6,
		}
	}
}

fn default_discriminator() -> String {
	"0".into()
}
