//! `users/@me/guilds` view and permission bitfield decoding.

// crates.io
use serde::{Deserializer, de::Error as DeError};
// self
use crate::{_prelude::*, auth::GuildId};

def_flags! {
	/// Guild-level permissions granted to the current user.
	Permission {
		CreateInstantInvite = 1 << 0, "CREATE_INSTANT_INVITE";
		KickMembers = 1 << 1, "KICK_MEMBERS";
		BanMembers = 1 << 2, "BAN_MEMBERS";
		Administrator = 1 << 3, "ADMINISTRATOR";
		ManageChannels = 1 << 4, "MANAGE_CHANNELS";
		ManageGuild = 1 << 5, "MANAGE_GUILD";
		AddReactions = 1 << 6, "ADD_REACTIONS";
		ViewAuditLog = 1 << 7, "VIEW_AUDIT_LOG";
		PrioritySpeaker = 1 << 8, "PRIORITY_SPEAKER";
		Stream = 1 << 9, "STREAM";
		ViewChannel = 1 << 10, "VIEW_CHANNEL";
		SendMessages = 1 << 11, "SEND_MESSAGES";
		SendTtsMessages = 1 << 12, "SEND_TTS_MESSAGES";
		ManageMessages = 1 << 13, "MANAGE_MESSAGES";
		EmbedLinks = 1 << 14, "EMBED_LINKS";
		AttachFiles = 1 << 15, "ATTACH_FILES";
		ReadMessageHistory = 1 << 16, "READ_MESSAGE_HISTORY";
		MentionEveryone = 1 << 17, "MENTION_EVERYONE";
		UseExternalEmojis = 1 << 18, "USE_EXTERNAL_EMOJIS";
		ViewGuildInsights = 1 << 19, "VIEW_GUILD_INSIGHTS";
		Connect = 1 << 20, "CONNECT";
		Speak = 1 << 21, "SPEAK";
		MuteMembers = 1 << 22, "MUTE_MEMBERS";
		DeafenMembers = 1 << 23, "DEAFEN_MEMBERS";
		MoveMembers = 1 << 24, "MOVE_MEMBERS";
		UseVad = 1 << 25, "USE_VAD";
		ChangeNickname = 1 << 26, "CHANGE_NICKNAME";
		ManageNicknames = 1 << 27, "MANAGE_NICKNAMES";
		ManageRoles = 1 << 28, "MANAGE_ROLES";
		ManageWebhooks = 1 << 29, "MANAGE_WEBHOOKS";
		ManageGuildExpressions = 1 << 30, "MANAGE_GUILD_EXPRESSIONS";
		UseApplicationCommands = 1 << 31, "USE_APPLICATION_COMMANDS";
		RequestToSpeak = 1 << 32, "REQUEST_TO_SPEAK";
		ManageEvents = 1 << 33, "MANAGE_EVENTS";
		ManageThreads = 1 << 34, "MANAGE_THREADS";
		CreatePublicThreads = 1 << 35, "CREATE_PUBLIC_THREADS";
		CreatePrivateThreads = 1 << 36, "CREATE_PRIVATE_THREADS";
		UseExternalStickers = 1 << 37, "USE_EXTERNAL_STICKERS";
		SendMessagesInThreads = 1 << 38, "SEND_MESSAGES_IN_THREADS";
		UseEmbeddedActivities = 1 << 39, "USE_EMBEDDED_ACTIVITIES";
		ModerateMembers = 1 << 40, "MODERATE_MEMBERS";
	}
}

/// Raw permission bitfield; the API sends it as a decimal string, older payloads as a number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PermissionSet(pub u64);
impl PermissionSet {
	/// Returns true if every bit of `permission` is set.
	pub fn contains(self, permission: Permission) -> bool {
		self.0 & permission.bits() == permission.bits()
	}

	/// Named permissions present in the bitfield, in bit order.
	pub fn to_vec(self) -> Vec<Permission> {
		Permission::from_bits(self.0)
	}
}
impl<'de> Deserialize<'de> for PermissionSet {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Number(u64),
			Text(String),
		}

		match Raw::deserialize(deserializer)? {
			Raw::Number(bits) => Ok(Self(bits)),
			Raw::Text(text) => text.trim().parse().map(Self).map_err(|_| {
				DeError::custom(format!("permissions must be a decimal bitfield, got {text:?}"))
			}),
		}
	}
}

/// Partial guild as returned by `users/@me/guilds`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Guild {
	/// Snowflake identifier.
	pub id: GuildId,
	/// Display name.
	pub name: String,
	/// Icon hash; `a_` prefixed hashes are animated.
	#[serde(default)]
	pub icon: Option<String>,
	/// Whether the current user owns the guild.
	#[serde(default)]
	pub owner: bool,
	/// Current user's permissions in the guild (zero when omitted).
	#[serde(default)]
	pub permissions: PermissionSet,
	/// Enabled guild features.
	#[serde(default)]
	pub features: Vec<String>,
}
impl Guild {
	/// Creation instant decoded from the snowflake.
	pub fn created_at(&self) -> OffsetDateTime {
		self.id.created_at()
	}

	/// Named permissions held by the current user.
	pub fn permission_list(&self) -> Vec<Permission> {
		self.permissions.to_vec()
	}

	/// Icon image URL, if the guild has an icon.
	pub fn icon_url(&self, cdn_base: &Url, size: u16) -> Option<String> {
		let hash = self.icon.as_deref()?;
		let ext = if hash.starts_with("a_") { "gif" } else { "png" };

		Some(format!("{cdn_base}icons/{}/{hash}.{ext}?size={size}", self.id))
	}
}
