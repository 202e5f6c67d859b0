//! `users/@me/connections` view.

// self
use crate::_prelude::*;

/// Third-party account linked to the user (requires the `connections` scope).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Connection {
	/// Account identifier on the third-party service.
	pub id: String,
	/// Account name on the third-party service.
	pub name: String,
	/// Service key (`twitch`, `github`, `steam`, ...).
	#[serde(rename = "type")]
	pub service: String,
	/// Whether the user revoked the connection.
	#[serde(default)]
	pub revoked: bool,
	/// Whether the connection is verified.
	#[serde(default)]
	pub verified: bool,
	/// Whether friend sync is enabled.
	#[serde(default)]
	pub friend_sync: bool,
	/// Whether activities from this connection show up in presence.
	#[serde(default)]
	pub show_activity: bool,
	/// Whether the connection has a matching link on the service's side.
	#[serde(default)]
	pub two_way_link: bool,
	/// `0` = only the user, `1` = everyone.
	#[serde(default)]
	pub visibility: u8,
}
impl Connection {
	/// Whether the connection is shown on the user's public profile.
	pub fn is_public(&self) -> bool {
		self.visibility == 1
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn visibility_and_defaults() {
		let connections: Vec<Connection> = serde_json::from_str(
			r#"[
				{"id":"1","name":"nelly","type":"github","verified":true,"visibility":1,"friend_sync":false,"show_activity":true},
				{"id":"2","name":"nelly_tv","type":"twitch","revoked":true}
			]"#,
		)
		.expect("Connection fixtures should deserialize.");

		assert_eq!(connections[0].service, "github");
		assert!(connections[0].is_public());
		assert!(connections[0].show_activity);
		assert!(!connections[1].is_public());
		assert!(connections[1].revoked);
		assert!(!connections[1].verified);
	}
}
