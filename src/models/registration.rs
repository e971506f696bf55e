//! PlayerRegistration: a self-registered player waiting to be assigned to a clan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a registration (used by buckets and move commands).
pub type RegistrationId = Uuid;

/// Body of the public registration form.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewRegistration {
    #[serde(alias = "playerName")]
    pub player_name: String,
    /// Tier label shown next to the name, e.g. "TH14".
    #[serde(alias = "thLevel")]
    pub level_tag: String,
}

/// A registered player. Immutable once created.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerRegistration {
    pub id: RegistrationId,
    pub player_name: String,
    pub level_tag: String,
    pub registered_at: DateTime<Utc>,
}

impl PlayerRegistration {
    /// Create a registration with a fresh id, stamped now.
    pub fn new(player_name: impl Into<String>, level_tag: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_name: player_name.into(),
            level_tag: level_tag.into(),
            registered_at: Utc::now(),
        }
    }

    /// The line used in the roll file and in the roster message: `"<name> <level>"`.
    pub fn display_line(&self) -> String {
        format!("{} {}", self.player_name, self.level_tag)
    }
}
