//! Clan descriptors (per message-building session) and saved clans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// League tiers offered by the admin form, lowest first.
pub const LEAGUE_TIERS: [&str; 6] = [
    "Bronze League",
    "Silver League",
    "Gold League",
    "Crystal League",
    "Master League",
    "Champion League",
];

/// What the admin types in for one clan: name, how many players it fields, and its league.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClanDescriptor {
    pub name: String,
    /// Advisory: drives the "missing players" line, never enforced.
    #[serde(alias = "participants")]
    pub capacity: u32,
    #[serde(alias = "league")]
    pub league_tier: String,
}

impl ClanDescriptor {
    pub fn new(name: impl Into<String>, capacity: u32, league_tier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity,
            league_tier: league_tier.into(),
        }
    }
}

/// Unique identifier for a saved clan.
pub type ClanId = Uuid;

/// A clan the admin saved for reuse across sessions.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Clan {
    pub id: ClanId,
    #[serde(flatten)]
    pub descriptor: ClanDescriptor,
    pub created_at: DateTime<Utc>,
}

impl Clan {
    pub fn new(descriptor: ClanDescriptor) -> Self {
        Self {
            id: Uuid::new_v4(),
            descriptor,
            created_at: Utc::now(),
        }
    }
}
