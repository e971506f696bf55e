//! Data structures for the CWL roster: registrations, clans, roster partitions, stats.

mod clan;
mod message;
mod registration;
mod roster;
mod stats;

pub use clan::{Clan, ClanDescriptor, ClanId, LEAGUE_TIERS};
pub use message::{CwlMessage, MessageId};
pub use registration::{NewRegistration, PlayerRegistration, RegistrationId};
pub use roster::{ClanBucket, RosterError, RosterId, RosterPartition};
pub use stats::{ClashPlayer, LegendStatistics};
