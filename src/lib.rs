//! CWL roster web app: library with models, roster logic and the external adapters.

pub mod config;
pub mod export;
pub mod logic;
pub mod models;
pub mod stats;
pub mod store;

pub use config::Config;
pub use export::{export_pdf, ExportError};
pub use logic::{
    build_roster, cross_reference, move_down, move_player, move_up, render_message,
    RegistrantMatch,
};
pub use models::{
    Clan, ClanBucket, ClanDescriptor, ClanId, ClashPlayer, CwlMessage, LegendStatistics,
    MessageId, NewRegistration, PlayerRegistration, RegistrationId, RosterError, RosterId,
    RosterPartition, LEAGUE_TIERS,
};
pub use stats::{ClashClient, StatsError};
pub use store::{RegistrationStore, StoreError};
