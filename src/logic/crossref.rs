//! Match registrants against the live clan member list.

use crate::models::{ClashPlayer, PlayerRegistration};
use serde::Serialize;

/// A registrant and the clan member with the same name, if the game API knows one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RegistrantMatch {
    pub registration: PlayerRegistration,
    pub player: Option<ClashPlayer>,
}

/// Pair each registration (in order) with the first member whose name matches, ignoring case
/// and surrounding whitespace.
pub fn cross_reference(
    registrations: &[PlayerRegistration],
    players: &[ClashPlayer],
) -> Vec<RegistrantMatch> {
    registrations
        .iter()
        .map(|r| {
            let wanted = r.player_name.trim().to_lowercase();
            let player = players
                .iter()
                .find(|p| p.name.trim().to_lowercase() == wanted)
                .cloned();
            RegistrantMatch {
                registration: r.clone(),
                player,
            }
        })
        .collect()
}
