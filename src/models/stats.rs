//! Live player statistics from the game API.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LegendStatistics {
    pub legend_trophies: u32,
}

/// One clan member as reported by the game API.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClashPlayer {
    pub name: String,
    pub tag: String,
    pub town_hall_level: u32,
    pub war_stars: u32,
    pub trophies: u32,
    pub best_trophies: u32,
    pub legend_statistics: Option<LegendStatistics>,
}
