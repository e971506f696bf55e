//! Game-stats lookup: clan member statistics from the Clash of Clans API.
//!
//! Read-only and independent of rosters; results are shown next to the registrations.

use crate::models::{ClashPlayer, LegendStatistics};
use serde::Deserialize;

/// Public API root used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.clashofclans.com/v1";

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("API Key di Clash of Clans non configurata")]
    MissingApiKey,
    #[error("richiesta fallita: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API Error: {0}")]
    Status(u16),
    #[error("risposta non valida: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Member list envelope returned by `/clans/{tag}/members`.
#[derive(Debug, Deserialize)]
struct MemberList {
    #[serde(default)]
    items: Vec<Member>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Member {
    name: String,
    tag: String,
    #[serde(default)]
    town_hall_level: u32,
    #[serde(default)]
    war_stars: u32,
    #[serde(default)]
    trophies: u32,
    #[serde(default)]
    best_trophies: u32,
    legend_statistics: Option<MemberLegend>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberLegend {
    #[serde(default)]
    legend_trophies: u32,
}

impl From<Member> for ClashPlayer {
    fn from(m: Member) -> Self {
        ClashPlayer {
            name: m.name,
            tag: m.tag,
            town_hall_level: m.town_hall_level,
            war_stars: m.war_stars,
            trophies: m.trophies,
            best_trophies: m.best_trophies,
            legend_statistics: m.legend_statistics.map(|l| LegendStatistics {
                legend_trophies: l.legend_trophies,
            }),
        }
    }
}

/// Decode a `/clans/{tag}/members` response body.
pub fn parse_members(body: &[u8]) -> Result<Vec<ClashPlayer>, StatsError> {
    let list: MemberList = serde_json::from_slice(body)?;
    Ok(list.items.into_iter().map(ClashPlayer::from).collect())
}

/// Members URL for a clan tag, with or without its leading `#`.
pub fn members_url(base_url: &str, clan_tag: &str) -> String {
    let tag = clan_tag.trim().trim_start_matches('#');
    format!("{}/clans/%23{}/members", base_url.trim_end_matches('/'), tag)
}

/// HTTP client for the game API.
#[derive(Clone, Debug)]
pub struct ClashClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ClashClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch the current members of `clan_tag`.
    ///
    /// # Errors
    ///
    /// - `MissingApiKey` if no key was configured (no request is sent)
    /// - `Http` if the request fails, `Status` on a non-2xx answer
    /// - `Decode` if the body is not a member list
    pub async fn clan_members(&self, clan_tag: &str) -> Result<Vec<ClashPlayer>, StatsError> {
        let api_key = self.api_key.as_deref().ok_or(StatsError::MissingApiKey)?;
        let url = members_url(&self.base_url, clan_tag);
        log::debug!("Fetching clan members from {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        parse_members(&body)
    }
}
