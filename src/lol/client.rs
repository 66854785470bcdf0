use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use super::error::{LolError, Result};
use super::region::{Platform, RoutingRegion};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summoner {
    pub puuid: String,
    pub profile_icon_id: i64,
    pub summoner_level: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntry {
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: i64,
    pub wins: i64,
    pub losses: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchDetail {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    pub game_mode: String,
    pub game_duration: i64,
    pub game_end_timestamp: Option<i64>,
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub puuid: String,
    pub champion_name: String,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub win: bool,
    #[serde(default)]
    pub total_minions_killed: i64,
    #[serde(default)]
    pub neutral_minions_killed: i64,
}

/// The Riot endpoints the widget needs.
#[async_trait]
pub trait RiotApi: Send + Sync {
    async fn account_by_riot_id(
        &self,
        platform: Platform,
        game_name: &str,
        tag_line: &str,
    ) -> Result<Account>;

    async fn summoner_by_puuid(&self, platform: Platform, puuid: &str) -> Result<Summoner>;

    async fn league_entries(&self, platform: Platform, puuid: &str) -> Result<Vec<LeagueEntry>>;

    async fn match_ids(&self, platform: Platform, puuid: &str, count: usize)
        -> Result<Vec<String>>;

    async fn match_detail(&self, platform: Platform, match_id: &str) -> Result<MatchDetail>;
}

/// [`RiotApi`] over HTTPS with a single API key.
pub struct RiotClient {
    http: reqwest::Client,
    api_key: String,
}

impl RiotClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
        }
    }

    fn platform_url(platform: Platform, segments: &[&str]) -> Result<Url> {
        build_url(platform.as_str(), segments)
    }

    fn routing_url(region: RoutingRegion, segments: &[&str]) -> Result<Url> {
        build_url(region.as_str(), segments)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let url_str = url.to_string();
        let response = self
            .http
            .get(url)
            .header("X-Riot-Token", &self.api_key)
            .send()
            .await
            .map_err(|source| LolError::Http {
                url: url_str.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LolError::UnexpectedStatus {
                url: url_str,
                status,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| LolError::Decode {
                url: url_str,
                source,
            })
    }
}

/// `https://{host}.api.riotgames.com/{segments..}` with each segment percent-encoded.
fn build_url(host: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(&format!("https://{}.api.riotgames.com", host))
        .map_err(|e| LolError::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| LolError::InvalidUrl(format!("{} cannot take a path", host)))?
        .extend(segments);
    Ok(url)
}

#[async_trait]
impl RiotApi for RiotClient {
    #[instrument(skip(self))]
    async fn account_by_riot_id(
        &self,
        platform: Platform,
        game_name: &str,
        tag_line: &str,
    ) -> Result<Account> {
        let url = Self::routing_url(
            platform.account_region(),
            &["riot", "account", "v1", "accounts", "by-riot-id", game_name, tag_line],
        )?;
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn summoner_by_puuid(&self, platform: Platform, puuid: &str) -> Result<Summoner> {
        let url = Self::platform_url(
            platform,
            &["lol", "summoner", "v4", "summoners", "by-puuid", puuid],
        )?;
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn league_entries(&self, platform: Platform, puuid: &str) -> Result<Vec<LeagueEntry>> {
        let url = Self::platform_url(
            platform,
            &["lol", "league", "v4", "entries", "by-puuid", puuid],
        )?;
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn match_ids(
        &self,
        platform: Platform,
        puuid: &str,
        count: usize,
    ) -> Result<Vec<String>> {
        let mut url = Self::routing_url(
            platform.match_region(),
            &["lol", "match", "v5", "matches", "by-puuid", puuid, "ids"],
        )?;
        url.query_pairs_mut()
            .append_pair("start", "0")
            .append_pair("count", &count.to_string());
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn match_detail(&self, platform: Platform, match_id: &str) -> Result<MatchDetail> {
        let url = Self::routing_url(
            platform.match_region(),
            &["lol", "match", "v5", "matches", match_id],
        )?;
        self.get_json(url).await
    }
}
